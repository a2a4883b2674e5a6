// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scenarios: immutable `(input, expected outcome)` fixtures.
//!
//! Two classes, with different purposes:
//!
//! - **Quality** scenarios feed realistic inputs and assert a floor on
//!   relevance and confidence. They do not assume the matcher is
//!   deterministic, only that it is good enough.
//! - **Boundary** scenarios probe the service's own input validation: type
//!   checks, numeric ranges, URL safety. Matching quality is irrelevant there.
//!
//! A scenario never changes after construction. The executor only reads it.

pub mod catalog;
pub mod fixtures;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assertions::Check;
use crate::request::SearchIntent;

pub use catalog::{boundary_scenarios, quality_scenarios, Catalog};
pub use fixtures::{load_fixtures, parse_fixtures, QualityFixture};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioClass {
    Quality,
    Boundary,
}

impl fmt::Display for ScenarioClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioClass::Quality => f.write_str("quality"),
            ScenarioClass::Boundary => f.write_str("boundary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub description: String,
    pub class: ScenarioClass,
    pub intent: SearchIntent,
    pub expected_status: u16,
    /// Checks run on the body when the expected status is a success.
    pub checks: Vec<Check>,
}

impl Scenario {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        class: ScenarioClass,
        intent: SearchIntent,
        expected_status: u16,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            class,
            intent,
            expected_status,
            checks: Vec::new(),
        }
    }

    /// Boundary scenario expecting the given status and no body checks.
    pub fn boundary(
        id: impl Into<String>,
        description: impl Into<String>,
        intent: SearchIntent,
        expected_status: u16,
    ) -> Self {
        Self::new(id, description, ScenarioClass::Boundary, intent, expected_status)
    }

    /// Append a body check.
    pub fn expecting(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Whether the scenario expects the service to accept the input.
    pub fn expects_acceptance(&self) -> bool {
        (200..300).contains(&self.expected_status)
    }
}
