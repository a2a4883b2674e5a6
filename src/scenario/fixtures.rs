// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Data-driven quality scenarios.
//!
//! A fixtures file is a JSON array:
//!
//! ```json
//! [
//!   {
//!     "id": "QLT-10",
//!     "description": "bamboo cutting board from text",
//!     "type": "text",
//!     "input": "Bamboo Cutting Board 18x12",
//!     "expectedProductMatches": 1,
//!     "productTerms": ["cutting", "board"],
//!     "minPercentage": 50
//!   }
//! ]
//! ```
//!
//! `expectedInternalMatches` is optional and, when present, pins the total
//! number of internal products across all matched items.
//!
//! Every quality fixture expects at least one match and names at least one
//! term; a fixture that does not is rejected with its id.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{Scenario, ScenarioClass};
use crate::assertions::{Check, CountExpectation};
use crate::request::{SearchIntent, SearchKind};

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualityFixture {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SearchKind,
    pub input: String,
    pub expected_product_matches: usize,
    #[serde(default)]
    pub product_terms: Vec<String>,
    pub min_percentage: f64,
    #[serde(default)]
    pub expected_internal_matches: Option<usize>,
}

impl From<QualityFixture> for Scenario {
    fn from(fixture: QualityFixture) -> Self {
        let intent = SearchIntent::with_payload(fixture.kind, fixture.input.into());
        let expected = fixture.expected_product_matches;

        let mut scenario = Scenario::new(
            fixture.id,
            format!("should match {}", fixture.description),
            ScenarioClass::Quality,
            intent,
            200,
        )
        .expecting(Check::MatchCount(CountExpectation::Exactly(expected)));

        if let Some(internal) = fixture.expected_internal_matches {
            scenario = scenario.expecting(Check::InternalMatchCount(internal));
        }

        scenario
            .expecting(Check::TermOverlap(fixture.product_terms))
            .expecting(Check::ScoreBounds)
            .expecting(Check::ScoreAbove(fixture.min_percentage))
    }
}

impl QualityFixture {
    fn validate(&self) -> Result<(), String> {
        if self.expected_product_matches == 0 {
            return Err(format!(
                "fixture '{}': expectedProductMatches must be at least 1",
                self.id
            ));
        }
        if self.product_terms.iter().all(|t| t.trim().is_empty()) {
            return Err(format!("fixture '{}': productTerms must name a term", self.id));
        }
        Ok(())
    }
}

/// Parse a fixtures document.
pub fn parse_fixtures(json: &str) -> Result<Vec<QualityFixture>, String> {
    let fixtures: Vec<QualityFixture> =
        serde_json::from_str(json).map_err(|e| format!("Invalid fixtures JSON: {}", e))?;
    for fixture in &fixtures {
        fixture.validate()?;
    }
    Ok(fixtures)
}

/// Read and parse a fixtures file.
pub fn load_fixtures(path: &Path) -> Result<Vec<QualityFixture>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let fixtures = parse_fixtures(&content)
        .map_err(|e| format!("{}: {}", path.display(), e))?;

    let mut seen = std::collections::HashSet::new();
    for f in &fixtures {
        if !seen.insert(f.id.as_str()) {
            return Err(format!("{}: duplicate fixture id '{}'", path.display(), f.id));
        }
    }

    Ok(fixtures)
}
