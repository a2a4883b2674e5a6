// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Response assertion engine.
//!
//! Four independent checks over a decoded [`SearchResponse`]. A scenario picks
//! the ones that match its intent; a zero-match scenario, for instance, has no
//! business asserting term overlap.
//!
//! | Check                   | Holds when                                                      |
//! |-------------------------|-----------------------------------------------------------------|
//! | `check_match_count`     | number of matched items meets the expectation                   |
//! | `check_term_overlap`    | SOME product name contains SOME expected term (case-insensitive) |
//! | `check_score_bounds`    | EVERY present percentage lies in [0, 100]                       |
//! | `check_score_threshold` | EVERY present percentage is strictly above the floor            |
//!
//! The two score checks quantify over products that carry a percentage, so a
//! response with no matches satisfies both vacuously.
//!
//! Term overlap is existential on purpose: ranking order shifts between
//! deployments, and one relevant product is enough to prove the matcher found
//! the right neighbourhood.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ContractViolation;
use crate::response::SearchResponse;

/// Expected number of top-level matched items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CountExpectation {
    Exactly(usize),
    AtLeast(usize),
}

impl CountExpectation {
    pub fn holds(self, actual: usize) -> bool {
        match self {
            CountExpectation::Exactly(n) => actual == n,
            CountExpectation::AtLeast(n) => actual >= n,
        }
    }
}

impl fmt::Display for CountExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountExpectation::Exactly(n) => write!(f, "exactly {}", n),
            CountExpectation::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Assert the number of top-level matched items.
pub fn check_match_count(
    response: &SearchResponse,
    expected: CountExpectation,
) -> Result<(), ContractViolation> {
    let actual = response.matched_items().len();
    if expected.holds(actual) {
        Ok(())
    } else {
        Err(ContractViolation::MatchCount { expected, actual })
    }
}

/// Assert the total number of internal product matches across all items.
///
/// Items without a product list contribute zero.
pub fn check_internal_match_count(
    response: &SearchResponse,
    expected: usize,
) -> Result<(), ContractViolation> {
    let actual = response.internal_products().count();
    if actual == expected {
        Ok(())
    } else {
        Err(ContractViolation::InternalMatchCount { expected, actual })
    }
}

/// Assert that at least one product name contains at least one term.
///
/// Matching is a case-insensitive substring test. An empty term set can never
/// be satisfied.
pub fn check_term_overlap(
    response: &SearchResponse,
    terms: &[String],
) -> Result<(), ContractViolation> {
    let lowered: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();

    let found = response.internal_products().any(|product| {
        let name = product.name.as_deref().unwrap_or("").to_lowercase();
        lowered.iter().any(|term| name.contains(term.as_str()))
    });

    if found {
        Ok(())
    } else {
        Err(ContractViolation::NoTermOverlap {
            terms: terms.to_vec(),
        })
    }
}

/// Assert every present percentage lies in the closed range [0, 100].
pub fn check_score_bounds(response: &SearchResponse) -> Result<(), ContractViolation> {
    for (product, percentage) in response.scored_products() {
        // INVARIANT: closed range, NaN is out of bounds
        if !(0.0..=100.0).contains(&percentage) {
            return Err(ContractViolation::ScoreOutOfBounds {
                name: product.display_name().to_string(),
                percentage,
            });
        }
    }
    Ok(())
}

/// Assert every present percentage strictly exceeds `minimum`.
pub fn check_score_threshold(
    response: &SearchResponse,
    minimum: f64,
) -> Result<(), ContractViolation> {
    for (product, percentage) in response.scored_products() {
        // INVARIANT: strict inequality, a score equal to the floor fails
        if percentage.partial_cmp(&minimum) != Some(std::cmp::Ordering::Greater) {
            return Err(ContractViolation::ScoreBelowMinimum {
                name: product.display_name().to_string(),
                percentage,
                minimum,
            });
        }
    }
    Ok(())
}

/// One selectable check, as carried by a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "check", content = "value")]
pub enum Check {
    MatchCount(CountExpectation),
    InternalMatchCount(usize),
    TermOverlap(Vec<String>),
    ScoreBounds,
    ScoreAbove(f64),
}

impl Check {
    pub fn evaluate(&self, response: &SearchResponse) -> Result<(), ContractViolation> {
        match self {
            Check::MatchCount(expected) => check_match_count(response, *expected),
            Check::InternalMatchCount(expected) => check_internal_match_count(response, *expected),
            Check::TermOverlap(terms) => check_term_overlap(response, terms),
            Check::ScoreBounds => check_score_bounds(response),
            Check::ScoreAbove(minimum) => check_score_threshold(response, *minimum),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::MatchCount(expected) => write!(f, "matches {}", expected),
            Check::InternalMatchCount(n) => write!(f, "internal matches exactly {}", n),
            Check::TermOverlap(terms) => write!(f, "name contains any of [{}]", terms.join(", ")),
            Check::ScoreBounds => write!(f, "percentages within [0, 100]"),
            Check::ScoreAbove(min) => write!(f, "percentages above {}", min),
        }
    }
}

/// Run checks in order, stopping at the first violation.
pub fn evaluate_all(response: &SearchResponse, checks: &[Check]) -> Result<(), ContractViolation> {
    checks.iter().try_for_each(|check| check.evaluate(response))
}
