// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Failure taxonomy for a harness run.
//!
//! Three things can happen to a scenario, and they must never be confused:
//!
//! 1. The service rejects the input with the status the scenario expected.
//!    That is a **validation rejection** and it counts as a pass.
//! 2. The service answers, but the status or body diverges from what the
//!    scenario expected. That is a [`ContractViolation`].
//! 3. The harness cannot get an answer at all (connection refused, timeout,
//!    bad credential). That is an [`InfrastructureFailure`] and says nothing
//!    about the contract.
//!
//! Every variant names the offending value so a failing report is actionable
//! without re-running anything.

use std::fmt;

use crate::assertions::CountExpectation;

/// Longest body excerpt carried inside a status mismatch report.
pub const BODY_EXCERPT_LEN: usize = 240;

/// The response diverged from what the scenario expected.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractViolation {
    /// HTTP status differs from the expected one.
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body_excerpt: String,
    },
    /// Body is not JSON or lacks the `result.matchedItems` shape.
    MalformedBody { reason: String },
    /// Top-level matched item count is wrong.
    MatchCount {
        expected: CountExpectation,
        actual: usize,
    },
    /// Total internal product matches across all items is wrong.
    InternalMatchCount { expected: usize, actual: usize },
    /// No internal product name contains any of the expected terms.
    NoTermOverlap { terms: Vec<String> },
    /// A similarity percentage lies outside [0, 100].
    ScoreOutOfBounds { name: String, percentage: f64 },
    /// A similarity percentage does not exceed the scenario's floor.
    ScoreBelowMinimum {
        name: String,
        percentage: f64,
        minimum: f64,
    },
    /// The same payload produced two different statuses.
    NonIdempotentStatus { first: u16, second: u16 },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::UnexpectedStatus {
                expected,
                actual,
                body_excerpt,
            } => {
                write!(f, "expected status {} but got {}", expected, actual)?;
                if !body_excerpt.is_empty() {
                    write!(f, " (body: {})", body_excerpt)?;
                }
                Ok(())
            }
            ContractViolation::MalformedBody { reason } => {
                write!(f, "response body does not match the result shape: {}", reason)
            }
            ContractViolation::MatchCount { expected, actual } => {
                write!(
                    f,
                    "expected {} top-level matched items, got {}",
                    expected, actual
                )
            }
            ContractViolation::InternalMatchCount { expected, actual } => {
                write!(
                    f,
                    "expected exactly {} internal matched products, got {}",
                    expected, actual
                )
            }
            ContractViolation::NoTermOverlap { terms } => {
                write!(
                    f,
                    "expected at least one internal product name to contain one of these terms: {}, but none matched",
                    terms.join(", ")
                )
            }
            ContractViolation::ScoreOutOfBounds { name, percentage } => {
                write!(
                    f,
                    "expected percentage within [0, 100], but got {} for product \"{}\"",
                    percentage, name
                )
            }
            ContractViolation::ScoreBelowMinimum {
                name,
                percentage,
                minimum,
            } => {
                write!(
                    f,
                    "expected percentage to be greater than {}, but got {} for product \"{}\"",
                    minimum, percentage, name
                )
            }
            ContractViolation::NonIdempotentStatus { first, second } => {
                write!(
                    f,
                    "identical payload answered {} then {}",
                    first, second
                )
            }
        }
    }
}

impl std::error::Error for ContractViolation {}

/// The harness could not obtain an answer that says anything about the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfrastructureFailure {
    /// TCP connect / DNS failure.
    Connect { endpoint: String, reason: String },
    /// The per-scenario budget elapsed.
    Timeout { endpoint: String, budget_secs: u64 },
    /// Credential rejected (401/403).
    Auth { endpoint: String, status: u16 },
    /// Any other transport-level error (TLS, protocol, body read).
    Transport { endpoint: String, reason: String },
    /// Configuration is unusable; nothing was sent.
    InvalidConfig { reason: String },
}

impl InfrastructureFailure {
    /// Whether a single retry is allowed to mask this failure.
    ///
    /// Credential and configuration problems never go away on their own. A
    /// timeout has already spent the scenario budget, so it ends the scenario.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            InfrastructureFailure::Connect { .. } | InfrastructureFailure::Transport { .. }
        )
    }
}

impl fmt::Display for InfrastructureFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfrastructureFailure::Connect { endpoint, reason } => {
                write!(f, "cannot reach {}: {}", endpoint, reason)
            }
            InfrastructureFailure::Timeout {
                endpoint,
                budget_secs,
            } => {
                write!(f, "{} did not answer within {}s", endpoint, budget_secs)
            }
            InfrastructureFailure::Auth { endpoint, status } => {
                write!(f, "{} rejected the credential with {}", endpoint, status)
            }
            InfrastructureFailure::Transport { endpoint, reason } => {
                write!(f, "transport error talking to {}: {}", endpoint, reason)
            }
            InfrastructureFailure::InvalidConfig { reason } => {
                write!(f, "invalid harness configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for InfrastructureFailure {}

/// Anything that can abort one scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum HarnessError {
    Contract(ContractViolation),
    Infrastructure(InfrastructureFailure),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Contract(v) => write!(f, "contract violation: {}", v),
            HarnessError::Infrastructure(e) => write!(f, "infrastructure failure: {}", e),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Contract(v) => Some(v),
            HarnessError::Infrastructure(e) => Some(e),
        }
    }
}

impl From<ContractViolation> for HarnessError {
    fn from(v: ContractViolation) -> Self {
        HarnessError::Contract(v)
    }
}

impl From<InfrastructureFailure> for HarnessError {
    fn from(e: InfrastructureFailure) -> Self {
        HarnessError::Infrastructure(e)
    }
}

/// Final verdict for one scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Accepted with the expected status and every selected check held.
    Passed { status: u16 },
    /// Rejected with the expected 4xx status.
    Rejected { status: u16 },
    Violated(ContractViolation),
    Infrastructure(InfrastructureFailure),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Passed { .. } | Outcome::Rejected { .. })
    }

    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Passed { .. } => "PASS",
            Outcome::Rejected { .. } => "REJECTED",
            Outcome::Violated(_) => "FAIL",
            Outcome::Infrastructure(_) => "INFRA",
        }
    }
}

impl From<HarnessError> for Outcome {
    fn from(e: HarnessError) -> Self {
        match e {
            HarnessError::Contract(v) => Outcome::Violated(v),
            HarnessError::Infrastructure(i) => Outcome::Infrastructure(i),
        }
    }
}

/// Cut a response body down to something that fits on one report line.
pub fn body_excerpt(body: &str) -> String {
    let flat: String = body
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let trimmed = flat.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_LEN {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(BODY_EXCERPT_LEN).collect();
    format!("{}…", cut)
}
