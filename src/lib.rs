// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Contract verification for fuzzy product-matching search services.
//!
//! The service under test accepts free text or a product-page URL and answers
//! with ranked internal-catalog matches carrying confidence percentages. This
//! crate encodes the service's external contract as executable scenarios and
//! reports each one as passed, violated, or unable to run.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌───────────────┐
//! │  request.rs  │──▶│  client.rs   │──▶│ response.rs  │──▶│ assertions.rs │
//! │ (normalize,  │   │ (submit one  │   │ (decode,     │   │ (count, terms,│
//! │  defaults)   │   │  HTTP POST)  │   │  tolerant)   │   │  score checks)│
//! └──────────────┘   └──────────────┘   └──────────────┘   └───────────────┘
//!        ▲                                                         │
//!        │             ┌──────────────────────────────┐            │
//!        └─────────────│         executor.rs          │◀───────────┘
//!                      │  (pipeline per scenario,     │
//!                      │   worker pool, run summary)  │
//!                      └──────────────────────────────┘
//!                                     ▲
//!                      ┌──────────────────────────────┐
//!                      │          scenario/           │
//!                      │  (built-in catalog, quality  │
//!                      │   fixtures from JSON)        │
//!                      └──────────────────────────────┘
//! ```
//!
//! # Outcomes
//!
//! | Outcome          | Meaning                                              |
//! |------------------|------------------------------------------------------|
//! | `Passed`         | Accepted, every selected check held                  |
//! | `Rejected`       | Expected validation rejection observed               |
//! | `Violated`       | Wrong status, malformed body, or a failed check       |
//! | `Infrastructure` | Connect, timeout, auth, or config failure             |
//!
//! Infrastructure failures are never reported as contract violations.
//!
//! # Usage
//!
//! ```ignore
//! use matchprobe::{run_scenarios, Catalog, ExecutorOptions, HarnessConfig, ServiceClient};
//!
//! let config = HarnessConfig::from_env()?;
//! let client = ServiceClient::new(&config)?;
//! let catalog = Catalog::builtin();
//! let summary = run_scenarios(&client, catalog.scenarios(), &ExecutorOptions::default(), 0);
//! std::process::exit(summary.exit_code());
//! ```

pub mod assertions;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod request;
pub mod response;
pub mod scenario;
pub mod testing;

pub use assertions::{evaluate_all, Check, CountExpectation};
pub use client::{RawResponse, SearchService, ServiceClient};
pub use config::HarnessConfig;
pub use error::{ContractViolation, HarnessError, InfrastructureFailure, Outcome};
pub use executor::{execute, run_scenarios, ExecutorOptions, RunSummary, ScenarioReport};
pub use request::{normalize, RankingToggle, SearchIntent, SearchKind, SearchRequest};
pub use response::SearchResponse;
pub use scenario::{Catalog, Scenario, ScenarioClass};
