// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scenario execution.
//!
//! Each scenario runs the same short pipeline:
//!
//! ```text
//! SearchIntent ──normalize──▶ SearchRequest ──submit──▶ RawResponse
//!                                                          │
//!                                    status == expected? ◀─┘
//!                                          │
//!                          accepted ──▶ decode ──▶ selected checks
//!                          rejected ──▶ ValidationRejection (pass)
//! ```
//!
//! Scenarios share nothing mutable, so the runner fans them out over a rayon
//! pool of any size. One scenario's failure never stops the others; every
//! scenario produces exactly one report.
//!
//! Retries are off by default. In shared environments a single retry may be
//! enabled, and only for connect and transport failures. A contract
//! violation or a timeout is never retried.
//!
//! The service's scenario budget is a hard deadline for the whole pipeline.
//! Each submission, including a retry or the idempotence repeat, only gets
//! what is left of it.

use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::assertions::evaluate_all;
use crate::client::{RawResponse, SearchService};
use crate::error::{body_excerpt, ContractViolation, HarnessError, InfrastructureFailure, Outcome};
use crate::request::{normalize, SearchRequest};
use crate::response::SearchResponse;
use crate::scenario::{Scenario, ScenarioClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutorOptions {
    /// Retry once on transient infrastructure failure.
    pub retry_transient_once: bool,
    /// Submit every payload twice and require identical statuses.
    pub check_idempotence: bool,
    /// Draw a progress bar on stderr while running.
    pub show_progress: bool,
}

/// Result of one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub id: String,
    pub description: String,
    pub class: ScenarioClass,
    pub expected_status: u16,
    /// Status actually observed, if any answer arrived.
    pub status: Option<u16>,
    pub outcome: Outcome,
    pub attempts: u32,
    pub elapsed: Duration,
}

/// Aggregate over a whole run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    pub reports: Vec<ScenarioReport>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_pass()).count()
    }

    pub fn violations(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Violated(_)))
            .count()
    }

    pub fn infrastructure_failures(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Infrastructure(_)))
            .count()
    }

    /// 0 when everything passed, 1 on any contract violation, 2 when the only
    /// problems were infrastructure failures.
    pub fn exit_code(&self) -> i32 {
        if self.violations() > 0 {
            1
        } else if self.infrastructure_failures() > 0 {
            2
        } else {
            0
        }
    }
}

/// Wall-clock budget shared by every request of one scenario.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    fn new(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.start.elapsed())
    }
}

/// Submit once, and once more if allowed and the failure was transient.
fn submit_with_policy<S>(
    service: &S,
    request: &SearchRequest,
    options: &ExecutorOptions,
    deadline: &Deadline,
    attempts: &mut u32,
) -> Result<RawResponse, InfrastructureFailure>
where
    S: SearchService + ?Sized,
{
    *attempts += 1;
    // INVARIANT: only infrastructure failures reach here, never a violation
    match service.submit_within(request, deadline.remaining()) {
        Err(e) if options.retry_transient_once && e.is_transient() => {
            tracing::warn!(error = %e, "transient failure, retrying once");
            *attempts += 1;
            service.submit_within(request, deadline.remaining())
        }
        other => other,
    }
}

fn run_pipeline<S>(
    service: &S,
    scenario: &Scenario,
    options: &ExecutorOptions,
    deadline: &Deadline,
    attempts: &mut u32,
    observed: &mut Option<u16>,
) -> Result<Outcome, HarnessError>
where
    S: SearchService + ?Sized,
{
    let request = normalize(&scenario.intent);
    let response = submit_with_policy(service, &request, options, deadline, attempts)?;
    *observed = Some(response.status);

    if response.status != scenario.expected_status {
        return Err(ContractViolation::UnexpectedStatus {
            expected: scenario.expected_status,
            actual: response.status,
            body_excerpt: body_excerpt(&response.body),
        }
        .into());
    }

    if options.check_idempotence {
        let again = submit_with_policy(service, &request, options, deadline, attempts)?;
        if again.status != response.status {
            return Err(ContractViolation::NonIdempotentStatus {
                first: response.status,
                second: again.status,
            }
            .into());
        }
    }

    if !scenario.expects_acceptance() {
        return Ok(Outcome::Rejected {
            status: response.status,
        });
    }

    if !scenario.checks.is_empty() {
        let decoded = SearchResponse::decode(&response.body)?;
        evaluate_all(&decoded, &scenario.checks)?;
    }

    Ok(Outcome::Passed {
        status: response.status,
    })
}

/// Run one scenario to a report. Never panics on service misbehaviour.
pub fn execute<S>(service: &S, scenario: &Scenario, options: &ExecutorOptions) -> ScenarioReport
where
    S: SearchService + ?Sized,
{
    let deadline = Deadline::new(service.scenario_budget());
    let mut attempts = 0;
    let mut observed = None;

    let outcome = run_pipeline(
        service,
        scenario,
        options,
        &deadline,
        &mut attempts,
        &mut observed,
    )
    .unwrap_or_else(Outcome::from);

    match &outcome {
        Outcome::Violated(v) => {
            tracing::info!(scenario = %scenario.id, violation = %v, "scenario failed")
        }
        Outcome::Infrastructure(e) => {
            tracing::warn!(scenario = %scenario.id, error = %e, "scenario could not run")
        }
        _ => tracing::info!(scenario = %scenario.id, outcome = outcome.label(), "scenario passed"),
    }

    ScenarioReport {
        id: scenario.id.clone(),
        description: scenario.description.clone(),
        class: scenario.class,
        expected_status: scenario.expected_status,
        status: observed,
        outcome,
        attempts,
        elapsed: deadline.start.elapsed(),
    }
}

#[cfg(feature = "parallel")]
fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    ) {
        pb.set_style(style.progress_chars("━━╸"));
    }
    pb.set_prefix("Running");
    pb
}

/// Run every scenario on a pool of `jobs` workers (0 = one per core).
///
/// Reports come back in catalog order regardless of completion order.
#[cfg(feature = "parallel")]
pub fn run_scenarios<S>(
    service: &S,
    scenarios: &[Scenario],
    options: &ExecutorOptions,
    jobs: usize,
) -> RunSummary
where
    S: SearchService + ?Sized,
{
    let start = Instant::now();
    let progress = create_progress_bar(scenarios.len(), options.show_progress);

    let run = || -> Vec<ScenarioReport> {
        scenarios
            .par_iter()
            .map(|scenario| {
                let report = execute(service, scenario, options);
                progress.set_message(format!("{} {}", report.id, report.outcome.label()));
                progress.inc(1);
                report
            })
            .collect()
    };

    let reports = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            tracing::warn!(error = %e, "could not build worker pool, using global pool");
            run()
        }
    };

    progress.finish_and_clear();

    RunSummary {
        reports,
        elapsed: start.elapsed(),
    }
}

/// Sequential fallback when the `parallel` feature is off.
#[cfg(not(feature = "parallel"))]
pub fn run_scenarios<S>(
    service: &S,
    scenarios: &[Scenario],
    options: &ExecutorOptions,
    _jobs: usize,
) -> RunSummary
where
    S: SearchService + ?Sized,
{
    let start = Instant::now();
    let reports = scenarios
        .iter()
        .map(|scenario| execute(service, scenario, options))
        .collect();
    RunSummary {
        reports,
        elapsed: start.elapsed(),
    }
}
