// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the matching service.
//!
//! One normalized request in, one `(status, body)` pair out. No retries live
//! here: a slow or failed call is reported as-is and the executor decides
//! what to do with it.
//!
//! The time limit belongs to the scenario, not to the request. The executor
//! hands every submission whatever is left of the scenario budget, so a
//! retry or a repeated submission can never stretch a scenario past it.
//!
//! The client is the only place that knows about HTTP. Everything above it
//! talks to the [`SearchService`] trait, so the executor can be driven by an
//! in-memory fake in unit tests.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;

use crate::config::HarnessConfig;
use crate::error::InfrastructureFailure;
use crate::request::SearchRequest;

/// What came back over the wire, undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

/// Anything that can answer a normalized search request.
pub trait SearchService: Sync {
    /// Send one request, giving up with [`InfrastructureFailure::Timeout`]
    /// once `budget` has elapsed. A zero budget fails without sending.
    fn submit_within(
        &self,
        request: &SearchRequest,
        budget: Duration,
    ) -> Result<RawResponse, InfrastructureFailure>;

    /// Wall-clock time one scenario may spend on this service, summed over
    /// every request it sends.
    fn scenario_budget(&self) -> Duration;

    /// Send one request with the whole scenario budget.
    fn submit(&self, request: &SearchRequest) -> Result<RawResponse, InfrastructureFailure> {
        self.submit_within(request, self.scenario_budget())
    }
}

/// Blocking HTTP client bound to one [`HarnessConfig`].
pub struct ServiceClient<'a> {
    config: &'a HarnessConfig,
    http: Client,
    auth: HeaderValue,
}

impl<'a> ServiceClient<'a> {
    pub fn new(config: &'a HarnessConfig) -> Result<Self, InfrastructureFailure> {
        config.validate()?;

        let mut auth = HeaderValue::from_str(&config.api_key).map_err(|e| {
            InfrastructureFailure::InvalidConfig {
                reason: format!("credential is not a valid header value: {}", e),
            }
        })?;
        auth.set_sensitive(true);

        // No idle pool: every submission gets its own short-lived connection.
        let http = Client::builder()
            .timeout(config.scenario_timeout)
            .pool_max_idle_per_host(0)
            .user_agent(concat!("matchprobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InfrastructureFailure::InvalidConfig {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { config, http, auth })
    }

    pub fn config(&self) -> &HarnessConfig {
        self.config
    }

    fn timed_out(&self, endpoint: &str) -> InfrastructureFailure {
        InfrastructureFailure::Timeout {
            endpoint: endpoint.to_string(),
            budget_secs: self.config.scenario_timeout.as_secs(),
        }
    }

    fn classify(&self, endpoint: &str, err: &reqwest::Error) -> InfrastructureFailure {
        if err.is_timeout() {
            self.timed_out(endpoint)
        } else if err.is_connect() {
            InfrastructureFailure::Connect {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            }
        } else {
            InfrastructureFailure::Transport {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

impl SearchService for ServiceClient<'_> {
    fn submit_within(
        &self,
        request: &SearchRequest,
        budget: Duration,
    ) -> Result<RawResponse, InfrastructureFailure> {
        let endpoint = self.config.endpoint_url(request.kind);
        if budget.is_zero() {
            return Err(self.timed_out(&endpoint));
        }
        let body = request.to_json();

        tracing::debug!(
            endpoint = %endpoint,
            kind = %request.kind,
            budget_ms = budget.as_millis() as u64,
            "submitting search"
        );
        let start = Instant::now();

        let response = self
            .http
            .post(&endpoint)
            .header(AUTHORIZATION, self.auth.clone())
            .timeout(budget)
            .json(&body)
            .send()
            .map_err(|e| self.classify(&endpoint, &e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(InfrastructureFailure::Auth {
                endpoint,
                status: status.as_u16(),
            });
        }

        let text = response.text().map_err(|e| self.classify(&endpoint, &e))?;
        let elapsed = start.elapsed();

        tracing::debug!(
            endpoint = %endpoint,
            status = status.as_u16(),
            bytes = text.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "search answered"
        );

        Ok(RawResponse {
            status: status.as_u16(),
            body: text,
            elapsed,
        })
    }

    fn scenario_budget(&self) -> Duration {
        self.config.scenario_timeout
    }
}
