// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Process-wide harness configuration.
//!
//! Loaded once before any scenario runs and handed to the client by reference.
//! Nothing mutates it afterwards, which is what lets scenarios run on any
//! number of workers without coordination.
//!
//! # Environment
//!
//! | Variable                   | Field                  | Default              |
//! |----------------------------|------------------------|----------------------|
//! | `MATCHPROBE_BASE_URL`      | `base_url`             | (required)           |
//! | `API_KEY`                  | `api_key`              | (required)           |
//! | `MATCHPROBE_TEXT_ENDPOINT` | `text_endpoint`        | `/search/free-text`  |
//! | `MATCHPROBE_URL_ENDPOINT`  | `url_endpoint`         | `/search/from-url`   |
//! | `MATCHPROBE_TIMEOUT_SECS`  | `scenario_timeout`     | `120`                |
//! | `CI`                       | `retry_transient_once` | set → `true`         |

use std::env;
use std::time::Duration;

use crate::error::InfrastructureFailure;
use crate::request::SearchKind;

pub const DEFAULT_TEXT_ENDPOINT: &str = "/search/free-text";
pub const DEFAULT_URL_ENDPOINT: &str = "/search/from-url";
pub const DEFAULT_SCENARIO_TIMEOUT: Duration = Duration::from_secs(120);

pub const ENV_BASE_URL: &str = "MATCHPROBE_BASE_URL";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_TEXT_ENDPOINT: &str = "MATCHPROBE_TEXT_ENDPOINT";
pub const ENV_URL_ENDPOINT: &str = "MATCHPROBE_URL_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "MATCHPROBE_TIMEOUT_SECS";
pub const ENV_CI: &str = "CI";

#[derive(Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Scheme + host (+ optional prefix), no trailing slash required.
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header.
    pub api_key: String,
    pub text_endpoint: String,
    pub url_endpoint: String,
    /// Hard budget for one scenario, shared by every request it sends.
    pub scenario_timeout: Duration,
    /// Allow one retry on transient infrastructure failure (shared envs only).
    pub retry_transient_once: bool,
}

// Hand-written so the credential never ends up in logs.
impl std::fmt::Debug for HarnessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarnessConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("text_endpoint", &self.text_endpoint)
            .field("url_endpoint", &self.url_endpoint)
            .field("scenario_timeout", &self.scenario_timeout)
            .field("retry_transient_once", &self.retry_transient_once)
            .finish()
    }
}

impl HarnessConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            text_endpoint: DEFAULT_TEXT_ENDPOINT.to_string(),
            url_endpoint: DEFAULT_URL_ENDPOINT.to_string(),
            scenario_timeout: DEFAULT_SCENARIO_TIMEOUT,
            retry_transient_once: false,
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, InfrastructureFailure> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup, for tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InfrastructureFailure>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL).ok_or_else(|| InfrastructureFailure::InvalidConfig {
            reason: format!("{} is not set", ENV_BASE_URL),
        })?;
        let api_key = lookup(ENV_API_KEY).ok_or_else(|| InfrastructureFailure::InvalidConfig {
            reason: format!("{} is not set", ENV_API_KEY),
        })?;

        let mut config = Self::new(base_url, api_key);

        if let Some(path) = lookup(ENV_TEXT_ENDPOINT) {
            config.text_endpoint = path;
        }
        if let Some(path) = lookup(ENV_URL_ENDPOINT) {
            config.url_endpoint = path;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| InfrastructureFailure::InvalidConfig {
                    reason: format!("{}={:?}: {}", ENV_TIMEOUT_SECS, raw, e),
                })?;
            config.scenario_timeout = Duration::from_secs(secs);
        }
        config.retry_transient_once = lookup(ENV_CI)
            .is_some_and(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"));

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot possibly produce a meaningful run.
    pub fn validate(&self) -> Result<(), InfrastructureFailure> {
        if self.api_key.trim().is_empty() {
            return Err(InfrastructureFailure::InvalidConfig {
                reason: "credential is empty".to_string(),
            });
        }
        let lower = self.base_url.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(InfrastructureFailure::InvalidConfig {
                reason: format!("base URL {:?} must use http or https", self.base_url),
            });
        }
        if self.scenario_timeout.is_zero() {
            return Err(InfrastructureFailure::InvalidConfig {
                reason: "scenario timeout must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute endpoint URL for a search kind.
    pub fn endpoint_url(&self, kind: SearchKind) -> String {
        let path = match kind {
            SearchKind::Text => &self.text_endpoint,
            SearchKind::Url => &self.url_endpoint,
        };
        join_url(&self.base_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
