// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Diagnostic logging.
//!
//! Structured events go to stderr through `tracing`. The scenario report is
//! not a log: it is rendered by `cli::display` and written to stdout.
//!
//! Filter priority, highest first:
//!
//! 1. `MATCHPROBE_LOG` (directives, e.g. `matchprobe=debug,warn`)
//! 2. `RUST_LOG`
//! 3. `-v` / `-q`
//! 4. `warn`

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "MATCHPROBE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// `-v` wins when both flags are given.
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Pick the filter directive string. Unparseable env values fall through.
fn select_directive<F>(verbosity: Verbosity, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    for var in [ENV_LOG, "RUST_LOG"] {
        if let Some(directives) = lookup(var) {
            if !directives.trim().is_empty() && EnvFilter::try_new(&directives).is_ok() {
                return directives;
            }
        }
    }

    let level = verbosity.default_level();
    if verbosity == Verbosity::Verbose {
        format!("{},{}=debug", level, env!("CARGO_CRATE_NAME"))
    } else {
        level.to_string()
    }
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    let directive = select_directive(verbosity, |k| std::env::var(k).ok());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(Level::WARN.as_str()))
}

/// Install the global subscriber. Call once, early in `main`.
///
/// A second call is reported as an error rather than a panic.
pub fn init_subscriber(verbosity: Verbosity, use_colors: bool) -> Result<(), String> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_colors && atty::is(atty::Stream::Stderr))
        .with_target(true)
        .with_level(true);

    let registry = tracing_subscriber::registry().with(build_env_filter(verbosity));

    let result = if verbosity == Verbosity::Verbose {
        registry
            .with(fmt_layer.with_timer(fmt::time::uptime()))
            .try_init()
    } else {
        registry.with(fmt_layer.without_time().compact()).try_init()
    };

    result.map_err(|e| format!("Failed to install log subscriber: {}", e))
}
