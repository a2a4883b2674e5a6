// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the matchprobe command-line interface.
//!
//! Three subcommands: `run` executes the scenario catalog against a live
//! service, `list` prints the catalog without touching the network, and
//! `probe` sends a single hand-built request and prints the raw answer.
//!
//! Connection settings come from flags or the environment (`MATCHPROBE_BASE_URL`,
//! `API_KEY`, ...). Flags win.

pub mod display;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use matchprobe::config::{ENV_API_KEY, ENV_BASE_URL, ENV_TIMEOUT_SECS};
use matchprobe::scenario::ScenarioClass;

#[derive(Parser)]
#[command(
    name = "matchprobe",
    about = "Contract verification for fuzzy product-matching search services",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Service base URL, e.g. https://search.staging.example.com
    #[arg(long, global = true, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Credential sent verbatim in the Authorization header
    #[arg(long, global = true, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Per-scenario time budget in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,

    /// Debug-level diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Errors only on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ClassFilter {
    Quality,
    Boundary,
    All,
}

impl ClassFilter {
    pub fn as_class(self) -> Option<ScenarioClass> {
        match self {
            ClassFilter::Quality => Some(ScenarioClass::Quality),
            ClassFilter::Boundary => Some(ScenarioClass::Boundary),
            ClassFilter::All => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProbeKind {
    Text,
    Url,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute scenarios against the configured service
    Run {
        /// Scenario class to run
        #[arg(long, value_enum, default_value = "all")]
        class: ClassFilter,

        /// Only scenarios whose id or description contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Quality fixtures file (JSON array); replaces the built-in quality scenarios
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Worker count (0 = one per core)
        #[arg(short, long, default_value = "0")]
        jobs: usize,

        /// Submit every payload twice and require identical statuses
        #[arg(long)]
        check_idempotence: bool,

        /// Emit a JSON report on stdout instead of the table
        #[arg(long)]
        json: bool,
    },

    /// Print the scenario catalog
    List {
        #[arg(long, value_enum, default_value = "all")]
        class: ClassFilter,

        #[arg(long)]
        fixtures: Option<PathBuf>,
    },

    /// Send one request and print the status and body
    Probe {
        /// Which endpoint to hit
        #[arg(long, value_enum, default_value = "text")]
        kind: ProbeKind,

        /// Payload (product text or page URL)
        input: String,

        #[arg(long)]
        top_k: Option<i64>,

        #[arg(long)]
        threshold: Option<f64>,

        #[arg(long)]
        status_id: Option<String>,
    },
}
