// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::path::Path;

use matchprobe::config::{ENV_API_KEY, ENV_BASE_URL, ENV_TIMEOUT_SECS};
use matchprobe::logging::{self, Verbosity};
use matchprobe::scenario::{load_fixtures, Catalog};
use matchprobe::{
    normalize, run_scenarios, ExecutorOptions, HarnessConfig, SearchIntent, SearchService,
    ServiceClient,
};

mod cli;
use cli::display;
use cli::{Cli, Commands, GlobalArgs, ProbeKind};

/// Exit code for anything that prevented a meaningful run.
const EXIT_INFRASTRUCTURE: i32 = 2;

fn main() {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.global.verbose, cli.global.quiet);
    if let Err(e) = logging::init_subscriber(verbosity, display::use_colors()) {
        eprintln!("⚠️  {}", e);
    }

    let code = match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            EXIT_INFRASTRUCTURE
        }
    };
    std::process::exit(code);
}

fn dispatch(cli: Cli) -> Result<i32, String> {
    match cli.command {
        Commands::Run {
            class,
            filter,
            fixtures,
            jobs,
            check_idempotence,
            json,
        } => {
            let catalog = load_catalog(fixtures.as_deref())?;
            let scenarios = catalog.select(class.as_class(), filter.as_deref());
            if scenarios.is_empty() {
                return Err("No scenarios match the given class and filter".to_string());
            }

            let config = build_config(&cli.global)?;
            let client = ServiceClient::new(&config).map_err(|e| e.to_string())?;
            let options = ExecutorOptions {
                retry_transient_once: config.retry_transient_once,
                check_idempotence,
                show_progress: !json && !cli.global.quiet && atty::is(atty::Stream::Stderr),
            };

            tracing::info!(
                scenarios = scenarios.len(),
                jobs,
                retry = options.retry_transient_once,
                "starting run"
            );
            let summary = run_scenarios(&client, &scenarios, &options, jobs);

            if json {
                let report = serde_json::to_string_pretty(&display::report_json(&summary))
                    .map_err(|e| format!("Failed to serialize report: {}", e))?;
                println!("{}", report);
            } else {
                display::print_report(&summary);
            }
            Ok(summary.exit_code())
        }
        Commands::List { class, fixtures } => {
            let catalog = load_catalog(fixtures.as_deref())?;
            display::print_catalog(&catalog.select(class.as_class(), None));
            Ok(0)
        }
        Commands::Probe {
            kind,
            input,
            top_k,
            threshold,
            status_id,
        } => {
            let mut intent = match kind {
                ProbeKind::Text => SearchIntent::text(input),
                ProbeKind::Url => SearchIntent::url(input),
            };
            if let Some(top_k) = top_k {
                intent = intent.top_k(top_k);
            }
            if let Some(threshold) = threshold {
                intent = intent.threshold(threshold);
            }
            if let Some(status_id) = status_id {
                intent = intent.status_id(status_id);
            }

            let config = build_config(&cli.global)?;
            let client = ServiceClient::new(&config).map_err(|e| e.to_string())?;
            let request = normalize(&intent);
            let response = client.submit(&request).map_err(|e| e.to_string())?;
            display::print_probe(&request, &response);
            Ok(0)
        }
    }
}

fn load_catalog(fixtures: Option<&Path>) -> Result<Catalog, String> {
    match fixtures {
        Some(path) => {
            let fixtures = load_fixtures(path)?;
            tracing::debug!(path = %path.display(), count = fixtures.len(), "loaded fixtures");
            Ok(Catalog::with_fixtures(fixtures))
        }
        None => Ok(Catalog::builtin()),
    }
}

/// Flags take precedence; everything else falls back to the environment.
fn build_config(global: &GlobalArgs) -> Result<HarnessConfig, String> {
    HarnessConfig::from_lookup(|key| match key {
        ENV_BASE_URL => global.base_url.clone(),
        ENV_API_KEY => global.api_key.clone(),
        ENV_TIMEOUT_SECS => global
            .timeout_secs
            .map(|s| s.to_string())
            .or_else(|| std::env::var(key).ok()),
        _ => std::env::var(key).ok(),
    })
    .map_err(|e| e.to_string())
}

