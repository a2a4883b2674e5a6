//! Custom cargo commands for matchprobe.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask live      - Run the catalog against MATCHPROBE_BASE_URL
//!
//! `live` also loads the quality fixtures file named by MATCHPROBE_FIXTURES,
//! resolved against the project root when relative.

use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("live") => live()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (markers + catalog ids + tests + clippy)
  test      Run all Rust tests
  check     Quick check (cargo check + test + clippy)
  live      Run every scenario against the service in MATCHPROBE_BASE_URL
            (MATCHPROBE_FIXTURES=<path> adds a quality fixtures file)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("matchprobe Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Checking invariant markers...");
    check_invariant_markers()?;
    println!("✓ Invariant markers present\n");

    println!("[2/5] Checking scenario ids...");
    check_scenario_ids()?;
    println!("✓ Scenario ids unique and contiguous\n");

    println!("[3/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[4/5] Building without the parallel feature...");
    run_cargo(&["check", "--quiet", "--no-default-features"])?;
    println!("✓ Sequential build compiles\n");

    println!("[5/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run the whole catalog against a live service
fn live() -> Result<()> {
    if env::var("MATCHPROBE_BASE_URL").is_err() {
        bail!("MATCHPROBE_BASE_URL is not set");
    }
    if env::var("API_KEY").is_err() {
        bail!("API_KEY is not set");
    }

    let mut args = vec!["run", "--release", "--", "run"];
    let fixtures = match env::var("MATCHPROBE_FIXTURES") {
        Ok(path) if !path.trim().is_empty() => Some(fixtures_path(&path)?),
        _ => None,
    };
    if let Some(path) = &fixtures {
        println!("Using fixtures {}", path);
        args.extend(["--fixtures", path.as_str()]);
    }
    run_cargo(&args)
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to resolve current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

/// Resolve a fixtures path against the project root and make sure it exists.
fn fixtures_path(raw: &str) -> Result<String> {
    let path = PathBuf::from(raw.trim());
    let path = if path.is_absolute() {
        path
    } else {
        project_root()?.join(path)
    };
    if !path.is_file() {
        bail!("MATCHPROBE_FIXTURES points at {}, which is not a file", path.display());
    }
    Ok(path.to_string_lossy().to_string())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn check_invariant_markers() -> Result<()> {
    let root = project_root()?;
    let src_dir = root.join("src");

    let output = Command::new("grep")
        .args(["-r", "INVARIANT:", "--include=*.rs"])
        .current_dir(&src_dir)
        .output()
        .context("Failed to run grep")?;

    let count = output
        .stdout
        .split(|&b| b == b'\n')
        .filter(|l| !l.is_empty())
        .count();

    if count < 4 {
        bail!(
            "Expected at least 4 INVARIANT markers, found {}. Someone may have removed safety comments!",
            count
        );
    }

    Ok(())
}

/// Boundary ids in the catalog must be unique and run BND-01..BND-nn without gaps.
fn check_scenario_ids() -> Result<()> {
    let root = project_root()?;
    let catalog = std::fs::read_to_string(root.join("src/scenario/catalog.rs"))
        .context("Failed to read catalog.rs")?;

    // Tests below the cfg(test) line may mention ids freely.
    let body = catalog.split("#[cfg(test)]").next().unwrap_or("");

    let mut seen = BTreeSet::new();
    for (_, rest) in body.match_indices("\"BND-").map(|(i, _)| body.split_at(i + 5)) {
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        let number: u32 = digits
            .parse()
            .with_context(|| format!("Malformed scenario id near BND-{}", digits))?;
        if !seen.insert(number) {
            bail!("Duplicate scenario id BND-{:02}", number);
        }
    }

    if seen.is_empty() {
        bail!("No boundary scenario ids found in catalog.rs");
    }
    let expected: BTreeSet<u32> = (1..=seen.len() as u32).collect();
    if seen != expected {
        let missing: Vec<String> = expected
            .difference(&seen)
            .map(|n| format!("BND-{:02}", n))
            .collect();
        bail!("Scenario ids have gaps: missing {}", missing.join(", "));
    }

    println!("  {} boundary scenarios", seen.len());
    Ok(())
}
