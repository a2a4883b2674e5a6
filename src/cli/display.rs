// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for matchprobe reports.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `MATCHPROBE_THEME` first, then `COLORFGBG`, then macOS system appearance,
//! then defaults to dark. `NO_COLOR` and non-TTY stdout turn colors off so the
//! report stays greppable in CI logs.
//!
//! Everything here writes to stdout. Diagnostics go through `tracing` on
//! stderr and never interleave with the report table.

use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::Duration;

use matchprobe::client::RawResponse;
use matchprobe::error::Outcome;
use matchprobe::executor::{RunSummary, ScenarioReport};
use matchprobe::request::SearchRequest;
use matchprobe::scenario::Scenario;

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 96;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("MATCHPROBE_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", bg 7+ (except 8) is a light background
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.contains("Dark") && output.status.success() {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors on only for a TTY, and never with `NO_COLOR` set.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, ignoring ANSI escapes
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut plain text to `max` characters, marking the cut with …
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset,
        content,
        " ".repeat(pad),
        border,
        reset
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        reset,
        label_part,
        border,
        "─".repeat(remaining),
        reset
    );
}

/// └──────────────────┘
pub fn section_bot() {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), reset);
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Fixed-width outcome badge
pub fn outcome_badge(outcome: &Outcome) -> String {
    let text = format!("[{:<8}]", outcome.label());
    match outcome {
        Outcome::Passed { .. } => themed(GREEN, &[BOLD], &text),
        Outcome::Rejected { .. } => themed(BLUE, &[BOLD], &text),
        Outcome::Violated(_) => themed(RED, &[BOLD], &text),
        Outcome::Infrastructure(_) => themed(YELLOW, &[BOLD], &text),
    }
}

/// Elapsed time, green under a second, yellow under ten, red beyond
pub fn timing(elapsed: Duration) -> String {
    let ms = elapsed.as_secs_f64() * 1000.0;
    let text = format!("{:>9.1}ms", ms);
    if ms < 1000.0 {
        themed(GREEN, &[], &text)
    } else if ms < 10_000.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(RED, &[], &text)
    }
}

fn status_cell(report: &ScenarioReport) -> String {
    match report.status {
        Some(status) => format!("{} → {}", report.expected_status, status),
        None => format!("{} → ---", report.expected_status),
    }
}

fn report_line(report: &ScenarioReport) -> String {
    format!(
        " {} {} {} {} {}",
        outcome_badge(&report.outcome),
        pad_right(&themed(BRIGHT_CYAN, &[], &report.id), 9),
        pad_right(&status_cell(report), 11),
        timing(report.elapsed),
        truncate(&report.description, 48),
    )
}

fn detail_line(outcome: &Outcome) -> Option<String> {
    let detail = match outcome {
        Outcome::Violated(v) => v.to_string(),
        Outcome::Infrastructure(e) => e.to_string(),
        _ => return None,
    };
    Some(themed(
        GRAY,
        &[DIM],
        &format!("            ↳ {}", truncate(&detail, BOX_WIDTH - 16)),
    ))
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

/// Table of every scenario plus the summary line.
pub fn print_report(summary: &RunSummary) {
    section_top("SCENARIOS");
    for report in &summary.reports {
        row(&report_line(report));
        if let Some(detail) = detail_line(&report.outcome) {
            row(&detail);
        }
    }
    section_bot();
    println!();
    println!("{}", summary_line(summary));
}

pub fn summary_line(summary: &RunSummary) -> String {
    let icon = match summary.exit_code() {
        0 => "✅",
        1 => "❌",
        _ => "⚠️",
    };
    format!(
        "{} {} scenarios: {} passed, {} violated, {} infrastructure ({:.1}s)",
        icon,
        summary.total(),
        themed(GREEN, &[BOLD], &summary.passed().to_string()),
        themed(RED, &[BOLD], &summary.violations().to_string()),
        themed(YELLOW, &[BOLD], &summary.infrastructure_failures().to_string()),
        summary.elapsed.as_secs_f64(),
    )
}

fn outcome_json(outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Passed { status } | Outcome::Rejected { status } => {
            json!({ "result": outcome.label(), "status": status })
        }
        Outcome::Violated(v) => json!({ "result": outcome.label(), "detail": v.to_string() }),
        Outcome::Infrastructure(e) => json!({ "result": outcome.label(), "detail": e.to_string() }),
    }
}

/// Machine-readable form of the run, for `--json`.
pub fn report_json(summary: &RunSummary) -> Value {
    let scenarios: Vec<Value> = summary
        .reports
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "description": r.description,
                "class": r.class,
                "expectedStatus": r.expected_status,
                "status": r.status,
                "attempts": r.attempts,
                "elapsedMs": r.elapsed.as_millis() as u64,
                "outcome": outcome_json(&r.outcome),
            })
        })
        .collect();

    json!({
        "total": summary.total(),
        "passed": summary.passed(),
        "violations": summary.violations(),
        "infrastructure": summary.infrastructure_failures(),
        "elapsedMs": summary.elapsed.as_millis() as u64,
        "scenarios": scenarios,
    })
}

/// Catalog listing for `list`.
pub fn print_catalog(scenarios: &[Scenario]) {
    section_top("CATALOG");
    for s in scenarios {
        row(&catalog_line(s));
    }
    section_bot();
    println!("{} scenarios", scenarios.len());
}

/// One catalog row. Text is cut before it is colored so escapes stay whole.
fn catalog_line(s: &Scenario) -> String {
    let checks = if s.checks.is_empty() {
        String::new()
    } else {
        let names: Vec<String> = s.checks.iter().map(|c| c.to_string()).collect();
        let plain = truncate(&format!(" [{}]", names.join("; ")), 28);
        themed(GRAY, &[DIM], &plain)
    };
    format!(
        " {} {} {} {}{}",
        pad_right(&themed(BRIGHT_CYAN, &[], &s.id), 9),
        pad_right(&s.class.to_string(), 9),
        s.expected_status,
        truncate(&s.description, 40),
        checks,
    )
}

/// Request and raw answer for `probe`.
pub fn print_probe(request: &SearchRequest, response: &RawResponse) {
    section_top("REQUEST");
    row(&format!(" POST {} endpoint", request.kind));
    println!("{}", pretty(&request.to_json()));
    section_top("RESPONSE");
    row(&format!(
        " status {}  {}",
        response.status,
        timing(response.elapsed)
    ));
    match serde_json::from_str::<Value>(&response.body) {
        Ok(body) => println!("{}", pretty(&body)),
        Err(_) => println!("{}", response.body),
    }
    section_bot();
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
