//! Quality fixtures loaded from disk and run end to end.

use super::common::StubService;
use matchprobe::scenario::load_fixtures;
use matchprobe::{
    run_scenarios, Catalog, ContractViolation, ExecutorOptions, Outcome, ScenarioClass,
    ServiceClient,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_fixtures(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("quality.json");
    fs::write(&path, json).unwrap();
    path
}

fn run_quality(stub: &StubService, catalog: &Catalog) -> matchprobe::RunSummary {
    let config = stub.config();
    let client = ServiceClient::new(&config).unwrap();
    let scenarios = catalog.select(Some(ScenarioClass::Quality), None);
    run_scenarios(&client, &scenarios, &ExecutorOptions::default(), 2)
}

#[test]
fn test_bundled_fixtures_parse() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/quality.json");
    let fixtures = load_fixtures(&path).unwrap();
    assert!(!fixtures.is_empty());
}

#[test]
fn test_fixtures_drive_quality_scenarios() {
    let dir = TempDir::new().unwrap();
    let path = write_fixtures(
        &dir,
        r#"[
            {"id": "QLT-10", "description": "board from text", "type": "text",
             "input": "Bamboo Cutting Board 18x12", "expectedProductMatches": 1,
             "productTerms": ["cutting", "board"], "minPercentage": 40,
             "expectedInternalMatches": 2},
            {"id": "QLT-11", "description": "board from url", "type": "url",
             "input": "https://shop.example.com/p/cutting-board-walnut",
             "expectedProductMatches": 1, "productTerms": ["walnut", "board"],
             "minPercentage": 40}
        ]"#,
    );

    let stub = StubService::conforming();
    let catalog = Catalog::with_fixtures(load_fixtures(&path).unwrap());
    let summary = run_quality(&stub, &catalog);

    assert_eq!(summary.total(), 2);
    for report in &summary.reports {
        assert!(report.outcome.is_pass(), "{}: {:?}", report.id, report.outcome);
    }
}

#[test]
fn test_quality_floor_violation_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_fixtures(
        &dir,
        r#"[{"id": "QLT-20", "description": "demanding floor", "type": "text",
             "input": "Cutting Board", "expectedProductMatches": 1,
             "productTerms": ["board"], "minPercentage": 70}]"#,
    );

    let stub = StubService::conforming();
    let catalog = Catalog::with_fixtures(load_fixtures(&path).unwrap());
    let summary = run_quality(&stub, &catalog);

    match &summary.reports[0].outcome {
        Outcome::Violated(ContractViolation::ScoreBelowMinimum {
            percentage,
            minimum,
            ..
        }) => {
            assert_eq!(*percentage, 64.0);
            assert_eq!(*minimum, 70.0);
        }
        other => panic!("expected a score floor violation, got {:?}", other),
    }
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_fixtures(
        &dir,
        r#"[
            {"id": "Q", "description": "a", "type": "text", "input": "x",
             "expectedProductMatches": 1, "productTerms": ["x"], "minPercentage": 0},
            {"id": "Q", "description": "b", "type": "text", "input": "y",
             "expectedProductMatches": 1, "productTerms": ["y"], "minPercentage": 0}
        ]"#,
    );
    let err = load_fixtures(&path).unwrap_err();
    assert!(err.contains("duplicate"));
}

#[test]
fn test_zero_match_fixture_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_fixtures(
        &dir,
        r#"[{"id": "QLT-30", "description": "nothing relevant", "type": "text",
             "input": "garden hose", "expectedProductMatches": 0,
             "productTerms": ["hose"], "minPercentage": 90}]"#,
    );
    let err = load_fixtures(&path).unwrap_err();
    assert!(err.contains("QLT-30"), "{}", err);
    assert!(err.contains("quality.json"), "{}", err);
}

#[test]
fn test_missing_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    let err = load_fixtures(&path).unwrap_err();
    assert!(err.contains("absent.json"));
}
