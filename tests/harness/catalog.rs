//! The whole built-in catalog against conforming and misbehaving services.

use super::common::{Behaviour, StubService};
use matchprobe::{
    run_scenarios, Catalog, ContractViolation, ExecutorOptions, Outcome, ScenarioClass,
    ServiceClient,
};

fn run_catalog(stub: &StubService, options: &ExecutorOptions) -> matchprobe::RunSummary {
    let config = stub.config();
    let client = ServiceClient::new(&config).unwrap();
    let catalog = Catalog::builtin();
    run_scenarios(&client, catalog.scenarios(), options, 8)
}

#[test]
fn test_conforming_service_passes_everything() {
    let stub = StubService::conforming();
    let summary = run_catalog(&stub, &ExecutorOptions::default());

    for report in &summary.reports {
        assert!(
            report.outcome.is_pass(),
            "{} {}: {:?}",
            report.id,
            report.description,
            report.outcome
        );
    }
    assert_eq!(summary.total(), Catalog::builtin().len());
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(stub.served(), summary.total());
}

#[test]
fn test_rejections_are_reported_as_rejected() {
    let stub = StubService::conforming();
    let summary = run_catalog(&stub, &ExecutorOptions::default());

    let rejected = summary
        .reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Rejected { status: 400 }))
        .count();
    let expected = Catalog::builtin()
        .scenarios()
        .iter()
        .filter(|s| s.expected_status == 400)
        .count();
    assert_eq!(rejected, expected);
}

#[test]
fn test_lenient_service_never_slips_through() {
    let stub = StubService::start(Behaviour::AcceptsEverything);
    let summary = run_catalog(&stub, &ExecutorOptions::default());

    for report in &summary.reports {
        if report.expected_status == 400 {
            assert!(
                matches!(
                    report.outcome,
                    Outcome::Violated(ContractViolation::UnexpectedStatus {
                        expected: 400,
                        actual: 200,
                        ..
                    })
                ),
                "{} passed against a lenient service",
                report.id
            );
        }
    }
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn test_out_of_range_scores_are_caught() {
    let stub = StubService::start(Behaviour::ScaledScores(2.0));
    let summary = run_catalog(&stub, &ExecutorOptions::default());

    let quality = summary
        .reports
        .iter()
        .find(|r| r.class == ScenarioClass::Quality)
        .unwrap();
    match &quality.outcome {
        Outcome::Violated(ContractViolation::ScoreOutOfBounds { percentage, .. }) => {
            assert!(*percentage > 100.0)
        }
        other => panic!("expected score bound violation, got {:?}", other),
    }

    // Zero-match boundary scenarios are vacuously within bounds.
    let symbols = summary.reports.iter().find(|r| r.id == "BND-02").unwrap();
    assert!(symbols.outcome.is_pass());
}

#[test]
fn test_html_body_is_a_shape_violation() {
    let stub = StubService::start(Behaviour::HtmlBody);
    let summary = run_catalog(&stub, &ExecutorOptions::default());

    let quality = summary
        .reports
        .iter()
        .find(|r| r.class == ScenarioClass::Quality)
        .unwrap();
    assert!(matches!(
        quality.outcome,
        Outcome::Violated(ContractViolation::MalformedBody { .. })
    ));
}

#[test]
fn test_idempotence_probe_against_conforming_service() {
    let stub = StubService::conforming();
    let options = ExecutorOptions {
        check_idempotence: true,
        ..ExecutorOptions::default()
    };
    let summary = run_catalog(&stub, &options);

    assert_eq!(summary.exit_code(), 0);
    assert_eq!(stub.served(), 2 * summary.total());
}
