//! Infrastructure failures stay distinct from contract violations.

use super::common::{dead_base_url, Behaviour, StubService, STUB_KEY};
use matchprobe::{
    execute, run_scenarios, Catalog, ExecutorOptions, HarnessConfig, InfrastructureFailure,
    Outcome, ServiceClient,
};
use std::time::Duration;

#[test]
fn test_unreachable_service_is_infrastructure_only() {
    let config = HarnessConfig::new(dead_base_url(), STUB_KEY);
    let client = ServiceClient::new(&config).unwrap();
    let catalog = Catalog::builtin();
    let summary = run_scenarios(&client, catalog.scenarios(), &ExecutorOptions::default(), 4);

    assert_eq!(summary.violations(), 0);
    assert_eq!(summary.infrastructure_failures(), summary.total());
    assert_eq!(summary.exit_code(), 2);
    for report in &summary.reports {
        assert_eq!(report.status, None);
        assert!(matches!(
            report.outcome,
            Outcome::Infrastructure(InfrastructureFailure::Connect { .. })
        ));
    }
}

#[test]
fn test_retry_once_on_connect_failure() {
    let mut config = HarnessConfig::new(dead_base_url(), STUB_KEY);
    config.retry_transient_once = true;
    let client = ServiceClient::new(&config).unwrap();
    let options = ExecutorOptions {
        retry_transient_once: config.retry_transient_once,
        ..ExecutorOptions::default()
    };

    let catalog = Catalog::builtin();
    let scenario = &catalog.scenarios()[0];
    let report = execute(&client, scenario, &options);
    assert_eq!(report.attempts, 2);
    assert!(matches!(report.outcome, Outcome::Infrastructure(_)));
}

#[test]
fn test_slow_service_exceeds_budget() {
    let stub = StubService::start(Behaviour::Slow(Duration::from_secs(3)));
    let mut config = stub.config();
    config.scenario_timeout = Duration::from_secs(1);
    let client = ServiceClient::new(&config).unwrap();

    let catalog = Catalog::builtin();
    let scenario = &catalog.scenarios()[0];
    let report = execute(&client, scenario, &ExecutorOptions::default());
    assert!(
        matches!(
            report.outcome,
            Outcome::Infrastructure(InfrastructureFailure::Timeout { budget_secs: 1, .. })
        ),
        "{:?}",
        report.outcome
    );
}

#[test]
fn test_timeout_is_not_retried() {
    let stub = StubService::start(Behaviour::Slow(Duration::from_secs(2)));
    let mut config = stub.config();
    config.scenario_timeout = Duration::from_secs(1);
    let client = ServiceClient::new(&config).unwrap();
    let options = ExecutorOptions {
        retry_transient_once: true,
        ..ExecutorOptions::default()
    };

    let catalog = Catalog::builtin();
    let report = execute(&client, &catalog.scenarios()[0], &options);
    assert!(matches!(
        report.outcome,
        Outcome::Infrastructure(InfrastructureFailure::Timeout { .. })
    ));
    assert_eq!(report.attempts, 1);
    assert!(report.elapsed < Duration::from_millis(1800), "{:?}", report.elapsed);
}

#[test]
fn test_budget_spans_idempotence_repeat() {
    // One answer fits in the budget, two do not.
    let stub = StubService::start(Behaviour::Slow(Duration::from_millis(700)));
    let mut config = stub.config();
    config.scenario_timeout = Duration::from_secs(1);
    let client = ServiceClient::new(&config).unwrap();
    let options = ExecutorOptions {
        check_idempotence: true,
        ..ExecutorOptions::default()
    };

    let catalog = Catalog::builtin();
    let report = execute(&client, &catalog.scenarios()[0], &options);
    assert!(
        matches!(
            report.outcome,
            Outcome::Infrastructure(InfrastructureFailure::Timeout { budget_secs: 1, .. })
        ),
        "{:?}",
        report.outcome
    );
    assert_eq!(report.attempts, 2);
    assert!(report.elapsed < Duration::from_millis(1300), "{:?}", report.elapsed);
}

#[test]
fn test_bad_credential_is_not_a_violation() {
    let stub = StubService::conforming();
    let config = HarnessConfig::new(stub.base_url.clone(), "wrong");
    let client = ServiceClient::new(&config).unwrap();
    let catalog = Catalog::builtin();
    let summary = run_scenarios(&client, catalog.scenarios(), &ExecutorOptions::default(), 4);

    assert_eq!(summary.violations(), 0);
    assert_eq!(summary.exit_code(), 2);
}
