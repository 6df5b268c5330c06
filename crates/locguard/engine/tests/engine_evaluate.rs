//! End-to-end evaluation scenarios against a scripted signal provider.

use std::sync::Arc;
use std::time::Duration;

use locguard_engine::{
    EngineConfig, ProbeStatus, SecurityEngine, DEADLINE_ELAPSED_REASON,
};
use locguard_provider::ScriptedSignalProvider;
use locguard_types::{AuthorizationStatus, CapabilityBundle, FormFactor, ReliabilityReason};

fn phone_bundle() -> CapabilityBundle {
    CapabilityBundle {
        services_enabled: true,
        authorization_status: AuthorizationStatus::AuthorizedWhenInUse,
        significant_change_available: true,
        heading_available: true,
        region_monitoring_available: true,
        form_factor: FormFactor::Phone,
    }
}

#[tokio::test]
async fn clean_device_produces_clean_report() {
    // No jailbreak artifacts, no write access, shell execution refused.
    let provider = ScriptedSignalProvider::new()
        .with_mock_location(false)
        .with_installed_apps(["com.whatsapp"])
        .with_capabilities(phone_bundle());
    let engine = SecurityEngine::new(Arc::new(provider));

    let report = engine.evaluate().await.unwrap();

    assert!(!report.integrity.compromised);
    assert!(report
        .integrity
        .probe_outcomes
        .iter()
        .all(|o| o.status == ProbeStatus::False));
    assert!(report.spoof_apps.is_clean());
    assert!(report.location.is_reliable);
    assert_eq!(report.mock_location.status, ProbeStatus::False);
    assert!(!report.any_flag_raised());
}

#[tokio::test]
async fn cydia_artifact_short_circuits_integrity() {
    let provider = ScriptedSignalProvider::new()
        .with_mock_location(false)
        .with_existing_path("/Applications/Cydia.app")
        .with_capabilities(phone_bundle());
    let engine = SecurityEngine::new(Arc::new(provider));

    let report = engine.evaluate().await.unwrap();

    assert!(report.integrity.compromised);
    assert_eq!(
        report.integrity.matched_probe.as_deref(),
        Some("Cydia.app existence")
    );
    // Only the matching probe ran; nothing after it in the fixed order.
    assert_eq!(report.integrity.probe_outcomes.len(), 1);
}

#[tokio::test]
async fn registry_package_matches_installed_set() {
    let provider = ScriptedSignalProvider::new()
        .with_mock_location(false)
        .with_installed_apps(["com.lexa.fakegps", "com.whatsapp"])
        .with_capabilities(phone_bundle());
    let engine = SecurityEngine::new(Arc::new(provider));

    let report = engine.evaluate().await.unwrap();

    assert_eq!(
        report
            .spoof_apps
            .matches
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        vec!["com.lexa.fakegps"]
    );
}

#[tokio::test]
async fn missing_significant_change_on_phone_is_unreliable() {
    let bundle = CapabilityBundle {
        significant_change_available: false,
        ..phone_bundle()
    };
    let provider = ScriptedSignalProvider::new()
        .with_mock_location(false)
        .with_capabilities(bundle);
    let engine = SecurityEngine::new(Arc::new(provider));

    let report = engine.evaluate().await.unwrap();

    assert_eq!(report.location.suspicious_count, 1);
    assert!(!report.location.is_reliable);
    assert_eq!(
        report.location.reason,
        Some(ReliabilityReason::SuspiciousCapabilities)
    );
}

#[tokio::test]
async fn probe_failure_is_recorded_and_evaluation_continues() {
    // The first registry artifact check is denied; a later one matches.
    let provider = ScriptedSignalProvider::new()
        .with_mock_location(false)
        .with_failing_path("/Applications/Cydia.app", "permission denied")
        .with_existing_path("/bin/bash")
        .with_capabilities(phone_bundle());
    let engine = SecurityEngine::new(Arc::new(provider));

    let report = engine.evaluate().await.unwrap();

    assert!(report.integrity.compromised);
    assert_eq!(report.integrity.matched_probe.as_deref(), Some("bash existence"));
    assert!(report.integrity.probe_outcomes[0].status.is_failed());
    assert_eq!(report.integrity.failed_probe_count(), 1);
}

#[tokio::test]
async fn services_disabled_short_circuits_scoring() {
    let bundle = CapabilityBundle {
        services_enabled: false,
        ..phone_bundle()
    };
    let provider = ScriptedSignalProvider::new()
        .with_mock_location(false)
        .with_capabilities(bundle);
    let engine = SecurityEngine::new(Arc::new(provider));

    let report = engine.evaluate().await.unwrap();

    assert!(!report.location.is_reliable);
    assert_eq!(report.location.reason, Some(ReliabilityReason::ServicesDisabled));
    assert_eq!(report.location.suspicious_count, 0);
}

#[tokio::test]
async fn lapsed_deadline_returns_partial_report_with_failed_probes() {
    let provider = ScriptedSignalProvider::new()
        .with_mock_location(false)
        .with_capabilities(phone_bundle());
    let config = EngineConfig {
        overall_deadline: Duration::ZERO,
        ..EngineConfig::default()
    };
    let engine = SecurityEngine::with_config(Arc::new(provider), config).unwrap();

    let report = engine.evaluate().await.unwrap();

    // Unfinished probes are marked failed, never silently omitted.
    assert!(!report.integrity.probe_outcomes.is_empty());
    for outcome in &report.integrity.probe_outcomes {
        assert_eq!(
            outcome.status,
            ProbeStatus::Failed(DEADLINE_ELAPSED_REASON.to_string())
        );
    }
    assert!(!report.integrity.compromised);
    assert_eq!(
        report.mock_location.status,
        ProbeStatus::Failed(DEADLINE_ELAPSED_REASON.to_string())
    );
}

#[tokio::test]
async fn hung_probe_times_out_without_blocking_evaluation() {
    let provider = ScriptedSignalProvider::new()
        .with_mock_location(false)
        .with_hanging_path("/Applications/Cydia.app")
        .with_existing_path("/bin/bash")
        .with_capabilities(phone_bundle());
    let config = EngineConfig {
        probe_timeout: Duration::from_millis(50),
        ..EngineConfig::default()
    };
    let engine = SecurityEngine::with_config(Arc::new(provider), config).unwrap();

    let report = engine.evaluate().await.unwrap();

    match &report.integrity.probe_outcomes[0].status {
        ProbeStatus::Failed(reason) => assert!(reason.contains("timed out")),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert!(report.integrity.compromised);
    assert_eq!(report.integrity.matched_probe.as_deref(), Some("bash existence"));
}

#[tokio::test]
async fn evaluation_is_stateless_across_calls() {
    let provider = ScriptedSignalProvider::new()
        .with_mock_location(true)
        .with_installed_apps(["com.lexa.fakegps"])
        .with_capabilities(phone_bundle());
    let engine = SecurityEngine::new(Arc::new(provider));

    let first = engine.evaluate().await.unwrap();
    let second = engine.evaluate().await.unwrap();

    assert_eq!(first.integrity, second.integrity);
    assert_eq!(first.spoof_apps, second.spoof_apps);
    assert_eq!(first.location, second.location);
    assert_eq!(first.mock_location, second.mock_location);
    // Only the timestamp differs between otherwise identical reports.
    assert!(second.generated_at >= first.generated_at);
}
