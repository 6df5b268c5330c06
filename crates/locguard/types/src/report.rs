//! Verdicts returned to callers.
//!
//! All reports are assembled once per evaluation and never mutated
//! afterwards; a report never references signals from a prior call.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::probe::ProbeOutcome;
use crate::signal::{AuthorizationStatus, CapabilityBundle};

/// Verdict on the device's trusted-execution boundary (jailbreak/root).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityVerdict {
    /// True iff at least one probe outcome is `True`.
    pub compromised: bool,

    /// Name of the first positive probe, for diagnostics.
    pub matched_probe: Option<String>,

    /// Every probe outcome in evaluation order, failures included.
    pub probe_outcomes: Vec<ProbeOutcome>,
}

impl IntegrityVerdict {
    /// Derive the verdict from an ordered sequence of probe outcomes.
    ///
    /// `compromised` is true iff any outcome is `True`; a `Failed`
    /// outcome never counts as either clean or compromised.
    pub fn from_outcomes(probe_outcomes: Vec<ProbeOutcome>) -> Self {
        let matched_probe = probe_outcomes
            .iter()
            .find(|o| o.is_true())
            .map(|o| o.probe_name.clone());

        Self {
            compromised: matched_probe.is_some(),
            matched_probe,
            probe_outcomes,
        }
    }

    /// Number of probes that could not be completed.
    pub fn failed_probe_count(&self) -> usize {
        self.probe_outcomes
            .iter()
            .filter(|o| o.status.is_failed())
            .count()
    }
}

/// Known spoofing tools found present on the device.
///
/// An empty set means no signature matched, not "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpoofAppReport {
    /// Signature identifiers found on the device, in stable order.
    pub matches: BTreeSet<String>,
}

impl SpoofAppReport {
    pub fn is_clean(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Why the location subsystem was judged unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityReason {
    /// Location services are disabled device-wide; nothing to score.
    ServicesDisabled,
    /// One or more expected capabilities are missing.
    SuspiciousCapabilities,
    /// The application is not authorized to read location.
    NotAuthorized,
    /// The capability bundle could not be obtained from the platform.
    SignalUnavailable,
}

impl std::fmt::Display for ReliabilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReliabilityReason::ServicesDisabled => write!(f, "location services disabled"),
            ReliabilityReason::SuspiciousCapabilities => write!(f, "suspicious capabilities"),
            ReliabilityReason::NotAuthorized => write!(f, "not authorized"),
            ReliabilityReason::SignalUnavailable => write!(f, "capability bundle unavailable"),
        }
    }
}

/// Verdict on whether the location subsystem is behaving normally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationReliabilityReport {
    /// Authorization granted to the calling application.
    pub authorization_status: AuthorizationStatus,

    /// Whether location services are enabled device-wide.
    pub services_enabled: bool,

    /// Whether significant-location-change monitoring is available.
    pub significant_change_available: bool,

    /// Whether heading (compass) data is available.
    pub heading_available: bool,

    /// Whether region monitoring is available.
    pub region_monitoring_available: bool,

    /// Count of capabilities missing where they were expected.
    pub suspicious_count: u32,

    /// Overall reliability verdict.
    pub is_reliable: bool,

    /// Set whenever `is_reliable` is false.
    pub reason: Option<ReliabilityReason>,
}

impl LocationReliabilityReport {
    /// Report for a bundle that could not be obtained at all.
    pub fn unavailable() -> Self {
        Self {
            authorization_status: AuthorizationStatus::NotDetermined,
            services_enabled: false,
            significant_change_available: false,
            heading_available: false,
            region_monitoring_available: false,
            suspicious_count: 0,
            is_reliable: false,
            reason: Some(ReliabilityReason::SignalUnavailable),
        }
    }

    /// Copy the raw capability fields out of a bundle.
    pub fn echoing(bundle: &CapabilityBundle) -> Self {
        Self {
            authorization_status: bundle.authorization_status,
            services_enabled: bundle.services_enabled,
            significant_change_available: bundle.significant_change_available,
            heading_available: bundle.heading_available,
            region_monitoring_available: bundle.region_monitoring_available,
            suspicious_count: 0,
            is_reliable: false,
            reason: None,
        }
    }
}

/// Complete security report for one evaluation call.
///
/// Fully owned by the caller once returned; the engine retains no
/// reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityReport {
    /// Jailbreak/root verdict.
    pub integrity: IntegrityVerdict,

    /// Known spoofing tools found on the device.
    pub spoof_apps: SpoofAppReport,

    /// Location-subsystem reliability verdict.
    pub location: LocationReliabilityReport,

    /// Outcome of the mock-location flag check.
    pub mock_location: ProbeOutcome,

    /// When this report was generated.
    pub generated_at: DateTime<Utc>,
}

impl SecurityReport {
    /// Compose the component verdicts into one atomic report,
    /// stamping the generation time.
    pub fn compose(
        integrity: IntegrityVerdict,
        spoof_apps: SpoofAppReport,
        location: LocationReliabilityReport,
        mock_location: ProbeOutcome,
    ) -> Self {
        Self {
            integrity,
            spoof_apps,
            location,
            mock_location,
            generated_at: Utc::now(),
        }
    }

    /// Whether any component verdict indicates the reported location
    /// should not be trusted.
    pub fn any_flag_raised(&self) -> bool {
        self.integrity.compromised
            || !self.spoof_apps.is_clean()
            || !self.location.is_reliable
            || self.mock_location.is_true()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeStatus;

    #[test]
    fn test_verdict_from_outcomes_first_positive_wins() {
        let outcomes = vec![
            ProbeOutcome::negative("bash existence", 1),
            ProbeOutcome::positive("Cydia.app existence", 1),
            ProbeOutcome::positive("apt existence", 1),
        ];

        let verdict = IntegrityVerdict::from_outcomes(outcomes);
        assert!(verdict.compromised);
        assert_eq!(verdict.matched_probe.as_deref(), Some("Cydia.app existence"));
        assert_eq!(verdict.probe_outcomes.len(), 3);
    }

    #[test]
    fn test_verdict_failures_do_not_compromise() {
        let outcomes = vec![
            ProbeOutcome::negative("bash existence", 1),
            ProbeOutcome::failed("apt existence", "permission denied", 1),
        ];

        let verdict = IntegrityVerdict::from_outcomes(outcomes);
        assert!(!verdict.compromised);
        assert_eq!(verdict.matched_probe, None);
        assert_eq!(verdict.failed_probe_count(), 1);
    }

    #[test]
    fn test_report_round_trips_as_plain_json() {
        let report = SecurityReport::compose(
            IntegrityVerdict::from_outcomes(vec![ProbeOutcome::negative("bash existence", 1)]),
            SpoofAppReport::default(),
            LocationReliabilityReport::unavailable(),
            ProbeOutcome::failed("mock location flag", "unsupported", 0),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.is_object());

        let back: SecurityReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_any_flag_raised() {
        let clean = SecurityReport::compose(
            IntegrityVerdict::from_outcomes(vec![ProbeOutcome::negative("bash existence", 1)]),
            SpoofAppReport::default(),
            LocationReliabilityReport {
                is_reliable: true,
                reason: None,
                ..LocationReliabilityReport::unavailable()
            },
            ProbeOutcome::negative("mock location flag", 0),
        );
        assert!(!clean.any_flag_raised());

        let mut flagged = clean.clone();
        flagged.mock_location = ProbeOutcome::positive("mock location flag", 0);
        assert!(flagged.any_flag_raised());
    }

    #[test]
    fn test_unavailable_report_is_never_reliable() {
        let report = LocationReliabilityReport::unavailable();
        assert!(!report.is_reliable);
        assert_eq!(report.reason, Some(ReliabilityReason::SignalUnavailable));
        assert!(ProbeStatus::Failed("x".into()).is_failed());
    }
}
