//! Location reliability scorer.
//!
//! Converts the capability bundle into a suspicion count and a
//! reliability verdict, as a secondary indicator beyond the
//! mock-location and jailbreak checks. On compromised devices parts of
//! the location subsystem are often degraded or disabled.

use locguard_types::{CapabilityBundle, LocationReliabilityReport, ReliabilityReason};
use tracing::debug;

/// Scores one capability bundle. Pure; reads nothing but the bundle.
#[derive(Debug, Default)]
pub struct ReliabilityScorer;

impl ReliabilityScorer {
    /// Produce the reliability verdict for a bundle.
    ///
    /// With services disabled there is nothing informative to score:
    /// the report short-circuits with an explicit `ServicesDisabled`
    /// reason and the count left at zero, rather than a sentinel value.
    ///
    /// Otherwise the count increments once per missing expected
    /// capability, and the verdict binds as
    /// `suspicious_count == 0 && (when_in_use || always)` — the strict
    /// reading; authorized-always alone does not make an otherwise
    /// suspicious subsystem reliable.
    pub fn score(bundle: &CapabilityBundle) -> LocationReliabilityReport {
        let mut report = LocationReliabilityReport::echoing(bundle);

        if !bundle.services_enabled {
            report.reason = Some(ReliabilityReason::ServicesDisabled);
            return report;
        }

        let mut suspicious_count = 0;

        // Expected available on capable hardware.
        if !bundle.significant_change_available {
            suspicious_count += 1;
        }

        // Tablets legitimately lack a compass; only penalize form
        // factors expected to carry one.
        if !bundle.heading_available && bundle.form_factor.expects_heading_sensor() {
            suspicious_count += 1;
        }

        let authorized = bundle.authorization_status.is_authorized();
        report.suspicious_count = suspicious_count;
        report.is_reliable = suspicious_count == 0 && authorized;
        report.reason = if report.is_reliable {
            None
        } else if suspicious_count > 0 {
            Some(ReliabilityReason::SuspiciousCapabilities)
        } else {
            Some(ReliabilityReason::NotAuthorized)
        };

        debug!(
            suspicious_count,
            is_reliable = report.is_reliable,
            authorization = %bundle.authorization_status,
            "Scored location capability bundle"
        );

        report
    }
}
