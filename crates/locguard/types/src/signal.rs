//! Raw location-subsystem signals read from the host OS.

use serde::{Deserialize, Serialize};

/// Location authorization granted to the calling application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationStatus {
    /// The user has not yet been asked.
    NotDetermined,
    /// Location access is restricted by policy (parental controls, MDM).
    Restricted,
    /// The user explicitly denied access.
    Denied,
    /// Authorized at all times, including in the background.
    AuthorizedAlways,
    /// Authorized only while the application is in use.
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    /// Whether this status permits the application to read location at all.
    pub fn is_authorized(self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedAlways | AuthorizationStatus::AuthorizedWhenInUse
        )
    }
}

impl std::fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorizationStatus::NotDetermined => write!(f, "notDetermined"),
            AuthorizationStatus::Restricted => write!(f, "restricted"),
            AuthorizationStatus::Denied => write!(f, "denied"),
            AuthorizationStatus::AuthorizedAlways => write!(f, "authorizedAlways"),
            AuthorizationStatus::AuthorizedWhenInUse => write!(f, "authorizedWhenInUse"),
        }
    }
}

/// Device form factor, as far as the reliability scorer cares about it.
///
/// Tablets legitimately lack a compass, so a missing heading sensor is
/// only suspicious on a phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFactor {
    Phone,
    Tablet,
}

impl FormFactor {
    /// Whether this form factor is expected to carry a compass.
    pub fn expects_heading_sensor(self) -> bool {
        matches!(self, FormFactor::Phone)
    }
}

/// Snapshot of the location subsystem's capabilities at evaluation time.
///
/// Captured once per evaluation by the signal provider; the reliability
/// scorer never re-reads the platform mid-scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityBundle {
    /// Whether location services are enabled device-wide.
    pub services_enabled: bool,

    /// Authorization granted to the calling application.
    pub authorization_status: AuthorizationStatus,

    /// Whether significant-location-change monitoring is available.
    pub significant_change_available: bool,

    /// Whether heading (compass) data is available.
    pub heading_available: bool,

    /// Whether region monitoring is available.
    pub region_monitoring_available: bool,

    /// Device form factor.
    pub form_factor: FormFactor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_predicate() {
        assert!(AuthorizationStatus::AuthorizedAlways.is_authorized());
        assert!(AuthorizationStatus::AuthorizedWhenInUse.is_authorized());
        assert!(!AuthorizationStatus::Denied.is_authorized());
        assert!(!AuthorizationStatus::Restricted.is_authorized());
        assert!(!AuthorizationStatus::NotDetermined.is_authorized());
    }

    #[test]
    fn test_form_factor_heading_expectation() {
        assert!(FormFactor::Phone.expects_heading_sensor());
        assert!(!FormFactor::Tablet.expects_heading_sensor());
    }
}
