//! Probe outcome types.
//!
//! A probe is one named boolean check against the host platform. Its
//! outcome keeps "we checked and it's clean" (`False`) strictly apart
//! from "we could not check" (`Failed`): collapsing the two would let a
//! broken or blocked probe masquerade as a clean device.

use serde::{Deserialize, Serialize};

/// Result of evaluating a single probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum ProbeStatus {
    /// The condition the probe tests for is present.
    True,
    /// The condition was checked and is absent.
    False,
    /// The probe could not be completed; carries the reason.
    Failed(String),
}

impl ProbeStatus {
    pub fn is_true(&self) -> bool {
        matches!(self, ProbeStatus::True)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ProbeStatus::Failed(_))
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeStatus::True => write!(f, "true"),
            ProbeStatus::False => write!(f, "false"),
            ProbeStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Outcome of one probe execution, retained for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Name of the probe that was executed.
    pub probe_name: String,

    /// What the probe determined.
    pub status: ProbeStatus,

    /// Wall-clock latency of the probe in milliseconds.
    pub latency_ms: u64,
}

impl ProbeOutcome {
    /// Create an outcome for a probe whose condition is present.
    pub fn positive(probe_name: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            probe_name: probe_name.into(),
            status: ProbeStatus::True,
            latency_ms,
        }
    }

    /// Create an outcome for a probe whose condition is absent.
    pub fn negative(probe_name: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            probe_name: probe_name.into(),
            status: ProbeStatus::False,
            latency_ms,
        }
    }

    /// Create an outcome for a probe that could not be completed.
    pub fn failed(
        probe_name: impl Into<String>,
        reason: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            probe_name: probe_name.into(),
            status: ProbeStatus::Failed(reason.into()),
            latency_ms,
        }
    }

    pub fn is_true(&self) -> bool {
        self.status.is_true()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_is_not_false() {
        let failed = ProbeOutcome::failed("apt existence", "permission denied", 3);
        let clean = ProbeOutcome::negative("apt existence", 3);

        assert!(failed.status.is_failed());
        assert!(!failed.is_true());
        assert_ne!(failed.status, clean.status);
    }

    #[test]
    fn test_status_serialization_keeps_reason() {
        let outcome = ProbeOutcome::failed("sshd existence", "timed out after 2000ms", 2000);
        let json = serde_json::to_string(&outcome).unwrap();

        assert!(json.contains("failed"));
        assert!(json.contains("timed out after 2000ms"));

        let back: ProbeOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
