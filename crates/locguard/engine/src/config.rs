//! Engine configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for one security evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeout applied to each individual probe. A hung filesystem or
    /// settings call must not block the whole evaluation.
    pub probe_timeout: Duration,

    /// Overall deadline for one `evaluate` call. Probes not yet run
    /// when it elapses are recorded as failed, never omitted.
    pub overall_deadline: Duration,

    /// Path used by the restricted-write capability probe. Must point
    /// into a directory the OS normally forbids writing to.
    pub restricted_write_path: String,

    /// Optional override for the jailbreak-artifact registry.
    pub artifact_registry_path: Option<PathBuf>,

    /// Optional override for the spoof-signature registry.
    pub signature_registry_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(2),
            overall_deadline: Duration::from_secs(20),
            restricted_write_path: "/private/.locguard-write-probe".to_string(),
            artifact_registry_path: None,
            signature_registry_path: None,
        }
    }
}
