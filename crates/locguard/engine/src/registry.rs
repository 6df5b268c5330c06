//! Detection registries.
//!
//! Both registries are versioned data tables, not code: the built-in
//! tables are embedded JSON, and either can be replaced by an external
//! file so new entries ship without a rebuild. Loaded once per process.
//!
//! The artifact table is curated against files common on legitimate
//! devices: a single false-positive entry marks the whole device
//! compromised.

use std::path::Path;
use std::sync::OnceLock;

use locguard_types::{SignatureKind, SpoofSignature};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One known jailbreak/root artifact path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JailbreakArtifact {
    /// Short human-readable label, used to name the probe.
    pub label: String,

    /// Absolute path whose existence indicates compromise.
    pub path: String,
}

/// Registry of known jailbreak/root artifacts, in probe order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRegistry {
    pub version: u32,
    artifacts: Vec<JailbreakArtifact>,
}

impl ArtifactRegistry {
    /// The built-in table, parsed once per process.
    pub fn builtin() -> &'static ArtifactRegistry {
        static REGISTRY: OnceLock<ArtifactRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            serde_json::from_str(include_str!("../data/jailbreak_artifacts.json"))
                .expect("embedded artifact registry is valid JSON")
        })
    }

    /// Load a replacement table from an external file.
    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::RegistryIo {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Artifacts in evaluation order.
    pub fn artifacts(&self) -> &[JailbreakArtifact] {
        &self.artifacts
    }
}

/// Registry of known spoofing-tool signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRegistry {
    pub version: u32,
    signatures: Vec<SpoofSignature>,
}

impl SignatureRegistry {
    /// The built-in table, parsed once per process.
    pub fn builtin() -> &'static SignatureRegistry {
        static REGISTRY: OnceLock<SignatureRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            serde_json::from_str(include_str!("../data/spoof_signatures.json"))
                .expect("embedded signature registry is valid JSON")
        })
    }

    /// Load a replacement table from an external file.
    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::RegistryIo {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// All signatures.
    pub fn signatures(&self) -> &[SpoofSignature] {
        &self.signatures
    }

    /// Signatures matched by intersecting the installed-package set.
    pub fn package_ids(&self) -> impl Iterator<Item = &SpoofSignature> {
        self.signatures
            .iter()
            .filter(|s| s.kind == SignatureKind::PackageId)
    }

    /// Signatures matched by probing scheme/name resolvability.
    pub fn probeable(&self) -> impl Iterator<Item = &SpoofSignature> {
        self.signatures
            .iter()
            .filter(|s| matches!(s.kind, SignatureKind::UrlScheme | SignatureKind::AppName))
    }
}
