//! Error types for the locguard engine.
//!
//! Individual signal failures are never surfaced here; they are
//! recorded as `Failed` probe outcomes inside the report. These errors
//! cover caller mistakes and registry loading only.

use thiserror::Error;

/// Errors that can occur while configuring or driving an evaluation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An evaluation was requested over an empty probe list. An empty
    /// input is a caller error, not a clean verdict.
    #[error("integrity evaluation requires at least one probe")]
    EmptyProbeSet,

    /// A registry override file could not be read.
    #[error("failed to read registry file {path}: {source}")]
    RegistryIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Registry data did not parse.
    #[error("malformed registry data: {0}")]
    RegistryFormat(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
