//! # locguard Engine - Signal Aggregation and Verdict Computation
//!
//! This crate takes a set of independently-obtained, possibly
//! unreliable signals from a [`SignalProvider`] and combines them into
//! structured, auditable verdicts: is the device's integrity
//! compromised, is a known spoofing tool present, is the location
//! subsystem behaving normally.
//!
//! ## Key Components
//!
//! - [`SecurityEngine`]: the single inbound operation,
//!   `evaluate() -> SecurityReport`
//! - [`ProbeRunner`]: one bounded boolean check, failure kept distinct
//!   from a clean result
//! - [`IntegrityEvaluator`]: jailbreak/root probes, OR with early exit
//! - [`SpoofAppDetector`]: signature registry against the installed
//!   and resolvable application set
//! - [`ReliabilityScorer`]: capability bundle to suspicion count
//! - [`ArtifactRegistry`] / [`SignatureRegistry`]: versioned data
//!   tables, embedded defaults with file overrides
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use locguard_engine::SecurityEngine;
//! use locguard_provider::HostSignalProvider;
//!
//! # async fn example() {
//! let engine = SecurityEngine::new(Arc::new(HostSignalProvider::new()));
//! let report = engine.evaluate().await.unwrap();
//! println!("compromised: {}", report.integrity.compromised);
//! # }
//! ```
//!
//! ## Failure Policy
//!
//! No individual signal failure aborts an evaluation. A probe that
//! errors or times out is recorded as `Failed(reason)` in the report;
//! callers inspect failed entries themselves to decide how much to
//! trust a `compromised = false` verdict.

pub mod config;
pub mod engine;
pub mod error;
pub mod integrity;
pub mod registry;
pub mod reliability;
pub mod runner;
pub mod spoofing;

pub use config::EngineConfig;
pub use engine::SecurityEngine;
pub use error::{EngineError, EngineResult};
pub use integrity::IntegrityEvaluator;
pub use registry::{ArtifactRegistry, JailbreakArtifact, SignatureRegistry};
pub use reliability::ReliabilityScorer;
pub use runner::{Probe, ProbeCheck, ProbeRunner, DEADLINE_ELAPSED_REASON};
pub use spoofing::SpoofAppDetector;

// Re-export the provider seam and the report types callers consume.
pub use locguard_provider::{SignalError, SignalProvider};
pub use locguard_types::{
    IntegrityVerdict, LocationReliabilityReport, ProbeOutcome, ProbeStatus, ReliabilityReason,
    SecurityReport, SpoofAppReport,
};
