//! # locguard Types - Signal and Verdict Types for Device-Trust Evaluation
//!
//! This crate defines the data model shared by the locguard engine and
//! its signal providers:
//!
//! - **Signals**: raw facts read from the host OS at evaluation time
//!   ([`CapabilityBundle`], [`AuthorizationStatus`], [`FormFactor`])
//! - **Probe outcomes**: the result of one bounded boolean check
//!   ([`ProbeOutcome`], [`ProbeStatus`]) — a failed check is a distinct
//!   value, never coerced to "clean"
//! - **Signatures**: known spoofing-tool identifiers ([`SpoofSignature`])
//! - **Verdicts**: the structured results returned to callers
//!   ([`IntegrityVerdict`], [`SpoofAppReport`],
//!   [`LocationReliabilityReport`], [`SecurityReport`])
//!
//! Every type here is immutable once constructed and serializable to a
//! plain key-value structure, so a report can cross a host bridge
//! without opaque handles.

pub mod probe;
pub mod report;
pub mod signal;
pub mod signature;

pub use probe::{ProbeOutcome, ProbeStatus};
pub use report::{
    IntegrityVerdict, LocationReliabilityReport, ReliabilityReason, SecurityReport,
    SpoofAppReport,
};
pub use signal::{AuthorizationStatus, CapabilityBundle, FormFactor};
pub use signature::{SignatureKind, SpoofSignature};
