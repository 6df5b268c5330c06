//! # locguard Provider - Signal Acquisition Interface
//!
//! The engine never talks to the host platform directly. All raw facts
//! (mock-location flag, filesystem artifacts, URL-scheme resolvability,
//! installed applications, location capabilities) come through the
//! [`SignalProvider`] trait, injected into the engine at construction.
//!
//! This keeps per-platform acquisition out of the decision logic and
//! makes every verdict reproducible against a scripted provider.
//!
//! ## Provided implementations
//!
//! - [`HostSignalProvider`]: answers the filesystem and shell probes
//!   with std facilities; signals that need a mobile OS bridge are
//!   reported as [`SignalError::Unsupported`].
//! - `ScriptedSignalProvider` (behind the `test-utils` feature): a
//!   fully in-memory provider with invocation counters, for
//!   deterministic tests.

pub mod error;
pub mod host;
#[cfg(any(test, feature = "test-utils"))]
pub mod scripted;

pub use error::{SignalError, SignalResult};
pub use host::HostSignalProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedSignalProvider;

use std::collections::BTreeSet;

use async_trait::async_trait;
use locguard_types::CapabilityBundle;

/// Raw OS-level facts, obtained fresh on every call.
///
/// Implementations must be observational: apart from the write probe's
/// internal write+delete, no method may change device state. Every
/// method may fail; the engine records failures distinctly rather than
/// treating them as clean results.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    /// Whether the OS-level mock-location developer setting is enabled.
    async fn is_mock_location_flag_set(&self) -> SignalResult<bool>;

    /// Whether `path` exists on the device filesystem.
    async fn path_exists(&self, path: &str) -> SignalResult<bool>;

    /// Whether this process can write into a directory normally
    /// restricted to the OS. Performs the write and the delete
    /// internally; the path must not exist after the call returns,
    /// whatever the result.
    async fn can_write_restricted_path(&self, path: &str) -> SignalResult<bool>;

    /// Whether this process can execute an arbitrary system command.
    async fn can_execute_shell_command(&self) -> SignalResult<bool>;

    /// Whether `scheme` resolves to a launchable application.
    async fn can_resolve_url_scheme(&self, scheme: &str) -> SignalResult<bool>;

    /// Identifiers of installed non-system applications.
    ///
    /// Platforms that do not permit enumeration return
    /// [`SignalError::Unsupported`]; the detector falls back to its
    /// probe strategy.
    async fn list_non_system_applications(&self) -> SignalResult<BTreeSet<String>>;

    /// Snapshot of the location subsystem's capabilities.
    async fn location_capabilities(&self) -> SignalResult<CapabilityBundle>;
}
