//! Host-process signal provider.
//!
//! Answers the probes that are expressible with std facilities:
//! filesystem existence, restricted-path write, shell execution.
//! Signals that require a mobile OS bridge (mock-location flag, URL
//! schemes, application enumeration, location capabilities) are
//! reported as [`SignalError::Unsupported`] so the engine can record
//! them distinctly instead of guessing.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use async_trait::async_trait;
use locguard_types::CapabilityBundle;
use tracing::debug;

use crate::error::{SignalError, SignalResult};
use crate::SignalProvider;

/// Signal provider backed by the host process's own capabilities.
#[derive(Debug, Default)]
pub struct HostSignalProvider;

impl HostSignalProvider {
    pub fn new() -> Self {
        Self
    }
}

/// Removes the probe file on every exit path, including panics.
///
/// The write probe must never leave residue: a crash between the write
/// and the delete would otherwise leave an artifact in a restricted
/// directory.
struct WriteCleanup<'a> {
    path: &'a Path,
}

impl Drop for WriteCleanup<'_> {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(self.path) {
            if e.kind() != ErrorKind::NotFound {
                debug!(path = %self.path.display(), error = %e, "Write-probe cleanup failed");
            }
        }
    }
}

#[async_trait]
impl SignalProvider for HostSignalProvider {
    async fn is_mock_location_flag_set(&self) -> SignalResult<bool> {
        Err(SignalError::Unsupported("mock-location flag"))
    }

    async fn path_exists(&self, path: &str) -> SignalResult<bool> {
        match fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                Err(SignalError::PermissionDenied(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn can_write_restricted_path(&self, path: &str) -> SignalResult<bool> {
        let path = Path::new(path);
        let _cleanup = WriteCleanup { path };

        match fs::write(path, b"locguard-write-probe") {
            Ok(()) => {
                debug!(path = %path.display(), "Restricted path accepted a write");
                Ok(true)
            }
            // A refused write is the normal answer on an intact device,
            // not an acquisition failure.
            Err(e) if matches!(e.kind(), ErrorKind::PermissionDenied | ErrorKind::NotFound) => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn can_execute_shell_command(&self) -> SignalResult<bool> {
        let status = Command::new("ls")
            .current_dir("/")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) => Ok(status.success()),
            // A sandboxed process typically cannot spawn at all.
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn can_resolve_url_scheme(&self, _scheme: &str) -> SignalResult<bool> {
        Err(SignalError::Unsupported("url-scheme resolution"))
    }

    async fn list_non_system_applications(&self) -> SignalResult<BTreeSet<String>> {
        Err(SignalError::Unsupported("application enumeration"))
    }

    async fn location_capabilities(&self) -> SignalResult<CapabilityBundle> {
        Err(SignalError::Unsupported("location capability bundle"))
    }
}
