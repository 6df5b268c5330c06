//! Scripted in-memory signal provider for deterministic tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use locguard_types::CapabilityBundle;

use crate::error::{SignalError, SignalResult};
use crate::SignalProvider;

/// A signal provider whose every answer is scripted up front.
///
/// Records which paths and schemes were actually probed, so tests can
/// assert short-circuit and idempotence properties by invocation
/// counting.
#[derive(Debug, Default)]
pub struct ScriptedSignalProvider {
    mock_location: Option<bool>,
    existing_paths: BTreeSet<String>,
    failing_paths: BTreeMap<String, String>,
    hanging_paths: BTreeSet<String>,
    restricted_writable: bool,
    shell_succeeds: bool,
    resolvable_schemes: BTreeSet<String>,
    installed_apps: Option<BTreeSet<String>>,
    capabilities: Option<CapabilityBundle>,

    probed_paths: Mutex<Vec<String>>,
    scheme_checks: AtomicUsize,
    write_checks: AtomicUsize,
    shell_checks: AtomicUsize,
}

impl ScriptedSignalProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the mock-location flag; unset means unsupported.
    pub fn with_mock_location(mut self, enabled: bool) -> Self {
        self.mock_location = Some(enabled);
        self
    }

    /// Script a path as existing.
    pub fn with_existing_path(mut self, path: impl Into<String>) -> Self {
        self.existing_paths.insert(path.into());
        self
    }

    /// Script a path whose existence check fails with `reason`.
    pub fn with_failing_path(
        mut self,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.failing_paths.insert(path.into(), reason.into());
        self
    }

    /// Script a path whose existence check never completes.
    pub fn with_hanging_path(mut self, path: impl Into<String>) -> Self {
        self.hanging_paths.insert(path.into());
        self
    }

    /// Script the restricted-path write probe.
    pub fn with_restricted_writable(mut self, writable: bool) -> Self {
        self.restricted_writable = writable;
        self
    }

    /// Script the shell-execution probe.
    pub fn with_shell_succeeds(mut self, succeeds: bool) -> Self {
        self.shell_succeeds = succeeds;
        self
    }

    /// Script a URL scheme as resolvable.
    pub fn with_resolvable_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.resolvable_schemes.insert(scheme.into());
        self
    }

    /// Script the installed non-system application set; unset means
    /// enumeration is unsupported.
    pub fn with_installed_apps<I, S>(mut self, apps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.installed_apps = Some(apps.into_iter().map(Into::into).collect());
        self
    }

    /// Script the location capability bundle; unset means unsupported.
    pub fn with_capabilities(mut self, bundle: CapabilityBundle) -> Self {
        self.capabilities = Some(bundle);
        self
    }

    /// Paths whose existence was checked, in order.
    pub fn probed_paths(&self) -> Vec<String> {
        self.probed_paths.lock().expect("probe log poisoned").clone()
    }

    /// Number of URL-scheme resolution checks performed.
    pub fn scheme_check_count(&self) -> usize {
        self.scheme_checks.load(Ordering::SeqCst)
    }

    /// Number of restricted-write probes performed.
    pub fn write_check_count(&self) -> usize {
        self.write_checks.load(Ordering::SeqCst)
    }

    /// Number of shell-execution probes performed.
    pub fn shell_check_count(&self) -> usize {
        self.shell_checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignalProvider for ScriptedSignalProvider {
    async fn is_mock_location_flag_set(&self) -> SignalResult<bool> {
        self.mock_location
            .ok_or(SignalError::Unsupported("mock-location flag"))
    }

    async fn path_exists(&self, path: &str) -> SignalResult<bool> {
        self.probed_paths
            .lock()
            .expect("probe log poisoned")
            .push(path.to_string());

        if self.hanging_paths.contains(path) {
            std::future::pending::<()>().await;
            unreachable!("pending future resolved");
        }
        if let Some(reason) = self.failing_paths.get(path) {
            return Err(SignalError::PermissionDenied(reason.clone()));
        }
        Ok(self.existing_paths.contains(path))
    }

    async fn can_write_restricted_path(&self, _path: &str) -> SignalResult<bool> {
        self.write_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.restricted_writable)
    }

    async fn can_execute_shell_command(&self) -> SignalResult<bool> {
        self.shell_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.shell_succeeds)
    }

    async fn can_resolve_url_scheme(&self, scheme: &str) -> SignalResult<bool> {
        self.scheme_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.resolvable_schemes.contains(scheme))
    }

    async fn list_non_system_applications(&self) -> SignalResult<BTreeSet<String>> {
        self.installed_apps
            .clone()
            .ok_or(SignalError::Unsupported("application enumeration"))
    }

    async fn location_capabilities(&self) -> SignalResult<CapabilityBundle> {
        self.capabilities
            .clone()
            .ok_or(SignalError::Unsupported("location capability bundle"))
    }
}
