//! Probe runner.
//!
//! Executes one named boolean check with a bounded timeout and converts
//! every failure mode into a typed outcome. An error or timeout is
//! never mapped to `False`: that would conflate "verified clean" with
//! "could not verify" and understate risk.

use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use locguard_provider::SignalResult;
use locguard_types::ProbeOutcome;
use tracing::{debug, warn};

/// Reason recorded for probes skipped because the overall evaluation
/// deadline elapsed before they could run.
pub const DEADLINE_ELAPSED_REASON: &str = "evaluation deadline elapsed";

/// The check a probe performs against the signal provider.
pub type ProbeCheck<'a> = Box<dyn Fn() -> BoxFuture<'a, SignalResult<bool>> + Send + Sync + 'a>;

/// One named boolean check with a bounded timeout.
///
/// Identity is the name. Probes are created at evaluation time and
/// discarded after execution; they hold no state beyond the check.
pub struct Probe<'a> {
    name: String,
    timeout: Duration,
    check: ProbeCheck<'a>,
}

impl<'a> Probe<'a> {
    pub fn new(name: impl Into<String>, timeout: Duration, check: ProbeCheck<'a>) -> Self {
        Self {
            name: name.into(),
            timeout,
            check,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outcome recorded when this probe is skipped under a lapsed
    /// evaluation deadline. Skipped probes are never silently omitted.
    pub fn deadline_outcome(&self) -> ProbeOutcome {
        ProbeOutcome::failed(self.name.as_str(), DEADLINE_ELAPSED_REASON, 0)
    }
}

impl std::fmt::Debug for Probe<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Probe")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Executes probes against the signal provider.
///
/// Purely observational: the runner has no state and no side effects
/// beyond invoking the probe's check.
#[derive(Debug, Default)]
pub struct ProbeRunner;

impl ProbeRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run one probe to a typed outcome.
    ///
    /// An in-time `Ok(bool)` maps to `True`/`False` verbatim; any
    /// error or timeout maps to `Failed(reason)`.
    pub async fn run(&self, probe: &Probe<'_>) -> ProbeOutcome {
        let start = Instant::now();
        let result = tokio::time::timeout(probe.timeout, (probe.check)()).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(true)) => {
                debug!(probe = %probe.name, latency_ms, "Probe positive");
                ProbeOutcome::positive(probe.name.as_str(), latency_ms)
            }
            Ok(Ok(false)) => {
                debug!(probe = %probe.name, latency_ms, "Probe negative");
                ProbeOutcome::negative(probe.name.as_str(), latency_ms)
            }
            Ok(Err(e)) => {
                warn!(probe = %probe.name, error = %e, "Probe failed");
                ProbeOutcome::failed(probe.name.as_str(), e.to_string(), latency_ms)
            }
            Err(_) => {
                warn!(probe = %probe.name, timeout_ms = probe.timeout.as_millis() as u64, "Probe timed out");
                ProbeOutcome::failed(
                    probe.name.as_str(),
                    format!("timed out after {}ms", probe.timeout.as_millis()),
                    latency_ms,
                )
            }
        }
    }
}
