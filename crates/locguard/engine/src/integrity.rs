//! Integrity evaluator.
//!
//! Decides whether the device's trusted-execution boundary is broken
//! (jailbreak/root), which undermines every other signal on the device.
//!
//! Probe order is fixed: existence probes over the artifact registry
//! first (cheap, side-effect free), then the capability probes
//! (restricted-path write, shell execution), which catch rebranded or
//! unlisted tools that leave no known artifact. Combination is logical
//! OR with early exit on the first positive.

use std::time::{Duration, Instant};

use futures::FutureExt;
use locguard_provider::SignalProvider;
use locguard_types::IntegrityVerdict;
use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::registry::ArtifactRegistry;
use crate::runner::{Probe, ProbeRunner};

/// Evaluates jailbreak/root probes against one signal provider.
pub struct IntegrityEvaluator<'a> {
    provider: &'a dyn SignalProvider,
    registry: &'a ArtifactRegistry,
    runner: ProbeRunner,
    probe_timeout: Duration,
    restricted_write_path: String,
}

impl<'a> IntegrityEvaluator<'a> {
    pub fn new(
        provider: &'a dyn SignalProvider,
        registry: &'a ArtifactRegistry,
        config: &EngineConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            runner: ProbeRunner::new(),
            probe_timeout: config.probe_timeout,
            restricted_write_path: config.restricted_write_path.clone(),
        }
    }

    /// Build the ordered probe list: one existence probe per registry
    /// artifact, then the two capability probes.
    fn build_probes(&self) -> Vec<Probe<'a>> {
        let provider = self.provider;
        let timeout = self.probe_timeout;
        let mut probes = Vec::with_capacity(self.registry.artifacts().len() + 2);

        for artifact in self.registry.artifacts() {
            let path = artifact.path.clone();
            probes.push(Probe::new(
                format!("{} existence", artifact.label),
                timeout,
                Box::new(move || {
                    let path = path.clone();
                    async move { provider.path_exists(&path).await }.boxed()
                }),
            ));
        }

        let write_path = self.restricted_write_path.clone();
        probes.push(Probe::new(
            "restricted path write",
            timeout,
            Box::new(move || {
                let path = write_path.clone();
                async move { provider.can_write_restricted_path(&path).await }.boxed()
            }),
        ));
        probes.push(Probe::new(
            "shell command execution",
            timeout,
            Box::new(move || {
                async move { provider.can_execute_shell_command().await }.boxed()
            }),
        ));

        probes
    }

    /// Evaluate the full registry-driven probe list.
    #[instrument(skip(self, deadline))]
    pub async fn evaluate(&self, deadline: Instant) -> EngineResult<IntegrityVerdict> {
        self.evaluate_probes(self.build_probes(), deadline).await
    }

    /// Evaluate an explicit ordered probe list.
    ///
    /// Sequential with early exit: the first `True` outcome stops
    /// further probing. When every outcome is `False` or `Failed`, the
    /// device is not marked compromised, but every outcome (failures
    /// included) is retained for audit. Probes not yet run when the
    /// deadline elapses are recorded as failed.
    pub async fn evaluate_probes(
        &self,
        probes: Vec<Probe<'a>>,
        deadline: Instant,
    ) -> EngineResult<IntegrityVerdict> {
        if probes.is_empty() {
            return Err(EngineError::EmptyProbeSet);
        }

        let mut outcomes = Vec::with_capacity(probes.len());
        for probe in &probes {
            if Instant::now() >= deadline {
                outcomes.push(probe.deadline_outcome());
                continue;
            }

            let outcome = self.runner.run(probe).await;
            let positive = outcome.is_true();
            outcomes.push(outcome);

            if positive {
                debug!(probe = probe.name(), "Integrity probe matched, short-circuiting");
                break;
            }
        }

        Ok(IntegrityVerdict::from_outcomes(outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locguard_provider::ScriptedSignalProvider;
    use locguard_types::ProbeStatus;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    #[tokio::test]
    async fn test_clean_device_keeps_every_outcome() {
        let provider = ScriptedSignalProvider::new();
        let registry = ArtifactRegistry::builtin();
        let evaluator = IntegrityEvaluator::new(&provider, registry, &config());

        let verdict = evaluator.evaluate(far_deadline()).await.unwrap();

        assert!(!verdict.compromised);
        assert_eq!(verdict.matched_probe, None);
        // Every artifact probe plus the two capability probes.
        assert_eq!(
            verdict.probe_outcomes.len(),
            registry.artifacts().len() + 2
        );
        assert!(verdict
            .probe_outcomes
            .iter()
            .all(|o| o.status == ProbeStatus::False));
    }

    #[tokio::test]
    async fn test_first_positive_short_circuits() {
        let provider =
            ScriptedSignalProvider::new().with_existing_path("/Applications/Cydia.app");
        let registry = ArtifactRegistry::builtin();
        let evaluator = IntegrityEvaluator::new(&provider, registry, &config());

        let verdict = evaluator.evaluate(far_deadline()).await.unwrap();

        assert!(verdict.compromised);
        assert_eq!(verdict.matched_probe.as_deref(), Some("Cydia.app existence"));
        assert_eq!(verdict.probe_outcomes.len(), 1);

        // No probe after the match was executed.
        assert_eq!(provider.probed_paths(), vec!["/Applications/Cydia.app"]);
        assert_eq!(provider.write_check_count(), 0);
        assert_eq!(provider.shell_check_count(), 0);
    }

    #[tokio::test]
    async fn test_capability_probes_catch_unlisted_tools() {
        let provider = ScriptedSignalProvider::new().with_restricted_writable(true);
        let registry = ArtifactRegistry::builtin();
        let evaluator = IntegrityEvaluator::new(&provider, registry, &config());

        let verdict = evaluator.evaluate(far_deadline()).await.unwrap();

        assert!(verdict.compromised);
        assert_eq!(verdict.matched_probe.as_deref(), Some("restricted path write"));
        // The shell probe comes after the write probe and must not run.
        assert_eq!(provider.shell_check_count(), 0);
    }

    #[tokio::test]
    async fn test_probe_failure_does_not_abort_evaluation() {
        let provider = ScriptedSignalProvider::new()
            .with_failing_path("/Applications/Cydia.app", "permission denied")
            .with_existing_path("/bin/bash");
        let registry = ArtifactRegistry::builtin();
        let evaluator = IntegrityEvaluator::new(&provider, registry, &config());

        let verdict = evaluator.evaluate(far_deadline()).await.unwrap();

        assert!(verdict.compromised);
        assert_eq!(verdict.matched_probe.as_deref(), Some("bash existence"));
        match &verdict.probe_outcomes[0].status {
            ProbeStatus::Failed(reason) => assert!(reason.contains("permission denied")),
            other => panic!("expected failed outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_probe_list_is_a_caller_error() {
        let provider = ScriptedSignalProvider::new();
        let registry = ArtifactRegistry::builtin();
        let evaluator = IntegrityEvaluator::new(&provider, registry, &config());

        let err = evaluator
            .evaluate_probes(Vec::new(), far_deadline())
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::EmptyProbeSet));
    }

    #[tokio::test]
    async fn test_lapsed_deadline_marks_remaining_probes_failed() {
        let provider = ScriptedSignalProvider::new();
        let registry = ArtifactRegistry::builtin();
        let evaluator = IntegrityEvaluator::new(&provider, registry, &config());

        let verdict = evaluator.evaluate(Instant::now()).await.unwrap();

        assert!(!verdict.compromised);
        assert_eq!(
            verdict.probe_outcomes.len(),
            registry.artifacts().len() + 2
        );
        assert!(verdict
            .probe_outcomes
            .iter()
            .all(|o| o.status.is_failed()));
        // Nothing actually reached the provider.
        assert!(provider.probed_paths().is_empty());
    }
}
