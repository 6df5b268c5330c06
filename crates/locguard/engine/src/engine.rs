//! Security engine: one-shot evaluation and report aggregation.
//!
//! `evaluate` is the single inbound operation. All inputs come from the
//! injected signal provider at call time; the engine holds no state
//! across calls and retains no reference to a returned report.

use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use locguard_provider::SignalProvider;
use locguard_types::{LocationReliabilityReport, ProbeOutcome, SecurityReport};
use tracing::{info, instrument, warn};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::integrity::IntegrityEvaluator;
use crate::registry::{ArtifactRegistry, SignatureRegistry};
use crate::reliability::ReliabilityScorer;
use crate::runner::{Probe, ProbeRunner};
use crate::spoofing::SpoofAppDetector;

/// Stateless single-shot security evaluator.
pub struct SecurityEngine<P: SignalProvider> {
    provider: Arc<P>,
    config: EngineConfig,
    artifacts: ArtifactRegistry,
    signatures: SignatureRegistry,
}

impl<P: SignalProvider> SecurityEngine<P> {
    /// Create an engine with the built-in registries and default
    /// configuration.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            config: EngineConfig::default(),
            artifacts: ArtifactRegistry::builtin().clone(),
            signatures: SignatureRegistry::builtin().clone(),
        }
    }

    /// Create an engine with explicit configuration, loading registry
    /// override files when the config names them.
    pub fn with_config(provider: Arc<P>, config: EngineConfig) -> EngineResult<Self> {
        let artifacts = match &config.artifact_registry_path {
            Some(path) => ArtifactRegistry::from_path(path)?,
            None => ArtifactRegistry::builtin().clone(),
        };
        let signatures = match &config.signature_registry_path {
            Some(path) => SignatureRegistry::from_path(path)?,
            None => SignatureRegistry::builtin().clone(),
        };

        Ok(Self {
            provider,
            config,
            artifacts,
            signatures,
        })
    }

    /// Run one complete evaluation and aggregate the verdicts.
    ///
    /// Never fails on individual signal errors: a partial signal set is
    /// still actionable, so failures land in the report as `Failed`
    /// outcomes for the caller to weigh.
    #[instrument(skip(self))]
    pub async fn evaluate(&self) -> EngineResult<SecurityReport> {
        let deadline = Instant::now() + self.config.overall_deadline;
        let provider: &dyn SignalProvider = self.provider.as_ref();

        let mock_location = self.check_mock_location(provider, deadline).await;

        let integrity = IntegrityEvaluator::new(provider, &self.artifacts, &self.config)
            .evaluate(deadline)
            .await?;

        let spoof_apps = SpoofAppDetector::new(provider, &self.signatures, &self.config)
            .detect(deadline)
            .await;

        let location = match provider.location_capabilities().await {
            Ok(bundle) => ReliabilityScorer::score(&bundle),
            Err(e) => {
                warn!(error = %e, "Location capability bundle unavailable");
                LocationReliabilityReport::unavailable()
            }
        };

        let report = SecurityReport::compose(integrity, spoof_apps, location, mock_location);

        info!(
            compromised = report.integrity.compromised,
            spoof_matches = report.spoof_apps.matches.len(),
            location_reliable = report.location.is_reliable,
            mock_location = %report.mock_location.status,
            "Security evaluation complete"
        );

        Ok(report)
    }

    /// Run the mock-location flag check through the probe runner so
    /// errors become `Failed` outcomes rather than "flag off".
    async fn check_mock_location(
        &self,
        provider: &dyn SignalProvider,
        deadline: Instant,
    ) -> ProbeOutcome {
        let probe = Probe::new(
            "mock location flag",
            self.config.probe_timeout,
            Box::new(move || {
                async move { provider.is_mock_location_flag_set().await }.boxed()
            }),
        );

        if Instant::now() >= deadline {
            return probe.deadline_outcome();
        }
        ProbeRunner::new().run(&probe).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locguard_provider::ScriptedSignalProvider;
    use locguard_types::ProbeStatus;

    #[tokio::test]
    async fn test_mock_location_error_is_failed_not_clean() {
        // Provider with no scripted mock-location answer: the original
        // platform code collapsed this to "flag off"; the engine must
        // record it as a failure instead.
        let engine = SecurityEngine::new(Arc::new(ScriptedSignalProvider::new()));

        let report = engine.evaluate().await.unwrap();

        assert!(report.mock_location.status.is_failed());
        assert_ne!(report.mock_location.status, ProbeStatus::False);
    }

    #[tokio::test]
    async fn test_mock_location_flag_set() {
        let provider = ScriptedSignalProvider::new().with_mock_location(true);
        let engine = SecurityEngine::new(Arc::new(provider));

        let report = engine.evaluate().await.unwrap();

        assert_eq!(report.mock_location.status, ProbeStatus::True);
        assert!(report.any_flag_raised());
    }
}
