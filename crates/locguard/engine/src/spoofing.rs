//! Spoof application detector.
//!
//! Finds known GPS-spoofing tools without elevated permissions, using
//! whichever strategies the platform supports:
//!
//! - **Enumeration**: intersect the installed non-system identifier
//!   set with the package-id signatures.
//! - **Probe**: ask the provider whether each scheme/name signature is
//!   resolvable.
//!
//! The report is the union of all strategy matches. A platform that
//! supports neither strategy yields an empty report.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use futures::FutureExt;
use locguard_provider::SignalProvider;
use locguard_types::SpoofAppReport;
use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::registry::SignatureRegistry;
use crate::runner::{Probe, ProbeRunner};

/// Matches the spoof-signature registry against one signal provider.
pub struct SpoofAppDetector<'a> {
    provider: &'a dyn SignalProvider,
    registry: &'a SignatureRegistry,
    runner: ProbeRunner,
    probe_timeout: Duration,
}

impl<'a> SpoofAppDetector<'a> {
    pub fn new(
        provider: &'a dyn SignalProvider,
        registry: &'a SignatureRegistry,
        config: &EngineConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            runner: ProbeRunner::new(),
            probe_timeout: config.probe_timeout,
        }
    }

    /// Run every supported strategy and return the union of matches.
    #[instrument(skip(self, deadline))]
    pub async fn detect(&self, deadline: Instant) -> SpoofAppReport {
        let mut matches = BTreeSet::new();

        self.detect_by_enumeration(&mut matches).await;
        self.detect_by_probing(&mut matches, deadline).await;

        SpoofAppReport { matches }
    }

    /// Enumeration strategy: installed set against package-id
    /// signatures.
    async fn detect_by_enumeration(&self, matches: &mut BTreeSet<String>) {
        match self.provider.list_non_system_applications().await {
            Ok(installed) => {
                for signature in self.registry.package_ids() {
                    if installed.contains(&signature.identifier) {
                        matches.insert(signature.identifier.clone());
                    }
                }
            }
            Err(e) if e.is_unsupported() => {
                debug!("Application enumeration unsupported, relying on scheme probes");
            }
            Err(e) => {
                // Recoverable: the probe strategy can still match.
                warn!(error = %e, "Application enumeration failed");
            }
        }
    }

    /// Probe strategy: one resolvability probe per scheme/name
    /// signature.
    async fn detect_by_probing(&self, matches: &mut BTreeSet<String>, deadline: Instant) {
        let provider = self.provider;

        for signature in self.registry.probeable() {
            if Instant::now() >= deadline {
                warn!(
                    identifier = %signature.identifier,
                    "Evaluation deadline elapsed, remaining scheme probes skipped"
                );
                break;
            }

            let identifier = signature.identifier.clone();
            let probe = Probe::new(
                format!("{} resolvable", signature.identifier),
                self.probe_timeout,
                Box::new(move || {
                    let identifier = identifier.clone();
                    async move { provider.can_resolve_url_scheme(&identifier).await }.boxed()
                }),
            );

            if self.runner.run(&probe).await.is_true() {
                matches.insert(signature.identifier.clone());
            }
        }
    }
}
