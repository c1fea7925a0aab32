//! Fleet Runner
//!
//! Dispatches one hardware collection per profile and gathers the results.
//! Failure isolation is per profile: a broken SKU is logged and the rest of
//! the fleet still runs.

use crate::collector::{CollectorConfig, HardwareCollector};
use crate::domain::ports::{
    BenchTask, DispatcherRef, HardwareProfile, HardwareReport, SectionOutcome,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// GPU SKUs benchmarked by default
pub const DEFAULT_GPU_SKUS: &[&str] = &["a10g", "L4", "A10", "A100", "A100-40GB", "L40S"];

/// Outcome of one profile's benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub profile: HardwareProfile,
    pub outcome: SectionOutcome<HardwareReport>,
}

/// Runs the whole fleet through a dispatch broker
pub struct FleetRunner {
    dispatcher: DispatcherRef,
    profiles: Vec<HardwareProfile>,
    collector_config: CollectorConfig,
}

impl FleetRunner {
    pub fn new(
        dispatcher: DispatcherRef,
        profiles: Vec<HardwareProfile>,
        collector_config: CollectorConfig,
    ) -> Self {
        Self {
            dispatcher,
            profiles,
            collector_config,
        }
    }

    /// Default fleet: one profile per default GPU SKU
    pub fn default_profiles() -> Vec<HardwareProfile> {
        DEFAULT_GPU_SKUS
            .iter()
            .map(|sku| HardwareProfile::gpu(*sku))
            .collect()
    }

    /// Run every profile in sequence, collecting per-profile outcomes
    pub async fn run(&self) -> Vec<ProfileReport> {
        let mut results = Vec::with_capacity(self.profiles.len());

        for profile in &self.profiles {
            info!(
                profile = %profile,
                broker = self.dispatcher.broker_name(),
                "dispatching hardware benchmark"
            );

            let config = self.collector_config.clone();
            let task: BenchTask = Box::new(move || Ok(HardwareCollector::new(config).collect()));

            let outcome = match self.dispatcher.run(profile, task).await {
                Ok(report) => {
                    info!(
                        profile = %profile,
                        hostname = %report.hostname,
                        complete = report.is_complete(),
                        "benchmark finished"
                    );
                    SectionOutcome::Ok(report)
                }
                Err(e) => {
                    error!(profile = %profile, error = %e, "benchmark failed");
                    SectionOutcome::Failed(e.to_string())
                }
            };

            results.push(ProfileReport {
                profile: profile.clone(),
                outcome,
            });
        }

        results
    }
}
