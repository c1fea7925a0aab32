//! Local dispatch adapter
//!
//! Runs benchmark tasks in-process on a blocking worker thread. The GPU SKU
//! of the profile is advisory here: placement is a broker concern, and the
//! local broker only has the machine it runs on.

use crate::domain::ports::{BenchTask, Dispatcher, HardwareProfile, HardwareReport};
use crate::error::{Error, Result};
use async_trait::async_trait;
use tracing::debug;

/// In-process dispatcher
#[derive(Debug, Default)]
pub struct LocalDispatcher;

impl LocalDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Dispatcher for LocalDispatcher {
    async fn run(&self, profile: &HardwareProfile, task: BenchTask) -> Result<HardwareReport> {
        debug!(profile = %profile, "running benchmark task in-process");

        // The probes block on disk and driver calls for minutes at the
        // default sizes; keep them off the async runtime threads.
        let joined = tokio::task::spawn_blocking(move || task()).await;

        match joined {
            Ok(result) => result,
            Err(e) => Err(Error::Dispatch {
                profile: profile.name.clone(),
                reason: format!("benchmark task panicked: {e}"),
            }),
        }
    }

    fn broker_name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::SectionOutcome;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn empty_report() -> HardwareReport {
        HardwareReport {
            hostname: "test".into(),
            gpu: SectionOutcome::Ok(Vec::new()),
            storage: SectionOutcome::Ok(Vec::new()),
            collected_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_runs_task_and_returns_report() {
        let dispatcher = LocalDispatcher::new();
        let profile = HardwareProfile::gpu("L4");

        let report = dispatcher
            .run(&profile, Box::new(|| Ok(empty_report())))
            .await
            .unwrap();
        assert_eq!(report.hostname, "test");
    }

    #[tokio::test]
    async fn test_task_error_propagates() {
        let dispatcher = LocalDispatcher::new();
        let profile = HardwareProfile::cpu_only("storage-box");

        let result = dispatcher
            .run(
                &profile,
                Box::new(|| Err(Error::Configuration("bad sizing".into()))),
            )
            .await;
        assert_matches!(result, Err(Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_task_panic_becomes_dispatch_error() {
        let dispatcher = LocalDispatcher::new();
        let profile = HardwareProfile::gpu("A100");

        let result = dispatcher
            .run(&profile, Box::new(|| panic!("probe blew up")))
            .await;
        assert_matches!(result, Err(Error::Dispatch { .. }));
    }
}
