//! Hardware Report Collector
//!
//! Runs the storage probes (local disk, then mounted volume) followed by the
//! GPU report, strictly in sequence, and assembles one [`HardwareReport`].
//! Each half is captured independently so a missing GPU driver does not erase
//! valid storage numbers, and vice versa.

use crate::domain::ports::{
    GpuRuntimeRef, GpuSpec, HardwareReport, SectionOutcome, SsdSpec, StorageTarget,
};
use crate::error::Result;
use crate::probes::gpu::GpuReporter;
use crate::probes::nvml::NvmlRuntime;
use crate::probes::storage::{StorageProbe, StorageProbeConfig};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

// =============================================================================
// Collector Configuration
// =============================================================================

/// Configuration for one hardware collection run
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Local probe directory; `None` uses the current working directory
    pub local_path: Option<PathBuf>,
    /// Mounted volume probe directory
    pub volume_path: PathBuf,
    /// Storage probe sizing
    pub storage: StorageProbeConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            local_path: None,
            volume_path: PathBuf::from("/mnt/storage"),
            storage: StorageProbeConfig::default(),
        }
    }
}

// =============================================================================
// Hardware Collector
// =============================================================================

/// Collects the full hardware report for the local machine
pub struct HardwareCollector {
    config: CollectorConfig,
    /// Override for the GPU runtime; `None` initializes NVML lazily
    gpu_runtime: Option<GpuRuntimeRef>,
}

impl HardwareCollector {
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            config,
            gpu_runtime: None,
        }
    }

    /// Substitute the GPU runtime, for tests and non-NVIDIA machines
    pub fn with_gpu_runtime(mut self, runtime: GpuRuntimeRef) -> Self {
        self.gpu_runtime = Some(runtime);
        self
    }

    /// Run both probe halves and assemble the report
    ///
    /// Never fails as a whole: each section carries its own outcome.
    pub fn collect(&self) -> HardwareReport {
        let hostname = hostname();
        info!(hostname = %hostname, "collecting hardware report");

        let storage = SectionOutcome::capture(self.collect_storage());
        if let SectionOutcome::Failed(reason) = &storage {
            warn!(reason = %reason, "storage section failed");
        }

        let gpu = SectionOutcome::capture(self.collect_gpu());
        if let SectionOutcome::Failed(reason) = &gpu {
            warn!(reason = %reason, "GPU section failed");
        }

        HardwareReport {
            hostname,
            gpu,
            storage,
            collected_at: Utc::now(),
        }
    }

    fn collect_storage(&self) -> Result<Vec<SsdSpec>> {
        let probe = StorageProbe::new(self.config.storage.clone())?;

        let local_path = match &self.config.local_path {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };

        let mut specs = Vec::with_capacity(2);
        for (target, path) in [
            (StorageTarget::LocalDisk, &local_path),
            (StorageTarget::MountedVolume, &self.config.volume_path),
        ] {
            let spec = probe.probe(target, path)?;
            info!(
                target = %target,
                write_gbps = spec.write_bandwidth_gbps,
                read_gbps = spec.read_bandwidth_gbps,
                "storage probe finished"
            );
            specs.push(spec);
        }

        Ok(specs)
    }

    fn collect_gpu(&self) -> Result<Vec<GpuSpec>> {
        let runtime = match &self.gpu_runtime {
            Some(runtime) => Arc::clone(runtime),
            None => Arc::new(NvmlRuntime::init()?) as GpuRuntimeRef,
        };
        GpuReporter::new(runtime).report()
    }
}

/// Hostname of the local machine
fn hostname() -> String {
    if let Ok(name) = fs::read_to_string("/etc/hostname") {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    #[cfg(unix)]
    {
        use std::process::Command;
        if let Ok(output) = Command::new("hostname").output() {
            if output.status.success() {
                return String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
        }
    }

    "unknown".to_string()
}
