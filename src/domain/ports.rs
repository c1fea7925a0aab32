//! Domain Ports - Core types and trait definitions for fleetbench
//!
//! These traits define the boundaries between the benchmarking logic and
//! external systems (GPU runtime, dispatch broker). Adapters implement them
//! to provide concrete functionality.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Storage Targets
// =============================================================================

/// Storage paths probed on every benchmarked machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageTarget {
    /// The process's working directory, usually container-local SSD
    LocalDisk,
    /// The shared volume mount point
    MountedVolume,
}

impl std::fmt::Display for StorageTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageTarget::LocalDisk => write!(f, "local-disk"),
            StorageTarget::MountedVolume => write!(f, "mounted-volume"),
        }
    }
}

// =============================================================================
// Report Types
// =============================================================================

/// Per-device GPU memory bandwidth report
///
/// `theoretical_bandwidth_gbps` is always derived from the clock rate and
/// bus width, never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuSpec {
    /// Device index as enumerated by the runtime
    pub device_id: u32,
    /// Device name (e.g., "NVIDIA L4")
    pub gpu_name: String,
    /// Theoretical peak memory bandwidth in GB/s
    pub theoretical_bandwidth_gbps: f64,
    /// Memory clock rate in kHz
    pub memory_clock_khz: u64,
    /// Memory bus width in bits
    pub memory_bus_width_bits: u32,
}

/// Measured sequential bandwidth for one storage target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsdSpec {
    /// Which path was probed
    pub target: StorageTarget,
    /// Sequential read bandwidth in GB/s
    pub read_bandwidth_gbps: f64,
    /// Sequential write bandwidth in GB/s (durable flush included)
    pub write_bandwidth_gbps: f64,
}

/// Tagged outcome of one report section
///
/// The GPU and storage halves of a report fail independently: a missing
/// driver on a storage-only box must not erase valid storage numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum SectionOutcome<T> {
    Ok(T),
    Failed(String),
}

impl<T> SectionOutcome<T> {
    /// Capture a fallible section result, stringifying the failure
    pub fn capture(result: Result<T>) -> Self {
        match result {
            Ok(value) => SectionOutcome::Ok(value),
            Err(e) => SectionOutcome::Failed(e.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SectionOutcome::Ok(_))
    }

    pub fn as_ok(&self) -> Option<&T> {
        match self {
            SectionOutcome::Ok(value) => Some(value),
            SectionOutcome::Failed(_) => None,
        }
    }
}

/// Aggregate hardware report for one machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareReport {
    /// Hostname of the probed machine
    pub hostname: String,
    /// GPU section: one spec per enumerated device
    pub gpu: SectionOutcome<Vec<GpuSpec>>,
    /// Storage section: one spec per probed target
    pub storage: SectionOutcome<Vec<SsdSpec>>,
    /// Collection timestamp
    pub collected_at: DateTime<Utc>,
}

impl HardwareReport {
    /// Whether both sections produced data
    pub fn is_complete(&self) -> bool {
        self.gpu.is_ok() && self.storage.is_ok()
    }
}

// =============================================================================
// Hardware Profiles
// =============================================================================

/// A named hardware target for fleet dispatch
///
/// `gpu_sku` is the broker-side accelerator identifier; `None` selects a
/// CPU-only/storage box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HardwareProfile {
    /// Profile name, used in logs and report keys
    pub name: String,
    /// GPU SKU requested from the broker, if any
    pub gpu_sku: Option<String>,
}

impl HardwareProfile {
    /// Profile backed by a GPU SKU; the profile name is the SKU itself
    pub fn gpu(sku: impl Into<String>) -> Self {
        let sku = sku.into();
        Self {
            name: sku.clone(),
            gpu_sku: Some(sku),
        }
    }

    /// CPU-only profile
    pub fn cpu_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gpu_sku: None,
        }
    }
}

impl std::fmt::Display for HardwareProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// GPU Runtime Port
// =============================================================================

/// Fixed property record returned by the GPU runtime for one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProperties {
    /// Device index
    pub index: u32,
    /// Device name
    pub name: String,
    /// Memory clock rate in kHz
    pub memory_clock_khz: u64,
    /// Memory bus width in bits
    pub memory_bus_width_bits: u32,
}

/// Port for GPU device enumeration and property queries
///
/// The production adapter wraps NVML; tests substitute an in-memory fake.
pub trait GpuRuntime: Send + Sync {
    /// Number of devices visible to the runtime
    fn device_count(&self) -> Result<u32>;

    /// Property record for the device at `index`
    fn device_properties(&self, index: u32) -> Result<DeviceProperties>;
}

// =============================================================================
// Dispatcher Port
// =============================================================================

/// A benchmark task handed to a dispatch broker
///
/// Deliberately blocking: the probes time synchronous I/O and device calls.
pub type BenchTask = Box<dyn FnOnce() -> Result<HardwareReport> + Send + 'static>;

/// Port for running a benchmark task on a target hardware profile
///
/// Mapping profile names to broker-specific resource requests happens inside
/// the adapter, never in the benchmarking core.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Run `task` on a machine matching `profile`, returning its report
    async fn run(&self, profile: &HardwareProfile, task: BenchTask) -> Result<HardwareReport>;

    /// Broker name, for logs
    fn broker_name(&self) -> &str;
}

// =============================================================================
// Type Aliases for Arc'd Traits
// =============================================================================

pub type GpuRuntimeRef = Arc<dyn GpuRuntime>;
pub type DispatcherRef = Arc<dyn Dispatcher>;
