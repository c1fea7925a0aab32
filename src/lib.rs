//! fleetbench - Fleet-wide hardware bandwidth benchmarking
//!
//! Measures raw hardware throughput per GPU SKU across a fleet of machines:
//! sequential storage read/write bandwidth against a local directory and a
//! mounted volume, plus theoretical GPU memory bandwidth derived from device
//! clock rate and bus width.
//!
//! # Modules
//!
//! - [`collector`]: per-machine report collection
//! - [`dispatch`]: per-profile fleet dispatch and the local broker adapter
//! - [`domain`]: report types and the GPU-runtime/dispatcher trait ports
//! - [`error`]: error types and handling
//! - [`probes`]: storage and GPU bandwidth probes, NVML adapter

pub mod collector;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod probes;

// Re-export commonly used types
pub use collector::{CollectorConfig, HardwareCollector};

pub use dispatch::{FleetRunner, LocalDispatcher, ProfileReport, DEFAULT_GPU_SKUS};

pub use domain::ports::{
    BenchTask, DeviceProperties, Dispatcher, DispatcherRef, GpuRuntime, GpuRuntimeRef, GpuSpec,
    HardwareProfile, HardwareReport, SectionOutcome, SsdSpec, StorageTarget,
};

pub use error::{Error, Result};

pub use probes::{
    bandwidth_gbps, theoretical_bandwidth_gbps, GpuReporter, NvmlRuntime, StorageProbe,
    StorageProbeConfig,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
