//! GPU Bandwidth Reporter
//!
//! Enumerates devices through the [`GpuRuntime`] port and reports the
//! theoretical peak memory bandwidth of each one.

use crate::domain::ports::{GpuRuntimeRef, GpuSpec};
use crate::error::Result;
use tracing::info;

/// Theoretical peak memory bandwidth in GB/s
///
/// Bandwidth (GB/s) = (clock_khz * bus_width_bits * 2) / (8 * 1e6).
/// The factor of 2 accounts for DDR transferring on both clock edges.
pub fn theoretical_bandwidth_gbps(memory_clock_khz: u64, memory_bus_width_bits: u32) -> f64 {
    (memory_clock_khz as f64 * memory_bus_width_bits as f64 * 2.0) / (8.0 * 1e6)
}

/// Reports GPU specs for every device the runtime can see
pub struct GpuReporter {
    runtime: GpuRuntimeRef,
}

impl GpuReporter {
    pub fn new(runtime: GpuRuntimeRef) -> Self {
        Self { runtime }
    }

    /// Build one [`GpuSpec`] per enumerated device
    ///
    /// Zero devices is a valid, empty report. Enumeration or property-query
    /// failures abort the whole report.
    pub fn report(&self) -> Result<Vec<GpuSpec>> {
        let device_count = self.runtime.device_count()?;
        let mut specs = Vec::with_capacity(device_count as usize);

        for index in 0..device_count {
            let props = self.runtime.device_properties(index)?;
            let spec = GpuSpec {
                device_id: props.index,
                gpu_name: props.name,
                theoretical_bandwidth_gbps: theoretical_bandwidth_gbps(
                    props.memory_clock_khz,
                    props.memory_bus_width_bits,
                ),
                memory_clock_khz: props.memory_clock_khz,
                memory_bus_width_bits: props.memory_bus_width_bits,
            };
            info!(
                device_id = spec.device_id,
                gpu = %spec.gpu_name,
                theoretical_bandwidth_gbps = spec.theoretical_bandwidth_gbps,
                "enumerated GPU"
            );
            specs.push(spec);
        }

        Ok(specs)
    }
}
