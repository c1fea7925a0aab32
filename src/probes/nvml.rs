//! NVML adapter for the [`GpuRuntime`] port
//!
//! Wraps `nvml-wrapper`, which loads libnvidia-ml at runtime; initialization
//! fails cleanly on machines without an NVIDIA driver.

use crate::domain::ports::{DeviceProperties, GpuRuntime};
use crate::error::Result;
use nvml_wrapper::enum_wrappers::device::Clock;
use nvml_wrapper::Nvml;
use tracing::debug;

/// Production GPU runtime backed by NVML
pub struct NvmlRuntime {
    nvml: Nvml,
}

impl NvmlRuntime {
    /// Initialize NVML; fails if no compatible driver is present
    pub fn init() -> Result<Self> {
        let nvml = Nvml::init()?;
        debug!("NVML initialized");
        Ok(Self { nvml })
    }
}

impl GpuRuntime for NvmlRuntime {
    fn device_count(&self) -> Result<u32> {
        Ok(self.nvml.device_count()?)
    }

    fn device_properties(&self, index: u32) -> Result<DeviceProperties> {
        let device = self.nvml.device_by_index(index)?;
        let name = device.name()?;
        // NVML reports the max memory clock in MHz; the report convention
        // (and the bandwidth formula) use kHz.
        let memory_clock_khz = device.max_clock_info(Clock::Memory)? as u64 * 1000;
        let memory_bus_width_bits = device.memory_bus_width()?;

        Ok(DeviceProperties {
            index,
            name,
            memory_clock_khz,
            memory_bus_width_bits,
        })
    }
}
