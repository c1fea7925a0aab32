//! Probes Module
//!
//! Hardware bandwidth probes: sequential storage I/O measurement and
//! theoretical GPU memory bandwidth reporting, plus the NVML adapter.

pub mod gpu;
pub mod nvml;
pub mod storage;

pub use gpu::*;
pub use nvml::*;
pub use storage::*;
