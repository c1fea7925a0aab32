//! Dispatch Module
//!
//! Runs the hardware collection once per target hardware profile through a
//! broker-agnostic [`Dispatcher`](crate::domain::ports::Dispatcher) port.

pub mod fleet;
pub mod local;

pub use fleet::*;
pub use local::*;
