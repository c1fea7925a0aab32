//! Domain Module
//!
//! Core report types and the trait ports that isolate the benchmarking
//! logic from the GPU runtime and the dispatch broker.

pub mod ports;

pub use ports::*;
