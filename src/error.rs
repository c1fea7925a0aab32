//! Error types for fleetbench
//!
//! Provides structured error types for the storage probe, GPU reporter,
//! and fleet dispatch layers.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for the benchmarker
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Storage Probe Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Measurement too fast to resolve: {bytes} bytes in {elapsed:?}")]
    MeasurementTooFast { bytes: u64, elapsed: Duration },

    // =========================================================================
    // GPU Runtime Errors
    // =========================================================================
    #[error("GPU runtime error: {0}")]
    Gpu(#[from] nvml_wrapper::error::NvmlError),

    // =========================================================================
    // Dispatch Errors
    // =========================================================================
    #[error("Dispatch failed for profile {profile}: {reason}")]
    Dispatch { profile: String, reason: String },
}

impl Error {
    /// Check whether this error came out of the hardware under test, as
    /// opposed to bad configuration or the dispatch plumbing.
    pub fn is_hardware(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Gpu(_) | Error::MeasurementTooFast { .. }
        )
    }
}

/// Result type alias for the benchmarker
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MeasurementTooFast {
            bytes: 1024,
            elapsed: Duration::from_nanos(10),
        };
        assert!(err.to_string().contains("1024 bytes"));

        let err = Error::Dispatch {
            profile: "L4".into(),
            reason: "worker gone".into(),
        };
        assert_eq!(
            err.to_string(),
            "Dispatch failed for profile L4: worker gone"
        );
    }

    #[test]
    fn test_error_classification() {
        let io = Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such path",
        ));
        assert!(io.is_hardware());

        let config = Error::Configuration("block size must be non-zero".into());
        assert!(!config.is_hardware());

        let dispatch = Error::Dispatch {
            profile: "A100".into(),
            reason: "broker unavailable".into(),
        };
        assert!(!dispatch.is_hardware());
    }
}
