//! Storage Bandwidth Probe
//!
//! Measures sequential write and read bandwidth against a target directory,
//! dd-style: zero-filled fixed-size blocks, a durable flush before the write
//! timer stops, then a sequential read of the same file.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::domain::ports::{SsdSpec, StorageTarget};

// =============================================================================
// Constants
// =============================================================================

/// Name of the transfer file inside the scratch directory
pub const TEST_FILE_NAME: &str = "test.img";

const MB: u64 = 1024 * 1024;

/// Transfers of real data finishing faster than this cannot be timed
/// meaningfully; reporting a bandwidth from them would be garbage.
const MIN_MEASURABLE: Duration = Duration::from_micros(10);

// =============================================================================
// Probe Configuration
// =============================================================================

/// Configuration for the storage probe
#[derive(Debug, Clone)]
pub struct StorageProbeConfig {
    /// Total size to transfer, in MB
    pub total_size_mb: u64,
    /// Size of each write/read call, in MB
    pub block_size_mb: u64,
}

impl Default for StorageProbeConfig {
    fn default() -> Self {
        Self {
            total_size_mb: 10_000,
            block_size_mb: 1,
        }
    }
}

// =============================================================================
// Storage Probe
// =============================================================================

/// Sequential storage bandwidth probe
#[derive(Debug)]
pub struct StorageProbe {
    config: StorageProbeConfig,
}

impl StorageProbe {
    /// Create a probe, validating the block size
    pub fn new(config: StorageProbeConfig) -> Result<Self> {
        if config.block_size_mb == 0 {
            return Err(Error::Configuration(
                "block size must be non-zero".into(),
            ));
        }
        Ok(Self { config })
    }

    /// Probe `path` in both directions and build an [`SsdSpec`]
    ///
    /// The transfer file lives in a unique scratch subdirectory under `path`,
    /// removed when the probe finishes, so concurrent runs against the same
    /// mount cannot collide on a fixed file name.
    pub fn probe(&self, target: StorageTarget, path: &Path) -> Result<SsdSpec> {
        let scratch = tempfile::Builder::new()
            .prefix("fleetbench-")
            .tempdir_in(path)?;
        debug!(target = %target, scratch = %scratch.path().display(), "storage probe starting");

        let (test_file, write_bandwidth_gbps) = self.probe_write(scratch.path())?;
        let read_bandwidth_gbps = self.probe_read(&test_file)?;

        scratch.close()?;

        Ok(SsdSpec {
            target,
            read_bandwidth_gbps,
            write_bandwidth_gbps,
        })
    }

    /// Write the transfer file under `dir` and time it
    ///
    /// Returns the file path and the write bandwidth in GB/s. The timer stops
    /// only after `sync_all` has pushed every block through the OS cache to
    /// the device. A `total_size_mb` that does not divide evenly by
    /// `block_size_mb` is truncated to whole blocks.
    pub fn probe_write(&self, dir: &Path) -> Result<(PathBuf, f64)> {
        let num_blocks = self.config.total_size_mb / self.config.block_size_mb;
        let remainder_mb = self.config.total_size_mb % self.config.block_size_mb;
        if remainder_mb != 0 {
            warn!(
                remainder_mb,
                "total size not divisible by block size, truncating to whole blocks"
            );
        }

        let block = vec![0u8; (self.config.block_size_mb * MB) as usize];
        let test_file = dir.join(TEST_FILE_NAME);

        let start = Instant::now();
        let mut file = File::create(&test_file)?;
        for _ in 0..num_blocks {
            file.write_all(&block)?;
        }
        file.sync_all()?;
        let elapsed = start.elapsed();

        let written_bytes = num_blocks * self.config.block_size_mb * MB;
        let bandwidth = bandwidth_gbps(written_bytes, elapsed)?;
        debug!(
            written_mb = written_bytes / MB,
            elapsed_ms = elapsed.as_millis() as u64,
            bandwidth_gbps = bandwidth,
            "write probe finished"
        );

        Ok((test_file, bandwidth))
    }

    /// Read the transfer file back sequentially and time it
    ///
    /// Reads `block_size_mb` at a time until EOF, summing the bytes actually
    /// read. Returns the read bandwidth in GB/s.
    pub fn probe_read(&self, test_file: &Path) -> Result<f64> {
        let mut buf = vec![0u8; (self.config.block_size_mb * MB) as usize];
        let mut bytes_read = 0u64;

        let start = Instant::now();
        let mut file = File::open(test_file)?;
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            bytes_read += n as u64;
        }
        let elapsed = start.elapsed();

        let bandwidth = bandwidth_gbps(bytes_read, elapsed)?;
        debug!(
            read_mb = bytes_read / MB,
            elapsed_ms = elapsed.as_millis() as u64,
            bandwidth_gbps = bandwidth,
            "read probe finished"
        );

        Ok(bandwidth)
    }
}

// =============================================================================
// Bandwidth Math
// =============================================================================

/// Compute bandwidth in GB/s from a byte count and an elapsed duration
///
/// Zero bytes report zero bandwidth (an empty transfer has nothing to time).
/// A non-empty transfer below the minimum resolvable duration is an error
/// rather than an infinity.
pub fn bandwidth_gbps(bytes: u64, elapsed: Duration) -> Result<f64> {
    if bytes == 0 {
        return Ok(0.0);
    }
    if elapsed < MIN_MEASURABLE {
        return Err(Error::MeasurementTooFast { bytes, elapsed });
    }
    Ok(bytes as f64 / MB as f64 / 1024.0 / elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    fn probe(total_size_mb: u64, block_size_mb: u64) -> StorageProbe {
        StorageProbe::new(StorageProbeConfig {
            total_size_mb,
            block_size_mb,
        })
        .unwrap()
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let result = StorageProbe::new(StorageProbeConfig {
            total_size_mb: 10,
            block_size_mb: 0,
        });
        assert_matches!(result, Err(Error::Configuration(_)));
    }

    #[test]
    fn test_write_produces_exact_file() {
        let tmp = TempDir::new().unwrap();
        let (path, bandwidth) = probe(10, 1).probe_write(tmp.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), TEST_FILE_NAME);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 10 * MB);
        assert!(bandwidth > 0.0);
    }

    #[test]
    fn test_non_divisible_total_truncates() {
        let tmp = TempDir::new().unwrap();
        // 10 / 3 -> 3 whole blocks, 9 MB on disk
        let (path, _) = probe(10, 3).probe_write(tmp.path()).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 9 * MB);
    }

    #[test]
    fn test_rewrite_overwrites_previous_file() {
        let tmp = TempDir::new().unwrap();
        let (path, _) = probe(16, 2).probe_write(tmp.path()).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 16 * MB);

        // Second run with a smaller total must shrink the file
        let (path, _) = probe(4, 2).probe_write(tmp.path()).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 4 * MB);
    }

    #[test]
    fn test_total_smaller_than_block_writes_empty_file() {
        let tmp = TempDir::new().unwrap();
        let (path, bandwidth) = probe(1, 4).probe_write(tmp.path()).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
        assert_eq!(bandwidth, 0.0);
    }

    #[test]
    fn test_read_of_empty_file_reports_zero() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(TEST_FILE_NAME);
        std::fs::write(&path, b"").unwrap();

        let bandwidth = probe(1, 4).probe_read(&path).unwrap();
        assert!(bandwidth == 0.0 && !bandwidth.is_nan());
    }

    #[test]
    fn test_read_counts_on_disk_bytes() {
        let tmp = TempDir::new().unwrap();
        let p = probe(12, 4);
        let (path, _) = p.probe_write(tmp.path()).unwrap();

        // Read back with a block size that does not divide the file evenly
        let bandwidth = probe(12, 5).probe_read(&path).unwrap();
        assert!(bandwidth > 0.0);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let result = probe(1, 1).probe_read(&tmp.path().join("absent.img"));
        assert_matches!(result, Err(Error::Io(_)));
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let result = probe(1, 1).probe_write(&tmp.path().join("no-such-dir"));
        assert_matches!(result, Err(Error::Io(_)));
    }

    #[test]
    fn test_probe_cleans_scratch_dir() {
        let tmp = TempDir::new().unwrap();
        let spec = probe(8, 1)
            .probe(StorageTarget::LocalDisk, tmp.path())
            .unwrap();

        assert_eq!(spec.target, StorageTarget::LocalDisk);
        assert!(spec.write_bandwidth_gbps > 0.0);
        assert!(spec.read_bandwidth_gbps > 0.0);

        // Scratch subdirectory must be gone
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_bandwidth_math() {
        // 1 GB in 1 s is exactly 1 GB/s
        let one_gb = 1024 * MB;
        let bw = bandwidth_gbps(one_gb, Duration::from_secs(1)).unwrap();
        assert!((bw - 1.0).abs() < 1e-12);

        assert_eq!(bandwidth_gbps(0, Duration::from_nanos(1)).unwrap(), 0.0);

        assert_matches!(
            bandwidth_gbps(one_gb, Duration::from_nanos(5)),
            Err(Error::MeasurementTooFast { .. })
        );
    }
}
