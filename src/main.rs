//! fleetbench
//!
//! Dispatches the hardware benchmark once per target GPU profile and logs
//! the collected bandwidth numbers.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fleetbench::{
    CollectorConfig, Error, FleetRunner, HardwareProfile, LocalDispatcher, Result,
    StorageProbeConfig,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// fleetbench - GPU and storage bandwidth benchmarking per hardware profile
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mounted volume path probed alongside the local disk
    #[arg(long, env = "VOLUME_PATH", default_value = "/mnt/storage")]
    volume_path: PathBuf,

    /// Local probe directory (defaults to the current working directory)
    #[arg(long, env = "LOCAL_PATH")]
    local_path: Option<PathBuf>,

    /// Total size written per storage probe, in MB
    #[arg(long, env = "SIZE_MB", default_value = "10000")]
    size_mb: u64,

    /// Block size per write/read call, in MB
    #[arg(long, env = "BLOCK_SIZE_MB", default_value = "1")]
    block_size_mb: u64,

    /// GPU SKU to benchmark; repeatable, defaults to the standard fleet
    #[arg(long = "gpu")]
    gpus: Vec<String>,

    /// Benchmark a single CPU-only profile instead of GPU SKUs
    #[arg(long, env = "CPU_ONLY")]
    cpu_only: bool,

    /// Print collected reports as JSON after the run
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

impl Args {
    fn profiles(&self) -> Vec<HardwareProfile> {
        if self.cpu_only {
            return vec![HardwareProfile::cpu_only("cpu-only")];
        }
        if self.gpus.is_empty() {
            return FleetRunner::default_profiles();
        }
        self.gpus
            .iter()
            .map(|sku| HardwareProfile::gpu(sku.as_str()))
            .collect()
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting fleetbench");
    info!("  Version: {}", fleetbench::VERSION);
    info!("  Volume path: {}", args.volume_path.display());
    info!("  Probe size: {} MB ({} MB blocks)", args.size_mb, args.block_size_mb);

    let profiles = args.profiles();
    if profiles.is_empty() {
        return Err(Error::Configuration("no profiles to benchmark".into()));
    }
    info!("  Profiles: {}", profile_names(&profiles));

    let collector_config = CollectorConfig {
        local_path: args.local_path.clone(),
        volume_path: args.volume_path.clone(),
        storage: StorageProbeConfig {
            total_size_mb: args.size_mb,
            block_size_mb: args.block_size_mb,
        },
    };

    let runner = FleetRunner::new(Arc::new(LocalDispatcher::new()), profiles, collector_config);
    let results = runner.run().await;

    let failed = results.iter().filter(|r| !r.outcome.is_ok()).count();
    info!(
        "Fleet run finished: {} profiles, {} failed",
        results.len(),
        failed
    );

    if args.json {
        let rendered = serde_json::to_string_pretty(&results)
            .map_err(|e| Error::Internal(format!("report serialization failed: {e}")))?;
        println!("{rendered}");
    }

    Ok(())
}

fn profile_names(profiles: &[HardwareProfile]) -> String {
    profiles
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
