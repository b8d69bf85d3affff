//! Snapshot dumper for the DTS238-7 three-phase kWh meter.
//!
//! Single-shot: reads the meter's two register windows over Modbus RTU,
//! writes the combined snapshot, and exits.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use emsnap_common::config::MeterConfig;
use emsnap_common::transport::RtuSource;
use emsnap_dts238::report::MeterReporter;

/// Response timeout used when no config file overrides it; the three-phase
/// meter is slower to answer than the DDS238-2.
const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Snapshot dumper for the DTS238-7 three-phase kWh meter.
#[derive(Parser, Debug)]
#[command(name = "emsnap-dts238")]
#[command(about = "Reads a DTS238-7 kWh meter over Modbus RTU and writes a JSON snapshot")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial device of the RS-485 adapter.
    #[arg(long)]
    port: Option<String>,

    /// Modbus slave address of the meter.
    #[arg(long)]
    slave: Option<u8>,

    /// Snapshot output path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MeterConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => MeterConfig {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            ..MeterConfig::default()
        },
    };

    if let Some(port) = &args.port {
        config.serial.port = port.clone();
    }
    if let Some(slave) = args.slave {
        config.slave_id = slave;
    }
    if let Some(output) = &args.output {
        config.snapshot_path = output.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;

    emsnap_common::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    info!("Starting emsnap-dts238");
    info!(
        "Meter at {} (slave {}, {} baud)",
        config.serial.port, config.slave_id, config.serial.baud_rate
    );

    let source = RtuSource::connect(&config)
        .with_context(|| format!("Failed to open serial port {}", config.serial.port))?;
    let mut reporter = MeterReporter::new(source, config.snapshot_path.clone());

    reporter.run().await.context("Meter read failed")?;

    Ok(())
}
