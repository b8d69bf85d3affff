//! Snapshot dumper for the DDS238-2 single-phase kWh meter.
//!
//! Reads the meter's measurement window over Modbus RTU and writes
//! `/tmp/em_data.json` (configurable), either once or on a one-second
//! repeat cycle.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use emsnap_common::config::MeterConfig;
use emsnap_common::transport::RtuSource;
use emsnap_dds238::poller::MeterPoller;

/// Snapshot dumper for the DDS238-2 single-phase kWh meter.
#[derive(Parser, Debug)]
#[command(name = "emsnap-dds238")]
#[command(about = "Polls a DDS238-2 kWh meter over Modbus RTU and writes a JSON snapshot")]
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

    /// Poll once per interval until ten consecutive reads fail.
    #[arg(short = 'l', long = "loop")]
    loop_mode: bool,

    /// Enable transport-level protocol tracing.
    #[arg(long)]
    debug: bool,

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
        None => MeterConfig::default(),
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
    if args.debug {
        config.logging.level = "debug,tokio_modbus=trace,tokio_serial=trace".to_string();
    }
    config.validate()?;

    emsnap_common::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    info!("Starting emsnap-dds238");
    info!(
        "Meter at {} (slave {}, {} baud)",
        config.serial.port, config.slave_id, config.serial.baud_rate
    );

    let source = RtuSource::connect(&config)
        .with_context(|| format!("Failed to open serial port {}", config.serial.port))?;
    let mut poller = MeterPoller::new(source, config.snapshot_path.clone());

    if args.loop_mode {
        info!(
            "Polling every {}s, snapshot at {}",
            config.poll_interval_secs,
            config.snapshot_path.display()
        );
        poller
            .run_loop(Duration::from_secs(config.poll_interval_secs))
            .await?;
        info!("Polling loop finished");
    } else {
        poller.poll_once().await.context("Meter read failed")?;
        info!("Snapshot written to {}", config.snapshot_path.display());
    }

    Ok(())
}
