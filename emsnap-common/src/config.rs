//! Configuration for the meter tools.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Serial line settings for the RS-485 adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Serial port path (e.g., "/dev/ttyUSB0" or "COM1")
    #[serde(default = "default_port")]
    pub port: String,

    /// Baud rate (default: 9600)
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Data bits (default: 8)
    #[serde(default = "default_data_bits")]
    pub data_bits: u8,

    /// Parity: "none", "even", or "odd" (default: "none")
    #[serde(default = "default_parity")]
    pub parity: String,

    /// Stop bits: 1 or 2 (default: 1)
    #[serde(default = "default_stop_bits")]
    pub stop_bits: u8,
}

fn default_port() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_data_bits() -> u8 {
    8
}

fn default_parity() -> String {
    "none".to_string()
}

fn default_stop_bits() -> u8 {
    1
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
            data_bits: default_data_bits(),
            parity: default_parity(),
            stop_bits: default_stop_bits(),
        }
    }
}

/// Configuration for a single meter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterConfig {
    /// Serial line settings
    #[serde(default)]
    pub serial: SerialConfig,

    /// Modbus slave address (1-247)
    #[serde(default = "default_slave_id")]
    pub slave_id: u8,

    /// Response timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Public snapshot path
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Poll interval in seconds (repeat mode)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_slave_id() -> u8 {
    1
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("/tmp/em_data.json")
}

fn default_poll_interval() -> u64 {
    1
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            slave_id: default_slave_id(),
            timeout_ms: default_timeout_ms(),
            snapshot_path: default_snapshot_path(),
            poll_interval_secs: default_poll_interval(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MeterConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: MeterConfig = json5::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.slave_id == 0 {
            return Err(Error::Config("slave_id must be 1-247".to_string()));
        }

        match self.serial.parity.to_lowercase().as_str() {
            "none" | "even" | "odd" => {}
            other => {
                return Err(Error::Config(format!(
                    "invalid parity '{}' (use none, even, or odd)",
                    other
                )));
            }
        }

        if self.timeout_ms == 0 {
            return Err(Error::Config("timeout_ms must be nonzero".to_string()));
        }

        Ok(())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
