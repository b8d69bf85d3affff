//! emsnap Common Library
//!
//! This crate provides the shared building blocks for the emsnap meter tools:
//!
//! - [`decode`] - Register field descriptors and word-pair decoding
//! - [`snapshot`] - JSON snapshot assembly and atomic file replacement
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`transport`] - Modbus RTU register source
//! - [`error`] - Error types

pub mod config;
pub mod decode;
pub mod error;
pub mod snapshot;
pub mod transport;

// Re-export commonly used types at the crate root
pub use config::{LogFormat, LoggingConfig, MeterConfig, SerialConfig};
pub use decode::{DataType, Field, i32_from_pair, u32_from_pair};
pub use error::{Error, Result};
pub use snapshot::{Snapshot, timestamp_now, write_atomic};
pub use transport::{RegisterSource, RtuSource};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// The `RUST_LOG` environment variable, when set, takes precedence over the
/// configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
