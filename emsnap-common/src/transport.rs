//! Modbus RTU register source.

use std::time::Duration;

use async_trait::async_trait;
use tokio_modbus::client::{Context, Reader};
use tokio_modbus::prelude::*;
use tracing::debug;

use crate::config::MeterConfig;
use crate::error::{Error, Result};

/// A source of holding-register windows.
///
/// The pollers only ever consume "read N registers starting at address A";
/// abstracting that one operation lets them run against a scripted source
/// in tests.
#[async_trait]
pub trait RegisterSource: Send {
    /// Read `count` holding registers starting at `address`.
    async fn read_holding(&mut self, address: u16, count: u16) -> Result<Vec<u16>>;
}

/// Register source over a Modbus RTU serial line.
pub struct RtuSource {
    ctx: Context,
    timeout: Duration,
}

impl RtuSource {
    /// Open the serial port and attach a Modbus RTU context for the
    /// configured slave. Nothing is sent on the line until the first read.
    pub fn connect(config: &MeterConfig) -> Result<Self> {
        let serial = &config.serial;

        let parity = match serial.parity.to_lowercase().as_str() {
            "even" => tokio_serial::Parity::Even,
            "odd" => tokio_serial::Parity::Odd,
            _ => tokio_serial::Parity::None,
        };

        let stop_bits = match serial.stop_bits {
            2 => tokio_serial::StopBits::Two,
            _ => tokio_serial::StopBits::One,
        };

        let data_bits = match serial.data_bits {
            5 => tokio_serial::DataBits::Five,
            6 => tokio_serial::DataBits::Six,
            7 => tokio_serial::DataBits::Seven,
            _ => tokio_serial::DataBits::Eight,
        };

        let builder = tokio_serial::new(serial.port.as_str(), serial.baud_rate)
            .parity(parity)
            .stop_bits(stop_bits)
            .data_bits(data_bits);

        debug!(
            "Opening {} ({} baud, slave {})",
            serial.port, serial.baud_rate, config.slave_id
        );

        let stream = tokio_serial::SerialStream::open(&builder)
            .map_err(|e| Error::Connection(format!("Serial open failed: {}", e)))?;

        let ctx = rtu::attach_slave(stream, Slave(config.slave_id));

        Ok(Self {
            ctx,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }
}

#[async_trait]
impl RegisterSource for RtuSource {
    async fn read_holding(&mut self, address: u16, count: u16) -> Result<Vec<u16>> {
        tokio::time::timeout(self.timeout, self.ctx.read_holding_registers(address, count))
            .await
            .map_err(|_| Error::Read(format!("no response within {:?}", self.timeout)))?
            .map_err(|e| Error::Read(e.to_string()))?
            .map_err(|e| Error::Read(format!("Exception: {:?}", e)))
    }
}
