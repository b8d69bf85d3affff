//! DDS238-2 register map.
//!
//! Energies occupy register pairs; the instantaneous electrical values are
//! single registers starting at 0x0C. Reactive power is the only signed
//! field on this meter.

use emsnap_common::decode::{DataType, Field};

/// Base address of the measurement window.
pub const READ_ADDRESS: u16 = 0x00;

/// Window length: registers 0x00-0x14.
pub const READ_COUNT: u16 = 0x15;

/// Decoded fields, in snapshot order. All energies in kWh.
pub static FIELDS: &[Field] = &[
    Field::new("total_energy", 0x00, DataType::U32, 0.01),
    Field::new("reversing_energy", 0x08, DataType::U32, 0.01),
    Field::new("forward_energy", 0x0A, DataType::U32, 0.01),
    Field::new("voltage", 0x0C, DataType::U16, 0.1),
    Field::new("current", 0x0D, DataType::U16, 0.01),
    Field::new("active_power", 0x0E, DataType::U16, 0.001),
    Field::new("reactive_power", 0x0F, DataType::I16, 0.001),
    Field::new("power_factor", 0x10, DataType::U16, 0.001),
    Field::new("frequency", 0x11, DataType::U16, 0.01),
];
