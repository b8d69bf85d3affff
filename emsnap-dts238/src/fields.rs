//! DTS238-7 register map.
//!
//! Window 0x00 holds the energy counters plus line frequency and the
//! communication-settings flags register. Window 0x80 holds the per-phase
//! electrical values; its power totals are register pairs while the
//! per-phase figures are single registers. Offsets in the tables are
//! relative to their window base.

use emsnap_common::decode::{DataType, Field};

/// Registers fetched per request.
pub const WINDOW_COUNT: u16 = 0x20;

/// Base address of the energy/settings window.
pub const ENERGY_WINDOW: u16 = 0x00;

/// Base address of the per-phase electrical window.
pub const PHASE_WINDOW: u16 = 0x80;

/// Energy window fields, in snapshot order. Energies in kWh.
pub static ENERGY_FIELDS: &[Field] = &[
    Field::new("total_energy", 0x00, DataType::U32, 0.01),
    Field::new("reversing_energy", 0x08, DataType::U32, 0.01),
    Field::new("forward_energy", 0x0A, DataType::U32, 0.01),
    Field::new("frequency", 0x11, DataType::U16, 0.01),
];

/// Offset of the communication-settings flags register in the energy window.
pub const FLAGS_OFFSET: usize = 0x15;

/// Baud-rate codes carried in the low bits of the flags register. Codes
/// 5-7 are reserved on this meter family.
pub static BAUD_RATES: [&str; 8] = [
    "unknown", "9600", "4800", "2400", "1200", "5???", "6???", "7???",
];

/// Baud rate selected by the flags register.
pub fn baud_rate(flags: u16) -> &'static str {
    BAUD_RATES[(flags & 0x7) as usize]
}

/// Communication address carried in the high byte of the flags register.
pub fn comm_addr(flags: u16) -> u8 {
    (flags >> 8) as u8
}

/// Per-phase window fields, in snapshot order.
///
/// The power totals interleave with their per-phase registers: each total
/// is a pair directly followed by the three phase values.
pub static PHASE_FIELDS: &[Field] = &[
    Field::new("voltage_A", 0x00, DataType::U16, 0.1),
    Field::new("voltage_B", 0x01, DataType::U16, 0.1),
    Field::new("voltage_C", 0x02, DataType::U16, 0.1),
    Field::new("current_A", 0x03, DataType::U16, 0.01),
    Field::new("current_B", 0x04, DataType::U16, 0.01),
    Field::new("current_C", 0x05, DataType::U16, 0.01),
    Field::new("power", 0x06, DataType::I32, 0.001),
    Field::new("power_A", 0x08, DataType::I16, 0.001),
    Field::new("power_B", 0x09, DataType::I16, 0.001),
    Field::new("power_C", 0x0A, DataType::I16, 0.001),
    Field::new("rpower", 0x0B, DataType::I32, 0.001),
    Field::new("rpower_A", 0x0D, DataType::I16, 0.001),
    Field::new("rpower_B", 0x0E, DataType::I16, 0.001),
    Field::new("rpower_C", 0x0F, DataType::I16, 0.001),
    Field::new("ap_power", 0x10, DataType::U32, 0.001),
    Field::new("ap_power_A", 0x12, DataType::U16, 0.001),
    Field::new("ap_power_B", 0x13, DataType::U16, 0.001),
    Field::new("ap_power_C", 0x14, DataType::U16, 0.001),
    Field::new("pfact", 0x15, DataType::U16, 0.001),
    Field::new("pfact_A", 0x16, DataType::U16, 0.001),
    Field::new("pfact_B", 0x17, DataType::U16, 0.001),
    Field::new("pfact_C", 0x18, DataType::U16, 0.001),
];
