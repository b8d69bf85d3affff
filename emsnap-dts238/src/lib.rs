//! Snapshot dumper for the DTS238-7 three-phase kWh meter.
//!
//! The meter's report spans two holding-register windows of 0x20 registers
//! each: the energy/settings block at 0x00 and the per-phase electrical
//! block at 0x80. Both are fetched in one run and merged into a single
//! snapshot document.

pub mod fields;
pub mod report;
