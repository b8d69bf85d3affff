//! Snapshot dumper for the DDS238-2 single-phase kWh meter.
//!
//! The meter exposes its measurements in one contiguous holding-register
//! window (0x00-0x14) which is read in a single request per poll cycle and
//! decoded into the snapshot document:
//!
//! ```text
//! {"total_energy":F,...,"frequency":F,"ts":"YYYY-MM-DD HH:MM:SS"}
//! ```

pub mod fields;
pub mod poller;
