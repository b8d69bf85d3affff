//! End-to-end report tests against a scripted register source.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use emsnap_common::transport::RegisterSource;
use emsnap_common::{Error, Result};
use emsnap_dts238::fields::{ENERGY_WINDOW, FLAGS_OFFSET, PHASE_WINDOW, WINDOW_COUNT};
use emsnap_dts238::report::MeterReporter;

/// Serves fixed register windows keyed by base address.
struct WindowSource {
    windows: HashMap<u16, Vec<u16>>,
    fail_at: Option<u16>,
}

impl WindowSource {
    fn new(windows: HashMap<u16, Vec<u16>>) -> Self {
        Self {
            windows,
            fail_at: None,
        }
    }
}

#[async_trait]
impl RegisterSource for WindowSource {
    async fn read_holding(&mut self, address: u16, count: u16) -> Result<Vec<u16>> {
        if self.fail_at == Some(address) {
            return Err(Error::Read(format!("no response at 0x{:02x}", address)));
        }
        match self.windows.get(&address) {
            Some(window) => Ok(window[..count as usize].to_vec()),
            None => Err(Error::Read(format!("unexpected address 0x{:02x}", address))),
        }
    }
}

fn energy_window() -> Vec<u16> {
    let mut regs = vec![0u16; WINDOW_COUNT as usize];
    regs[0x00] = 0x0002;
    regs[0x01] = 0x49F0; // total_energy 150000 -> 1500.00 kWh
    regs[0x09] = 0x1388; // reversing_energy 5000 -> 50.00 kWh
    regs[0x0A] = 0x0002;
    regs[0x0B] = 0x3668; // forward_energy 145000 -> 1450.00 kWh
    regs[0x11] = 5002; // frequency 50.02 Hz
    regs[FLAGS_OFFSET] = 0x0105; // comm addr 1, reserved baud code 5
    regs
}

fn phase_window() -> Vec<u16> {
    let mut regs = vec![0u16; WINDOW_COUNT as usize];
    regs[0x00] = 2305; // voltage_A 230.5
    regs[0x01] = 2298; // voltage_B 229.8
    regs[0x02] = 2312; // voltage_C 231.2
    regs[0x03] = 1520; // current_A 15.20
    regs[0x04] = 1498; // current_B 14.98
    regs[0x05] = 1533; // current_C 15.33
    regs[0x06] = 0xFFFF;
    regs[0x07] = 0xD8F0; // power -10000 -> -10.000 kW (export)
    regs[0x08] = 0xF2F6; // power_A -3.338
    regs[0x09] = 0xF307; // power_B -3.321
    regs[0x0A] = 0xF2FB; // power_C -3.333
    regs[0x0B] = 0x0000;
    regs[0x0C] = 0x04B0; // rpower 1200 -> 1.200 kvar
    regs[0x0D] = 400; // rpower_A 0.400
    regs[0x0E] = 395; // rpower_B 0.395
    regs[0x0F] = 405; // rpower_C 0.405
    regs[0x10] = 0x0000;
    regs[0x11] = 0x2774; // ap_power 10100 -> 10.100 kVA
    regs[0x12] = 3370; // ap_power_A 3.370
    regs[0x13] = 3355; // ap_power_B 3.355
    regs[0x14] = 3375; // ap_power_C 3.375
    regs[0x15] = 990; // pfact 0.990
    regs[0x16] = 991; // pfact_A
    regs[0x17] = 989; // pfact_B
    regs[0x18] = 990; // pfact_C
    regs
}

fn windows() -> HashMap<u16, Vec<u16>> {
    HashMap::from([(ENERGY_WINDOW, energy_window()), (PHASE_WINDOW, phase_window())])
}

fn snapshot_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("em_data.json")
}

#[tokio::test]
async fn report_covers_both_windows() {
    let dir = tempfile::tempdir().unwrap();
    let path = snapshot_path(&dir);

    let source = WindowSource::new(windows());
    let mut reporter = MeterReporter::new(source, path.clone());

    reporter.run().await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    // Energy window
    assert!(text.contains("\"total_energy\":1500.000"));
    assert!(text.contains("\"reversing_energy\":50.000"));
    assert!(text.contains("\"forward_energy\":1450.000"));
    assert!(text.contains("\"frequency\":50.020"));
    assert_eq!(parsed["baud_rate"], "5???");
    assert_eq!(parsed["comm_addr"], 1);

    // Phase window
    assert!(text.contains("\"voltage_A\":230.500"));
    assert!(text.contains("\"current_C\":15.330"));
    assert!(text.contains("\"power\":-10.000"));
    assert!(text.contains("\"power_B\":-3.321"));
    assert!(text.contains("\"rpower\":1.200"));
    assert!(text.contains("\"rpower_C\":0.405"));
    assert!(text.contains("\"ap_power\":10.100"));
    assert!(text.contains("\"ap_power_A\":3.370"));
    assert!(text.contains("\"pfact\":0.990"));
    assert!(text.contains("\"pfact_C\":0.990"));

    // All 28 measurement members plus ts.
    assert_eq!(parsed.as_object().unwrap().len(), 29);
    assert!(parsed["ts"].is_string());
}

#[tokio::test]
async fn failed_energy_window_read_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = snapshot_path(&dir);

    let mut source = WindowSource::new(windows());
    source.fail_at = Some(ENERGY_WINDOW);
    let mut reporter = MeterReporter::new(source, path.clone());

    assert!(reporter.run().await.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn failed_phase_window_read_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = snapshot_path(&dir);

    let mut source = WindowSource::new(windows());
    source.fail_at = Some(PHASE_WINDOW);
    let mut reporter = MeterReporter::new(source, path.clone());

    assert!(reporter.run().await.is_err());
    assert!(!path.exists());
}
