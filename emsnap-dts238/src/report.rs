//! Three-phase report collection and snapshot writing.

use std::path::PathBuf;

use tracing::{debug, info};

use emsnap_common::snapshot::{Snapshot, timestamp_now, write_atomic};
use emsnap_common::transport::RegisterSource;
use emsnap_common::{Error, Result};

use crate::fields::{
    ENERGY_FIELDS, ENERGY_WINDOW, FLAGS_OFFSET, PHASE_FIELDS, PHASE_WINDOW, WINDOW_COUNT,
    baud_rate, comm_addr,
};

/// Collects one full DTS238-7 report and writes the snapshot file.
pub struct MeterReporter<S> {
    source: S,
    snapshot_path: PathBuf,
}

impl<S: RegisterSource> MeterReporter<S> {
    pub fn new(source: S, snapshot_path: PathBuf) -> Self {
        Self {
            source,
            snapshot_path,
        }
    }

    /// Fetch both register windows and assemble the snapshot document.
    ///
    /// Either read failing abandons the report; no partial document is
    /// produced.
    pub async fn collect(&mut self) -> Result<Snapshot> {
        let mut snap = Snapshot::new();

        let regs = self.read_window(ENERGY_WINDOW).await?;
        for field in ENERGY_FIELDS {
            snap.push_float(field.name, field.decode(&regs));
        }
        let flags = regs[FLAGS_OFFSET];
        snap.push_text("baud_rate", baud_rate(flags));
        snap.push_int("comm_addr", comm_addr(flags) as i64);

        let regs = self.read_window(PHASE_WINDOW).await?;
        for field in PHASE_FIELDS {
            snap.push_float(field.name, field.decode(&regs));
        }

        snap.push_text("ts", &timestamp_now());
        Ok(snap)
    }

    /// Collect the report and atomically replace the snapshot file.
    pub async fn run(&mut self) -> Result<()> {
        let snap = self.collect().await?;
        write_atomic(&self.snapshot_path, &snap.render())?;
        info!("Snapshot written to {}", self.snapshot_path.display());
        Ok(())
    }

    async fn read_window(&mut self, base: u16) -> Result<Vec<u16>> {
        debug!("Reading {} registers at 0x{:02x}", WINDOW_COUNT, base);
        let regs = self.source.read_holding(base, WINDOW_COUNT).await?;

        if regs.len() < WINDOW_COUNT as usize {
            return Err(Error::Read(format!(
                "short read at 0x{:02x}: {} of {} registers",
                base,
                regs.len(),
                WINDOW_COUNT
            )));
        }

        Ok(regs)
    }
}
