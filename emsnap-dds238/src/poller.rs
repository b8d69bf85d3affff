//! Meter polling and snapshot writing.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, error, info};

use emsnap_common::snapshot::{Snapshot, timestamp_now, write_atomic};
use emsnap_common::transport::RegisterSource;
use emsnap_common::{Error, Result};

use crate::fields::{FIELDS, READ_ADDRESS, READ_COUNT};

/// Consecutive read failures after which the repeat loop gives up.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 10;

/// Polls one DDS238-2 meter and writes its snapshot file.
pub struct MeterPoller<S> {
    source: S,
    snapshot_path: PathBuf,
}

impl<S: RegisterSource> MeterPoller<S> {
    pub fn new(source: S, snapshot_path: PathBuf) -> Self {
        Self {
            source,
            snapshot_path,
        }
    }

    /// Perform one poll cycle: read the measurement window, decode, and
    /// atomically replace the snapshot file.
    ///
    /// A failed read propagates without touching the snapshot.
    pub async fn poll_once(&mut self) -> Result<()> {
        let ts = timestamp_now();
        let regs = self.source.read_holding(READ_ADDRESS, READ_COUNT).await?;

        if regs.len() < READ_COUNT as usize {
            return Err(Error::Read(format!(
                "short read: {} of {} registers",
                regs.len(),
                READ_COUNT
            )));
        }

        let mut snap = Snapshot::new();
        for field in FIELDS {
            snap.push_float(field.name, field.decode(&regs));
        }
        snap.push_text("ts", &ts);

        write_atomic(&self.snapshot_path, &snap.render())?;
        debug!("Snapshot written to {}", self.snapshot_path.display());

        Ok(())
    }

    /// Repeat mode: sleep, poll, and track consecutive failures.
    ///
    /// The counter resets on any success; once it reaches
    /// [`MAX_CONSECUTIVE_FAILURES`] the loop ends. Loop termination is
    /// normal completion, not an error.
    pub async fn run_loop(&mut self, interval: Duration) -> Result<()> {
        let mut failures = 0u32;

        loop {
            tokio::time::sleep(interval).await;

            match self.poll_once().await {
                Ok(()) => {
                    failures = 0;
                }
                Err(e) => {
                    failures += 1;
                    error!(
                        "Poll failed ({}/{}): {}",
                        failures, MAX_CONSECUTIVE_FAILURES, e
                    );
                    if failures >= MAX_CONSECUTIVE_FAILURES {
                        info!("Giving up after {} consecutive failures", failures);
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}
