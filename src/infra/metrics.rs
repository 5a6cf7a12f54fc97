// ============================================================
// Layer 6 — Epoch Reporters
// ============================================================
// Two sinks for the per-epoch summary produced by the trainer:
//
//   TracingReporter — one `info` line per epoch on the log stream
//   MetricsLogger   — one row per epoch in <dir>/metrics.csv
//
// Example CSV output:
//   epoch,mean_loss,batches
//   1,0.693147,32
//   2,0.612304,32
//   ...
//
// Each run starts the file afresh, so the CSV only ever
// holds the epochs of the latest run in that directory.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::domain::traits::{EpochReporter, EpochSummary};

/// Reports each epoch through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl EpochReporter for TracingReporter {
    fn report(&mut self, s: &EpochSummary) -> Result<()> {
        tracing::info!(
            "Epoch {:>3}/{} | loss={:.6} | batches={}",
            s.epoch, s.num_epochs, s.mean_loss, s.batches
        );
        Ok(())
    }
}

/// Writes one CSV row per epoch for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Truncates any earlier run's file and writes the CSV header.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)?;
        writeln!(f, "epoch,mean_loss,batches")?;
        tracing::debug!("Started metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }
}

impl EpochReporter for MetricsLogger {
    fn report(&mut self, s: &EpochSummary) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(f, "{},{:.6},{}", s.epoch, s.mean_loss, s.batches)?;
        Ok(())
    }
}
