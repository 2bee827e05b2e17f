// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records one CSV row per completed epoch.
//
// Metrics recorded per epoch:
//   - epoch:    session-cumulative epoch number
//   - loss:     mean training loss over the epoch's steps
//   - accuracy: mean accuracy over the epoch's steps, in %
//
// Output file: {checkpoint_dir}/metrics.csv
//
// Example CSV output:
//   epoch,loss,accuracy
//   13,0.412300,81.250000
//   14,0.389100,84.375000
//
// Rows from a resumed run continue the epoch numbering of the
// checkpoint it resumed from.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::ml::trainer::EpochSummary;

pub const METRICS_FILE: &str = "metrics.csv";

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join(METRICS_FILE);

        // Header only for a new file; later runs append
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,loss,accuracy")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochSummary) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(f, "{},{:.6},{:.6}", m.epoch, m.mean_loss, m.mean_accuracy)?;

        tracing::debug!(
            "Logged epoch {} metrics: loss={:.4}, acc={:.4}",
            m.epoch,
            m.mean_loss,
            m.mean_accuracy,
        );

        Ok(())
    }

    pub fn log_all(&self, summaries: &[EpochSummary]) -> Result<()> {
        summaries.iter().try_for_each(|m| self.log(m))
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn summary(epoch: u64, loss: f64, acc: f64) -> EpochSummary {
        EpochSummary { epoch, mean_loss: loss, mean_accuracy: acc }
    }

    #[test]
    fn test_header_written_once_and_rows_appended() {
        let dir = tempdir().unwrap();

        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&summary(1, 0.5, 50.0)).unwrap();

        // A second logger on the same dir (a resumed run) appends
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log_all(&[summary(2, 0.25, 75.0)]).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(
            text,
            "epoch,loss,accuracy\n1,0.500000,50.000000\n2,0.250000,75.000000\n"
        );
    }
}
