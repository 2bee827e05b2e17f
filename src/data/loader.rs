// ============================================================
// Layer 4 — CSV Dataset Loader
// ============================================================
// Reads a numeric CSV file into a Dataset:
//
//   # optional comment lines
//   f1,f2,...,fn,label
//   0.12,3.4,...,1.0,2
//
// Every column but the last is an f32 feature; the last
// column is a non-negative integer class label. All rows
// must have the same number of columns.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::data::dataset::{Dataset, DatasetSource};

pub struct CsvLoader {
    path:        PathBuf,
    has_headers: bool,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), has_headers: true }
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

impl DatasetSource for CsvLoader {
    fn load(&self) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_path(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;

        let mut features = Vec::new();
        let mut labels   = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("Malformed CSV row {} in '{}'", row + 1, self.path.display()))?;

            let cells: Vec<&str> = record.iter().collect();
            let Some((label, values)) = cells.split_last() else {
                tracing::warn!("Skipping empty row {} in '{}'", row + 1, self.path.display());
                continue;
            };
            if values.is_empty() {
                anyhow::bail!("Row {} has a label but no features", row + 1);
            }

            let parsed: Vec<f32> = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<_, _>>()
                .with_context(|| format!("Non-numeric feature in row {}", row + 1))?;
            let label: usize = label
                .parse()
                .with_context(|| format!("Invalid class label '{label}' in row {}", row + 1))?;

            features.push(parsed);
            labels.push(label);
        }

        tracing::info!(
            "Loaded {} rows from '{}'",
            labels.len(),
            self.path.display()
        );
        Dataset::new(features, labels)
    }
}
