use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Feature rows with one class label per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub features: Vec<Vec<f32>>,
    pub labels:   Vec<usize>,
}

impl Dataset {
    /// Rows must all have the same width and there must be one label per row.
    pub fn new(features: Vec<Vec<f32>>, labels: Vec<usize>) -> Result<Self> {
        if features.len() != labels.len() {
            bail!("{} feature rows but {} labels", features.len(), labels.len());
        }
        if let Some(first) = features.first() {
            let width = first.len();
            if let Some(i) = features.iter().position(|r| r.len() != width) {
                bail!("row {i} has {} features, expected {width}", features[i].len());
            }
        }
        Ok(Self { features, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn num_features(&self) -> usize {
        self.features.first().map(Vec::len).unwrap_or(0)
    }

    /// Highest label + 1
    pub fn num_classes(&self) -> usize {
        self.labels.iter().max().map(|&m| m + 1).unwrap_or(0)
    }
}

/// Anything that can produce a dataset.
///
/// Implementations:
///   - CsvLoader       → numeric CSV file
///   - SyntheticSource → seeded clusters
pub trait DatasetSource {
    fn load(&self) -> Result<Dataset>;
}
