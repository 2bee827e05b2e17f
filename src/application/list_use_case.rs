// ============================================================
// Layer 2 — ListCheckpointsUseCase
// ============================================================
// Reports the checkpoints a directory holds, in the order
// CheckpointStore::load would consider them (last = latest).

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::infra::checkpoint::{CheckpointEntry, CheckpointStore};

pub struct ListCheckpointsUseCase {
    dir: PathBuf,
}

impl ListCheckpointsUseCase {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn execute(&self) -> Result<Vec<CheckpointEntry>> {
        if !self.dir.is_dir() {
            tracing::warn!("'{}' is not a directory", self.dir.display());
            return Ok(Vec::new());
        }
        CheckpointStore::list(&self.dir)
            .with_context(|| format!("Cannot list checkpoints in '{}'", self.dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_lists_only_checkpoints() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("20230101000000_wgt_5.h5"), [0u8]).unwrap();
        fs::write(dir.path().join("train_config.json"), "{}").unwrap();

        let entries = ListCheckpointsUseCase::new(dir.path()).execute().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].epoch(), 5);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let entries = ListCheckpointsUseCase::new(dir.path().join("nope")).execute().unwrap();
        assert!(entries.is_empty());
    }
}
