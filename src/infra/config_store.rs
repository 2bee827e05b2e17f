// ============================================================
// Layer 6 — Training Config Snapshot
// ============================================================
// Saves the TrainConfig of a run next to its checkpoints so
// a later run (or a person) can see which architecture and
// optimizer the weights belong to.
//
//   {checkpoint_dir}/train_config.json

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::TrainConfig;

pub const CONFIG_FILE: &str = "train_config.json";

pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Save the training configuration to JSON.
    pub fn save(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.path();
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load a previously saved training configuration.
    pub fn load(&self) -> Result<TrainConfig> {
        let path = self.path();
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        assert!(!store.exists());

        let cfg = TrainConfig { epochs: 3, hidden_size: 16, ..TrainConfig::default() };
        store.save(&cfg).unwrap();
        assert!(store.exists());

        let back = store.load().unwrap();
        assert_eq!(back.epochs, 3);
        assert_eq!(back.hidden_size, 16);
    }

    #[test]
    fn test_load_missing_is_error() {
        let dir = tempdir().unwrap();
        assert!(ConfigStore::new(dir.path()).load().is_err());
    }
}
