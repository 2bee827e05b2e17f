// ============================================================
// Layer 6 — Checkpoint Store
// ============================================================
// Saves and restores weights through a TrainingSession and
// keeps the session's epoch counter in step with the files.
//
// Directory layout (one file per save, never rewritten):
//
//   checkpoints/
//     20230101000000_wgt_5.h5    ← 5 epochs completed
//     20230102000000_wgt_12.h5   ← 12 epochs completed (latest)
//     metrics.csv                ← ignored, not a checkpoint
//
// save(dir)   → writes {now}_wgt_{total_epochs}.h5 into dir
// save(file)  → writes exactly to file
// load(dir)   → picks the last checkpoint name in sorted order
//               and restores total_epochs from its name; an empty
//               directory is a fresh start even before compile
// load(file)  → reads exactly file, counter untouched
//
// The weight bytes themselves belong to the model; this store
// only decides WHICH path is read or written.

use chrono::{Local, NaiveDateTime};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::checkpoint_name::CheckpointName;
use crate::domain::error::Result;
use crate::domain::traits::TrainableModel;
use crate::ml::trainer::TrainingSession;

/// A recognised checkpoint file inside a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointEntry {
    pub name: CheckpointName,
    pub path: PathBuf,
}

impl CheckpointEntry {
    pub fn epoch(&self) -> u64 {
        self.name.epoch()
    }
}

/// Result of `CheckpointStore::load`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Directory held no checkpoint; training begins from epoch 0
    StartFromScratch,
    /// Weights were loaded from `path`. `epoch` is set when the path
    /// was discovered in a directory and the counter was restored.
    Resumed { path: PathBuf, epoch: Option<u64> },
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub struct CheckpointStore {
    /// Source of the timestamp embedded in new checkpoint names
    clock: fn() -> NaiveDateTime,
}

impl Default for CheckpointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckpointStore {
    pub fn new() -> Self {
        Self { clock: local_now }
    }

    #[cfg(test)]
    pub fn with_clock(clock: fn() -> NaiveDateTime) -> Self {
        Self { clock }
    }

    /// All checkpoints directly inside `dir`, in selection order
    /// (ascending filename, so the last one is the latest).
    pub fn list(dir: &Path) -> Result<Vec<CheckpointEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(name) = CheckpointName::parse(file_name) {
                entries.push(CheckpointEntry { name, path });
            }
        }
        entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(entries)
    }

    /// The checkpoint `load(dir)` would pick, if any
    pub fn latest(dir: &Path) -> Result<Option<CheckpointEntry>> {
        Ok(Self::list(dir)?.pop())
    }

    /// Resolve where `save` would write for the given session epoch
    pub fn resolve_save_path(&self, target: &Path, total_epochs: u64) -> PathBuf {
        if target.is_dir() {
            target.join(CheckpointName::at((self.clock)(), total_epochs).to_string())
        } else {
            target.to_path_buf()
        }
    }

    /// Write the session's weights and return the path written.
    pub fn save<M, W>(
        &self,
        session: &mut TrainingSession<M, W>,
        target: impl AsRef<Path>,
    ) -> Result<PathBuf>
    where
        M: TrainableModel,
        W: Write,
    {
        let path = self.resolve_save_path(target.as_ref(), session.total_epochs());

        session.ensure_compiled()?;
        session.model().save_weights(&path)?;

        tracing::info!(
            path = %path.display(),
            epoch = session.total_epochs(),
            "Saved checkpoint"
        );
        Ok(path)
    }

    /// Load weights into the session from a file or the latest
    /// checkpoint in a directory.
    pub fn load<M, W>(
        &self,
        session: &mut TrainingSession<M, W>,
        source: impl AsRef<Path>,
    ) -> Result<LoadOutcome>
    where
        M: TrainableModel,
        W: Write,
    {
        let source = source.as_ref();

        let (path, epoch) = if source.is_dir() {
            match Self::latest(source)? {
                Some(entry) => {
                    let epoch = entry.epoch();
                    (entry.path, Some(epoch))
                }
                None => {
                    tracing::info!(dir = %source.display(), "No checkpoint found");
                    session.reporter_mut().starting_from_scratch()?;
                    return Ok(LoadOutcome::StartFromScratch);
                }
            }
        } else {
            (source.to_path_buf(), None)
        };

        session.ensure_compiled()?;
        session.model_mut().load_weights(&path)?;
        if let Some(epoch) = epoch {
            session.restore_total_epochs(epoch);
        }

        tracing::info!(
            path = %path.display(),
            epoch = session.total_epochs(),
            "Loaded checkpoint"
        );
        session.reporter_mut().resuming_from_checkpoint()?;
        Ok(LoadOutcome::Resumed { path, epoch })
    }
}
