// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one resumable training run:
//
//   Step 1: Load or generate the dataset     (Layer 4 - data)
//   Step 2: Check the run against its config (Layer 6 - infra)
//   Step 3: Build and compile the model      (Layer 5 - ml)
//   Step 4: Resume from the latest checkpoint(Layer 6 - infra)
//   Step 5: Run the epochs                   (Layer 5 - ml)
//   Step 6: Log metrics, save a checkpoint   (Layer 6 - infra)
//
// Running the same command twice continues the epoch count:
// the second run loads {..}_wgt_N.h5 and saves {..}_wgt_{N+E}.h5.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::data::{
    dataset::{Dataset, DatasetSource},
    loader::CsvLoader,
    synthetic::SyntheticSource,
};
use crate::domain::compiled::{CompiledConfig, LossKind, MetricKind, OptimizerKind};
use crate::infra::{
    checkpoint::{CheckpointStore, LoadOutcome},
    config_store::ConfigStore,
    metrics::MetricsLogger,
};
use crate::ml::{
    classifier::BurnClassifier,
    model::MlpClassifierConfig,
    trainer::{EpochOptions, EpochSummary, TrainingSession},
    TrainBackend,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All settings for a training run.
// Serialisable so it can be snapshotted next to the checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub checkpoint_dir:  String,
    /// CSV dataset; synthetic data is generated when absent
    pub data_path:       Option<String>,
    pub csv_has_headers: bool,

    pub epochs:          usize,
    pub batch_size:      usize,
    pub hidden_size:     usize,
    pub dropout:         f64,

    pub loss:            LossKind,
    pub optimizer:       OptimizerKind,
    pub track_accuracy:  bool,

    /// Load the latest checkpoint before training
    pub resume:          bool,

    pub synthetic_samples:  usize,
    pub synthetic_features: usize,
    pub synthetic_classes:  usize,
    pub seed:               u64,

    /// Filled in from the dataset when the run starts
    #[serde(default)]
    pub num_features:    Option<usize>,
    #[serde(default)]
    pub num_classes:     Option<usize>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir:     "checkpoints".to_string(),
            data_path:          None,
            csv_has_headers:    true,
            epochs:             1,
            batch_size:         128,
            hidden_size:        64,
            dropout:            0.0,
            loss:               LossKind::CrossEntropy,
            optimizer:          OptimizerKind::adam(1e-3),
            track_accuracy:     true,
            resume:             true,
            synthetic_samples:  4096,
            synthetic_features: 8,
            synthetic_classes:  3,
            seed:               42,
            num_features:       None,
            num_classes:        None,
        }
    }
}

impl TrainConfig {
    pub fn compiled_config(&self) -> CompiledConfig {
        let cfg = CompiledConfig::new(self.loss, self.optimizer);
        if self.track_accuracy {
            cfg.with_metrics([MetricKind::Accuracy])
        } else {
            cfg
        }
    }

    /// Model-shape fields that must match between a checkpoint and
    /// the run loading it
    fn architecture(&self) -> (Option<usize>, usize, Option<usize>) {
        (self.num_features, self.hidden_size, self.num_classes)
    }
}

/// What a finished run did
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub resumed_from: Option<PathBuf>,
    pub start_epoch:  u64,
    pub end_epoch:    u64,
    pub checkpoint:   PathBuf,
    pub summaries:    Vec<EpochSummary>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training run end to end
    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Step 1: Dataset ───────────────────────────────────────────────────
        let dataset = self.load_dataset()?;
        if dataset.is_empty() {
            bail!("Dataset is empty; nothing to train on");
        }
        tracing::info!(
            "Dataset: {} rows, {} features, {} classes",
            dataset.len(),
            dataset.num_features(),
            dataset.num_classes()
        );

        // ── Step 2: Checkpoint directory and config snapshot ──────────────────
        // The directory must exist so save() names files inside it
        fs::create_dir_all(&cfg.checkpoint_dir).with_context(|| {
            format!("Cannot create checkpoint directory '{}'", cfg.checkpoint_dir)
        })?;

        let mut snapshot = cfg.clone();
        snapshot.num_features = Some(dataset.num_features());
        snapshot.num_classes = Some(dataset.num_classes());

        let config_store = ConfigStore::new(&cfg.checkpoint_dir);
        if cfg.resume && config_store.exists() {
            let previous = config_store.load()?;
            if previous.architecture() != snapshot.architecture() {
                bail!(
                    "Checkpoints in '{}' were trained with (features, hidden, classes) = {:?}, \
                     this run uses {:?}. Use a different --checkpoint-dir or --fresh.",
                    cfg.checkpoint_dir,
                    previous.architecture(),
                    snapshot.architecture()
                );
            }
        }

        // ── Step 3: Model ─────────────────────────────────────────────────────
        let model_cfg = MlpClassifierConfig::new(
            dataset.num_features(),
            cfg.hidden_size,
            dataset.num_classes(),
        )
        .with_dropout(cfg.dropout);
        let model = BurnClassifier::<TrainBackend>::new(model_cfg, Default::default());

        let mut session = TrainingSession::new(model);
        session.compile(cfg.compiled_config())?;

        // ── Step 4: Resume ────────────────────────────────────────────────────
        let store = CheckpointStore::new();
        let resumed_from = if cfg.resume {
            match store.load(&mut session, &cfg.checkpoint_dir)? {
                LoadOutcome::Resumed { path, epoch } => {
                    tracing::info!(
                        "Resuming '{}' at epoch {}",
                        path.display(),
                        epoch.unwrap_or(session.total_epochs())
                    );
                    Some(path)
                }
                LoadOutcome::StartFromScratch => None,
            }
        } else {
            tracing::info!("Resume disabled; training from epoch 0");
            None
        };
        let start_epoch = session.total_epochs();

        config_store.save(&snapshot)?;

        // ── Step 5: Train ─────────────────────────────────────────────────────
        let summaries = session.run_epochs(
            &dataset.features,
            &dataset.labels,
            EpochOptions::new(cfg.epochs, cfg.batch_size),
        )?;

        // ── Step 6: Metrics + checkpoint ──────────────────────────────────────
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;
        metrics.log_all(&summaries)?;
        tracing::debug!("Appended {} rows to '{}'", summaries.len(), metrics.csv_path().display());
        let checkpoint = store.save(&mut session, &cfg.checkpoint_dir)?;

        tracing::info!(
            "Trained epochs {}..{}; checkpoint '{}'",
            start_epoch + 1,
            session.total_epochs(),
            checkpoint.display()
        );

        Ok(TrainReport {
            resumed_from,
            start_epoch,
            end_epoch: session.total_epochs(),
            checkpoint,
            summaries,
        })
    }

    fn load_dataset(&self) -> Result<Dataset> {
        let cfg = &self.config;
        match &cfg.data_path {
            Some(path) => CsvLoader::new(path)
                .with_headers(cfg.csv_has_headers)
                .load(),
            None => {
                tracing::info!(
                    "No --data given; generating {} synthetic samples (seed {})",
                    cfg.synthetic_samples,
                    cfg.seed
                );
                SyntheticSource::new(
                    cfg.synthetic_samples,
                    cfg.synthetic_features,
                    cfg.synthetic_classes,
                    cfg.seed,
                )
                .load()
            }
        }
    }
}
