// Test double for `TrainableModel`: records every call and
// stores its "weights" as a small byte vector on disk.

use anyhow::{bail, Context, Result};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::compiled::{CompiledConfig, MetricKind};
use crate::domain::traits::{StepMetrics, TrainableModel};

pub struct RecordingModel {
    compile_calls:   Vec<CompiledConfig>,
    current:         Option<CompiledConfig>,
    batches:         Vec<Vec<u32>>,
    weights:         Vec<u8>,
    step_metrics:    StepMetrics,
    fail_on_step:    Option<usize>,
    reject_compiles: bool,
    saved_to:        RefCell<Vec<PathBuf>>,
    loaded_from:     Vec<PathBuf>,
}

impl RecordingModel {
    pub fn new() -> Self {
        Self {
            compile_calls:   Vec::new(),
            current:         None,
            batches:         Vec::new(),
            weights:         vec![0],
            step_metrics:    StepMetrics::new(1.0, Some(0.5)),
            fail_on_step:    None,
            reject_compiles: false,
            saved_to:        RefCell::new(Vec::new()),
            loaded_from:     Vec::new(),
        }
    }

    pub fn with_step_metrics(mut self, metrics: StepMetrics) -> Self {
        self.step_metrics = metrics;
        self
    }

    /// Fail on the given zero-based step, counted across all calls
    pub fn failing_on_step(mut self, step: usize) -> Self {
        self.fail_on_step = Some(step);
        self
    }

    pub fn reject_compiles(&mut self, reject: bool) {
        self.reject_compiles = reject;
    }

    pub fn compile_calls(&self) -> &[CompiledConfig] {
        &self.compile_calls
    }

    pub fn batches(&self) -> &[Vec<u32>] {
        &self.batches
    }

    pub fn steps(&self) -> usize {
        self.batches.len()
    }

    pub fn weights(&self) -> &[u8] {
        &self.weights
    }

    pub fn saved_to(&self) -> Vec<PathBuf> {
        self.saved_to.borrow().clone()
    }

    pub fn loaded_from(&self) -> &[PathBuf] {
        &self.loaded_from
    }
}

impl TrainableModel for RecordingModel {
    type Input = u32;
    type Target = u32;

    fn compile(&mut self, config: &CompiledConfig) -> Result<()> {
        if self.reject_compiles {
            bail!("compile rejected");
        }
        self.compile_calls.push(config.clone());
        self.current = Some(config.clone());
        Ok(())
    }

    fn train_on_batch(&mut self, inputs: &[u32], _targets: &[u32]) -> Result<StepMetrics> {
        let step = self.batches.len();
        if self.fail_on_step == Some(step) {
            bail!("train step {step} failed");
        }
        self.batches.push(inputs.to_vec());
        self.weights = (step as u64 + 1).to_le_bytes().to_vec();

        let tracks_accuracy = self
            .current
            .as_ref()
            .map(|c| c.tracks(MetricKind::Accuracy))
            .unwrap_or(false);
        Ok(StepMetrics::new(
            self.step_metrics.loss,
            self.step_metrics.accuracy.filter(|_| tracks_accuracy),
        ))
    }

    fn save_weights(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.weights)
            .with_context(|| format!("cannot write weights to '{}'", path.display()))?;
        self.saved_to.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn load_weights(&mut self, path: &Path) -> Result<()> {
        self.weights = fs::read(path)
            .with_context(|| format!("cannot read weights from '{}'", path.display()))?;
        self.loaded_from.push(path.to_path_buf());
        Ok(())
    }
}
