// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The training session and checkpoint store never see a
// concrete network. They only see this capability interface:
//
//   compile         attach loss / optimizer / metrics
//   train_on_batch  one gradient step on one batch
//   save_weights    write weight state to an exact path
//   load_weights    read weight state from an exact path
//
// Implementations:
//   - BurnClassifier  → burn MLP on the NdArray backend
//   - RecordingModel  → test double (cfg(test) only)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::Path;

use crate::domain::compiled::CompiledConfig;

// ─── StepMetrics ──────────────────────────────────────────────────────────────
/// What one training step reports back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMetrics {
    pub loss: f64,
    /// Fraction in [0, 1]; present only when compiled with
    /// `MetricKind::Accuracy`
    pub accuracy: Option<f64>,
}

impl StepMetrics {
    pub fn new(loss: f64, accuracy: Option<f64>) -> Self {
        Self { loss, accuracy }
    }
}

// ─── TrainableModel ───────────────────────────────────────────────────────────
/// An opaque model the harness can compile, step, and persist.
///
/// `Input` is one feature row and `Target` one label. The harness
/// slices `&[Input]` / `&[Target]` and never looks inside them.
pub trait TrainableModel {
    type Input;
    type Target;

    /// (Re)bind loss, optimizer and metrics. Called on first compile
    /// and again before every train/save/load.
    fn compile(&mut self, config: &CompiledConfig) -> Result<()>;

    /// Run one optimisation step on the given batch.
    fn train_on_batch(
        &mut self,
        inputs:  &[Self::Input],
        targets: &[Self::Target],
    ) -> Result<StepMetrics>;

    /// Write the full weight state to exactly `path` (overwrite).
    fn save_weights(&self, path: &Path) -> Result<()>;

    /// Replace the weight state with the contents of `path`.
    fn load_weights(&mut self, path: &Path) -> Result<()>;
}
