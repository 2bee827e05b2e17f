// ============================================================
// Layer 5 — Burn-backed TrainableModel
// ============================================================
// Wraps MlpClassifier so the training session can drive it:
//
//   compile         → build cross-entropy loss + optimizer
//   train_on_batch  → forward, loss, backward, optimizer step
//   save_weights    → named MessagePack bytes written to the path
//   load_weights    → bytes decoded, shape-checked, then loaded
//
// Weights go through an in-memory recorder rather than a file
// recorder so the file lands at exactly the requested path;
// file recorders replace the extension with their own.
// A record whose layer shapes differ from this model's config
// is refused before it replaces the current weights.
//
// Reference: Burn Book §5 (Records), Kingma & Ba (2015) Adam

use anyhow::{anyhow, bail, Context, Result};
use burn::{
    nn::loss::{CrossEntropyLoss, CrossEntropyLossConfig},
    optim::{AdamConfig, GradientsParams, Optimizer, SgdConfig},
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkBytesRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use std::{fs, path::Path};

use crate::domain::compiled::{CompiledConfig, LossKind, MetricKind, OptimizerKind};
use crate::domain::traits::{StepMetrics, TrainableModel};
use crate::ml::model::{MlpClassifier, MlpClassifierConfig};

/// One optimizer update: (learning rate, model, gradients) → model
type StepFn<B> = Box<dyn FnMut(f64, MlpClassifier<B>, GradientsParams) -> MlpClassifier<B>>;

fn build_step<B: AutodiffBackend>(optimizer: OptimizerKind) -> StepFn<B> {
    match optimizer {
        OptimizerKind::Adam { .. } => {
            let mut optim = AdamConfig::new()
                .with_epsilon(1e-8)
                .init::<B, MlpClassifier<B>>();
            Box::new(move |lr, model, grads| optim.step(lr, model, grads))
        }
        OptimizerKind::Sgd { .. } => {
            let mut optim = SgdConfig::new().init::<B, MlpClassifier<B>>();
            Box::new(move |lr, model, grads| optim.step(lr, model, grads))
        }
    }
}

fn build_loss<B: Backend>(loss: LossKind, device: &B::Device) -> CrossEntropyLoss<B> {
    let smoothing = match loss {
        LossKind::CrossEntropy => None,
        LossKind::SmoothedCrossEntropy(alpha) => Some(alpha),
    };
    CrossEntropyLossConfig::new()
        .with_smoothing(smoothing)
        .init(device)
}

struct Compiled<B: AutodiffBackend> {
    config: CompiledConfig,
    loss:   CrossEntropyLoss<B>,
    step:   StepFn<B>,
}

pub struct BurnClassifier<B: AutodiffBackend> {
    config:   MlpClassifierConfig,
    model:    MlpClassifier<B>,
    device:   B::Device,
    compiled: Option<Compiled<B>>,
}

impl<B: AutodiffBackend> BurnClassifier<B> {
    pub fn new(config: MlpClassifierConfig, device: B::Device) -> Self {
        let model = config.init::<B>(&device);
        Self { config, model, device, compiled: None }
    }

    /// Serialised weight record, as written by `save_weights`
    pub fn weights_bytes(&self) -> Result<Vec<u8>> {
        NamedMpkBytesRecorder::<FullPrecisionSettings>::new()
            .record(self.model.clone().into_record(), ())
            .context("Failed to serialise model weights")
    }

    /// rows: one Vec<f32> per sample → [rows, num_features]
    fn features_tensor(&self, rows: &[Vec<f32>]) -> Result<Tensor<B, 2>> {
        let width = self.config.num_features;
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            bail!("row {i} has {} features, model expects {width}", row.len());
        }
        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Ok(Tensor::<B, 1>::from_floats(flat.as_slice(), &self.device).reshape([rows.len(), width]))
    }

    fn targets_tensor(&self, targets: &[usize]) -> Result<Tensor<B, 1, Int>> {
        let classes = self.config.num_classes;
        if let Some(&bad) = targets.iter().find(|&&t| t >= classes) {
            bail!("label {bad} is out of range for {classes} classes");
        }
        let ids: Vec<i32> = targets.iter().map(|&t| t as i32).collect();
        Ok(Tensor::<B, 1, Int>::from_ints(ids.as_slice(), &self.device))
    }
}

impl<B: AutodiffBackend> TrainableModel for BurnClassifier<B> {
    type Input = Vec<f32>;
    type Target = usize;

    fn compile(&mut self, config: &CompiledConfig) -> Result<()> {
        let loss = build_loss::<B>(config.loss, &self.device);

        // Same optimizer algorithm → keep its moment estimates
        let step = match self.compiled.take() {
            Some(prev) if prev.config.optimizer.same_algorithm(&config.optimizer) => prev.step,
            _ => build_step::<B>(config.optimizer),
        };

        self.compiled = Some(Compiled { config: config.clone(), loss, step });
        Ok(())
    }

    fn train_on_batch(&mut self, inputs: &[Vec<f32>], targets: &[usize]) -> Result<StepMetrics> {
        if inputs.is_empty() {
            bail!("Cannot train on an empty batch");
        }
        if inputs.len() != targets.len() {
            bail!("{} inputs but {} targets", inputs.len(), targets.len());
        }
        let x = self.features_tensor(inputs)?;
        let y = self.targets_tensor(targets)?;

        let compiled = self
            .compiled
            .as_mut()
            .ok_or_else(|| anyhow!("train_on_batch called before compile"))?;

        let logits = self.model.forward(x);
        let loss = compiled.loss.forward(logits.clone(), y.clone());
        let loss_value: f64 = loss.clone().into_scalar().elem::<f64>();

        let accuracy = if compiled.config.tracks(MetricKind::Accuracy) {
            // argmax(1) returns [batch, 1] — flatten to [batch] before comparing
            let correct: i64 = logits
                .argmax(1)
                .flatten::<1>(0, 1)
                .equal(y)
                .int()
                .sum()
                .into_scalar()
                .elem::<i64>();
            Some(correct as f64 / inputs.len() as f64)
        } else {
            None
        };

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.model);
        let lr = compiled.config.optimizer.learning_rate();
        self.model = (compiled.step)(lr, self.model.clone(), grads);

        Ok(StepMetrics::new(loss_value, accuracy))
    }

    fn save_weights(&self, path: &Path) -> Result<()> {
        let bytes = self.weights_bytes()?;
        fs::write(path, bytes)
            .with_context(|| format!("Failed to save weights to '{}'", path.display()))?;
        tracing::debug!("Wrote weights to '{}'", path.display());
        Ok(())
    }

    fn load_weights(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path)
            .with_context(|| format!("Cannot read weights from '{}'", path.display()))?;

        let record = NamedMpkBytesRecorder::<FullPrecisionSettings>::new()
            .load(bytes, &self.device)
            .with_context(|| format!("Cannot decode weights in '{}'", path.display()))?;

        let loaded = self.model.clone().load_record(record);
        self.check_shapes(&loaded)
            .with_context(|| format!("Weights in '{}' do not fit this model", path.display()))?;

        self.model = loaded;
        Ok(())
    }
}

impl<B: AutodiffBackend> BurnClassifier<B> {
    /// Linear weights are stored [d_input, d_output]
    fn check_shapes(&self, model: &MlpClassifier<B>) -> Result<()> {
        let cfg = &self.config;
        let hidden = model.hidden.weight.val().dims();
        let output = model.output.weight.val().dims();
        let expected_hidden = [cfg.num_features, cfg.hidden_size];
        let expected_output = [cfg.hidden_size, cfg.num_classes];

        if hidden != expected_hidden || output != expected_output {
            bail!(
                "architecture mismatch: file has layers {:?} → {:?}, model expects {:?} → {:?}",
                hidden, output, expected_hidden, expected_output
            );
        }
        Ok(())
    }
}
