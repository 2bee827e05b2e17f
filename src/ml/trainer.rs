// ============================================================
// Layer 5 — Training Session
// ============================================================
// Owns a model, the config it was compiled with, and the
// session-cumulative epoch counter. Every public operation
// that touches the model goes through `ensure_compiled`
// first, which refuses an uncompiled model and otherwise
// recompiles with the stored config.
//
// Epoch loop (per call to run_epochs):
//
//   for i in 0..epochs
//     total_epochs += 1
//     window = i * (len / batch_size) .. + batch_size
//     repeat batch_size times: train_on_batch(window)
//     report mean loss / mean accuracy
//
// Note the window is chosen by the epoch index, and every
// step of an epoch trains on that same window.

use std::io::{Stdout, Write};
use std::ops::Range;

use crate::domain::compiled::CompiledConfig;
use crate::domain::error::{HarnessError, Result};
use crate::domain::traits::TrainableModel;
use crate::ml::progress::ProgressReporter;

// ─── EpochOptions ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochOptions {
    pub epochs:     usize,
    pub batch_size: usize,
}

impl Default for EpochOptions {
    fn default() -> Self {
        Self { epochs: 1, batch_size: 128 }
    }
}

impl EpochOptions {
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        Self { epochs, batch_size }
    }
}

// ─── EpochSummary ─────────────────────────────────────────────────────────────
/// Averages for one completed epoch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochSummary {
    /// Session-cumulative epoch number after this epoch
    pub epoch: u64,
    pub mean_loss: f64,
    /// Percentage (0–100). 0.0 when the model reported no accuracy.
    pub mean_accuracy: f64,
}

/// Index range of the window trained on during epoch `epoch_index`
/// of a run. Clamped to `len`, so late epochs may get a short or
/// empty window.
pub fn batch_window(len: usize, epoch_index: usize, batch_size: usize) -> Range<usize> {
    let batches_per_pass = len / batch_size.max(1);
    let start = epoch_index.saturating_mul(batches_per_pass).min(len);
    let end = start.saturating_add(batch_size).min(len);
    start..end
}

// ─── TrainingSession ──────────────────────────────────────────────────────────
pub struct TrainingSession<M: TrainableModel, W: Write = Stdout> {
    model:        M,
    compiled:     Option<CompiledConfig>,
    total_epochs: u64,
    reporter:     ProgressReporter<W>,
}

impl<M: TrainableModel> TrainingSession<M> {
    /// New session reporting progress to stdout
    pub fn new(model: M) -> Self {
        Self::with_reporter(model, ProgressReporter::stdout())
    }
}

impl<M: TrainableModel, W: Write> TrainingSession<M, W> {
    pub fn with_reporter(model: M, reporter: ProgressReporter<W>) -> Self {
        Self {
            model,
            compiled: None,
            total_epochs: 0,
            reporter,
        }
    }

    /// Compile the model and remember the config for later recompiles.
    /// On failure the previously stored config is kept.
    pub fn compile(&mut self, config: CompiledConfig) -> Result<()> {
        self.model.compile(&config)?;
        tracing::debug!(
            loss = ?config.loss,
            optimizer = ?config.optimizer,
            metrics = ?config.metrics,
            "Model compiled"
        );
        self.compiled = Some(config);
        Ok(())
    }

    /// Fail if never compiled; otherwise recompile with the current
    /// loss, optimizer and metrics.
    pub fn ensure_compiled(&mut self) -> Result<()> {
        let config = self.compiled.as_ref().ok_or_else(HarnessError::not_compiled)?;
        self.model.compile(config)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn compiled_config(&self) -> Option<&CompiledConfig> {
        self.compiled.as_ref()
    }

    /// Epochs completed in this session, or restored from a checkpoint
    pub fn total_epochs(&self) -> u64 {
        self.total_epochs
    }

    /// Only the checkpoint load path may overwrite the counter
    pub(crate) fn restore_total_epochs(&mut self, epochs: u64) {
        self.total_epochs = epochs;
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub(crate) fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    #[cfg(test)]
    pub fn reporter(&self) -> &ProgressReporter<W> {
        &self.reporter
    }

    pub(crate) fn reporter_mut(&mut self) -> &mut ProgressReporter<W> {
        &mut self.reporter
    }

    /// Run `options.epochs` epochs of `options.batch_size` steps each.
    pub fn run_epochs(
        &mut self,
        features: &[M::Input],
        labels:   &[M::Target],
        options:  EpochOptions,
    ) -> Result<Vec<EpochSummary>> {
        self.ensure_compiled()?;

        let EpochOptions { epochs, batch_size } = options;
        if batch_size == 0 {
            return Err(HarnessError::Configuration(
                "batch size must be greater than zero".to_string(),
            ));
        }
        if features.len() != labels.len() {
            return Err(HarnessError::Configuration(format!(
                "got {} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let mut summaries = Vec::with_capacity(epochs);

        for i in 0..epochs {
            self.total_epochs += 1;

            let window = batch_window(features.len(), i, batch_size);
            let x_batch = &features[window.clone()];
            let y_batch = &labels[window.clone()];
            tracing::debug!(
                epoch = self.total_epochs,
                start = window.start,
                end = window.end,
                "Training on window"
            );

            let mut loss_sum = 0.0f64;
            let mut acc_sum = 0.0f64;
            let mut acc_count = 0usize;

            for step in 0..batch_size {
                self.reporter.step(self.total_epochs, step, batch_size)?;

                let metrics = self.model.train_on_batch(x_batch, y_batch)?;
                loss_sum += metrics.loss;
                if let Some(acc) = metrics.accuracy {
                    acc_sum += acc;
                    acc_count += 1;
                }
            }

            let mean_loss = loss_sum / batch_size as f64;
            let mean_accuracy = if acc_count > 0 {
                acc_sum / acc_count as f64 * 100.0
            } else {
                0.0
            };
            self.reporter.finish_epoch(mean_loss, mean_accuracy)?;

            summaries.push(EpochSummary {
                epoch: self.total_epochs,
                mean_loss,
                mean_accuracy,
            });
        }

        Ok(summaries)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compiled::{LossKind, MetricKind, OptimizerKind};
    use crate::domain::traits::StepMetrics;
    use crate::ml::testing::RecordingModel;

    fn session(model: RecordingModel) -> TrainingSession<RecordingModel, Vec<u8>> {
        TrainingSession::with_reporter(model, ProgressReporter::new(Vec::new()))
    }

    fn config() -> CompiledConfig {
        CompiledConfig::new(LossKind::CrossEntropy, OptimizerKind::adam(1e-3))
            .with_metrics([MetricKind::Accuracy])
    }

    fn output(s: &TrainingSession<RecordingModel, Vec<u8>>) -> String {
        String::from_utf8(s.reporter().output().clone()).unwrap()
    }

    fn data(n: u32) -> (Vec<u32>, Vec<u32>) {
        ((0..n).collect(), (0..n).map(|i| i % 3).collect())
    }

    #[test]
    fn test_uncompiled_run_is_configuration_error() {
        let mut s = session(RecordingModel::new());
        let (x, y) = data(10);
        let err = s.run_epochs(&x, &y, EpochOptions::new(1, 5)).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(s.total_epochs(), 0);
        assert_eq!(s.model().steps(), 0);
    }

    #[test]
    fn test_counter_is_cumulative_across_calls() {
        let mut s = session(RecordingModel::new());
        s.compile(config()).unwrap();
        let (x, y) = data(20);
        s.run_epochs(&x, &y, EpochOptions::new(2, 4)).unwrap();
        let summaries = s.run_epochs(&x, &y, EpochOptions::new(1, 4)).unwrap();
        assert_eq!(s.total_epochs(), 3);
        assert_eq!(summaries[0].epoch, 3);
        assert!(output(&s).contains("\r3 ["));
    }

    #[test]
    fn test_each_run_recompiles_with_stored_config() {
        let mut s = session(RecordingModel::new());
        s.compile(config()).unwrap();
        let (x, y) = data(8);
        s.run_epochs(&x, &y, EpochOptions::new(1, 2)).unwrap();
        s.run_epochs(&x, &y, EpochOptions::new(1, 2)).unwrap();
        let calls = s.model().compile_calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| *c == config()));
    }

    #[test]
    fn test_window_follows_epoch_index() {
        let mut s = session(RecordingModel::new());
        s.compile(config()).unwrap();
        let (x, y) = data(1000);
        s.run_epochs(&x, &y, EpochOptions::new(3, 100)).unwrap();

        // 1000 / 100 = 10 batches per pass → windows start at 0, 10, 20
        let batches = s.model().batches();
        assert_eq!(batches.len(), 300);
        assert_eq!(batches[0], (0..100).collect::<Vec<u32>>());
        assert_eq!(batches[99], (0..100).collect::<Vec<u32>>());
        assert_eq!(batches[100], (10..110).collect::<Vec<u32>>());
        assert_eq!(batches[200], (20..120).collect::<Vec<u32>>());
    }

    #[test]
    fn test_batch_window_clamps_to_data() {
        // len 10, batch 4 → 2 batches per pass
        let windows: Vec<_> = (0..6).map(|i| batch_window(10, i, 4)).collect();
        assert_eq!(windows, vec![0..4, 2..6, 4..8, 6..10, 8..10, 10..10]);
        // batch larger than the data → 0 batches per pass, always from 0
        assert_eq!(batch_window(5, 3, 8), 0..5);
    }

    #[test]
    fn test_means_and_report_line() {
        let model = RecordingModel::new().with_step_metrics(StepMetrics::new(0.5, Some(0.25)));
        let mut s = session(model);
        s.compile(config()).unwrap();
        let (x, y) = data(40);
        let summaries = s.run_epochs(&x, &y, EpochOptions::new(1, 10)).unwrap();

        assert_eq!(summaries[0].mean_loss, 0.5);
        assert_eq!(summaries[0].mean_accuracy, 25.0);
        assert!(output(&s).ends_with(" loss:0.5000, acc:25.0000\n"));
    }

    #[test]
    fn test_accuracy_zero_without_metrics() {
        let mut s = session(RecordingModel::new().with_step_metrics(StepMetrics::new(0.5, Some(0.9))));
        s.compile(CompiledConfig::new(LossKind::CrossEntropy, OptimizerKind::sgd(0.1)))
            .unwrap();
        let (x, y) = data(4);
        let summaries = s.run_epochs(&x, &y, EpochOptions::new(1, 2)).unwrap();
        assert_eq!(summaries[0].mean_accuracy, 0.0);
    }

    #[test]
    fn test_small_batch_draws_progress() {
        let mut s = session(RecordingModel::new());
        s.compile(config()).unwrap();
        let (x, y) = data(30);
        s.run_epochs(&x, &y, EpochOptions::new(1, 10)).unwrap();
        // divisor 1 → one redraw per step
        assert_eq!(output(&s).matches('\r').count(), 10);
        assert_eq!(s.model().steps(), 10);
    }

    #[test]
    fn test_step_failure_propagates() {
        let mut s = session(RecordingModel::new().failing_on_step(3));
        s.compile(config()).unwrap();
        let (x, y) = data(16);
        let err = s.run_epochs(&x, &y, EpochOptions::new(2, 4)).unwrap_err();
        assert!(matches!(err, HarnessError::Model(_)));
        assert!(err.to_string().contains("step 3"));
        assert_eq!(s.total_epochs(), 1);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut s = session(RecordingModel::new());
        s.compile(config()).unwrap();
        let (x, y) = data(4);
        let err = s.run_epochs(&x, &y, EpochOptions::new(1, 0)).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(s.total_epochs(), 0);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let mut s = session(RecordingModel::new());
        s.compile(config()).unwrap();
        let err = s.run_epochs(&[1, 2, 3], &[0, 1], EpochOptions::new(1, 1)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_failed_compile_keeps_previous_config() {
        let mut s = session(RecordingModel::new());
        s.compile(config()).unwrap();
        s.model_mut().reject_compiles(true);
        let other = CompiledConfig::new(LossKind::CrossEntropy, OptimizerKind::sgd(1.0));
        assert!(s.compile(other).is_err());
        assert_eq!(s.compiled_config(), Some(&config()));
    }

    #[test]
    fn test_default_options() {
        assert_eq!(EpochOptions::default(), EpochOptions::new(1, 128));
    }
}
