// ============================================================
// Layer 3 — Compiled Configuration
// ============================================================
// The loss, optimizer and (optional) metric list a model was
// last compiled with. The training session owns one of these
// and hands it back to the model on every recompile, so the
// harness never has to ask the model what it was compiled with.
//
// Example:
//   let cfg = CompiledConfig::new(LossKind::CrossEntropy, OptimizerKind::adam(1e-3))
//       .with_metrics([MetricKind::Accuracy]);

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which loss function the model minimises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    CrossEntropy,
    /// Cross-entropy with label smoothing factor in (0, 1)
    SmoothedCrossEntropy(f32),
}

/// Which optimizer updates the weights, with its learning rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OptimizerKind {
    Adam { learning_rate: f64 },
    Sgd { learning_rate: f64 },
}

impl OptimizerKind {
    pub fn adam(learning_rate: f64) -> Self {
        Self::Adam { learning_rate }
    }

    pub fn sgd(learning_rate: f64) -> Self {
        Self::Sgd { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        match *self {
            Self::Adam { learning_rate } | Self::Sgd { learning_rate } => learning_rate,
        }
    }

    /// True when both values name the same optimizer algorithm,
    /// regardless of learning rate.
    pub fn same_algorithm(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Metrics reported alongside the loss by each training step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Accuracy,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Accuracy => write!(f, "accuracy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledConfig {
    pub loss: LossKind,
    pub optimizer: OptimizerKind,
    /// `None` means compile was called without a metrics argument.
    /// Order is preserved as given.
    pub metrics: Option<Vec<MetricKind>>,
}

impl CompiledConfig {
    pub fn new(loss: LossKind, optimizer: OptimizerKind) -> Self {
        Self { loss, optimizer, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = MetricKind>) -> Self {
        self.metrics = Some(metrics.into_iter().collect());
        self
    }

    pub fn tracks(&self, metric: MetricKind) -> bool {
        self.metrics
            .as_ref()
            .map(|m| m.contains(&metric))
            .unwrap_or(false)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_absent_by_default() {
        let cfg = CompiledConfig::new(LossKind::CrossEntropy, OptimizerKind::adam(1e-3));
        assert!(cfg.metrics.is_none());
        assert!(!cfg.tracks(MetricKind::Accuracy));
    }

    #[test]
    fn test_with_metrics_keeps_order() {
        let cfg = CompiledConfig::new(LossKind::CrossEntropy, OptimizerKind::sgd(0.1))
            .with_metrics([MetricKind::Accuracy]);
        assert_eq!(cfg.metrics, Some(vec![MetricKind::Accuracy]));
        assert!(cfg.tracks(MetricKind::Accuracy));
    }

    #[test]
    fn test_same_algorithm_ignores_learning_rate() {
        assert!(OptimizerKind::adam(1e-3).same_algorithm(&OptimizerKind::adam(0.5)));
        assert!(!OptimizerKind::adam(1e-3).same_algorithm(&OptimizerKind::sgd(1e-3)));
        assert_eq!(OptimizerKind::sgd(0.25).learning_rate(), 0.25);
    }

    #[test]
    fn test_serde_shape() {
        let cfg = CompiledConfig::new(LossKind::SmoothedCrossEntropy(0.1), OptimizerKind::adam(0.01))
            .with_metrics([MetricKind::Accuracy]);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"kind\":\"adam\""));
        assert!(json.contains("\"accuracy\""));
        let back: CompiledConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
