// ============================================================
// Layer 5 — ML Layer
// ============================================================
// The training session and its console output, plus the one
// concrete model the CLI trains. Only classifier.rs and
// model.rs import burn.
//
//   trainer.rs    — TrainingSession: compile guard, epoch
//                   counter, epoch/step loop
//
//   progress.rs   — ProgressReporter: the 30-cell bar and the
//                   per-epoch loss / accuracy line
//
//   model.rs      — MlpClassifier burn module
//
//   classifier.rs — BurnClassifier: MlpClassifier behind the
//                   TrainableModel trait
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Epoch/batch loop and compile guard
pub mod trainer;

/// Console progress bar
pub mod progress;

/// MLP classifier architecture
pub mod model;

/// TrainableModel implementation over burn
pub mod classifier;

#[cfg(test)]
pub mod testing;

/// CPU backend with autodiff, used by the CLI
pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
