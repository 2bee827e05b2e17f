// ============================================================
// Layer 3 — Harness Errors
// ============================================================
// Three kinds of failure leave the core:
//
//   Configuration — the call cannot start (model never compiled,
//                   zero batch size, mismatched feature/label counts)
//   Io            — directory listing failed
//   Model         — whatever the TrainableModel returned, untouched
//
// An empty checkpoint directory is NOT an error; see
// `infra::checkpoint::LoadOutcome::StartFromScratch`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the model collaborator are passed through unchanged
    #[error(transparent)]
    Model(#[from] anyhow::Error),
}

impl HarnessError {
    /// The error raised when a model is used before its first compile
    pub fn not_compiled() -> Self {
        Self::Configuration("You must compile a model before training.".to_string())
    }

    #[cfg(test)]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
