// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `checkpoints`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::train_use_case::TrainConfig;
use crate::domain::compiled::{LossKind, OptimizerKind};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train (or resume training) and save a checkpoint
    Train(TrainArgs),

    /// List the checkpoints in a directory, oldest first
    Checkpoints(CheckpointsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizerArg {
    Adam,
    Sgd,
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory holding {timestamp}_wgt_{epoch}.h5 checkpoints
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// CSV file: feature columns then an integer label column.
    /// Synthetic data is used when omitted.
    #[arg(long)]
    pub data: Option<String>,

    /// The CSV file has no header row
    #[arg(long)]
    pub no_header: bool,

    /// Epochs to run in this invocation
    #[arg(long, default_value_t = 1)]
    pub epochs: usize,

    /// Window size, and number of steps per epoch
    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    /// Width of the hidden layer
    #[arg(long, default_value_t = 64)]
    pub hidden_size: usize,

    /// Dropout probability after the hidden layer
    #[arg(long, default_value_t = 0.0)]
    pub dropout: f64,

    #[arg(long, value_enum, default_value_t = OptimizerArg::Adam)]
    pub optimizer: OptimizerArg,

    /// Learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Label smoothing factor for cross-entropy (0 disables)
    #[arg(long, default_value_t = 0.0)]
    pub label_smoothing: f32,

    /// Do not compute accuracy during training
    #[arg(long)]
    pub no_accuracy: bool,

    /// Ignore existing checkpoints and start at epoch 0
    #[arg(long)]
    pub fresh: bool,

    /// Synthetic data: number of samples
    #[arg(long, default_value_t = 4096)]
    pub samples: usize,

    /// Synthetic data: features per sample
    #[arg(long, default_value_t = 8)]
    pub features: usize,

    /// Synthetic data: number of classes
    #[arg(long, default_value_t = 3)]
    pub classes: usize,

    /// Synthetic data: RNG seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        let optimizer = match a.optimizer {
            OptimizerArg::Adam => OptimizerKind::adam(a.lr),
            OptimizerArg::Sgd  => OptimizerKind::sgd(a.lr),
        };
        let loss = if a.label_smoothing > 0.0 {
            LossKind::SmoothedCrossEntropy(a.label_smoothing)
        } else {
            LossKind::CrossEntropy
        };
        TrainConfig {
            checkpoint_dir:     a.checkpoint_dir,
            data_path:          a.data,
            csv_has_headers:    !a.no_header,
            epochs:             a.epochs,
            batch_size:         a.batch_size,
            hidden_size:        a.hidden_size,
            dropout:            a.dropout,
            loss,
            optimizer,
            track_accuracy:     !a.no_accuracy,
            resume:             !a.fresh,
            synthetic_samples:  a.samples,
            synthetic_features: a.features,
            synthetic_classes:  a.classes,
            seed:               a.seed,
            num_features:       None,
            num_classes:        None,
        }
    }
}

/// All arguments for the `checkpoints` command
#[derive(Args, Debug)]
pub struct CheckpointsArgs {
    /// Directory to scan
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
