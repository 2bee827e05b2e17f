// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
//
// Two commands are supported:
//   1. `train`       — resume from the latest checkpoint (if any),
//                      train, save a new checkpoint
//   2. `checkpoints` — list checkpoints in a directory
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{CheckpointsArgs, Commands, TrainArgs};

/// The main CLI struct
#[derive(Parser, Debug)]
#[command(
    name = "resumable-train",
    version,
    about = "Train a model in resumable steps, with epoch-numbered weight checkpoints."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)       => run_train(args),
            Commands::Checkpoints(args) => run_checkpoints(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Checkpoint directory: {}", args.checkpoint_dir);

    let report = TrainUseCase::new(args.into()).execute()?;

    match &report.resumed_from {
        Some(path) => println!(
            "Resumed from '{}' at epoch {}.",
            path.display(),
            report.start_epoch
        ),
        None => println!("Started at epoch 0."),
    }
    if let Some(last) = report.summaries.last() {
        println!(
            "Epoch {}: mean loss {:.4}, mean accuracy {:.2}%",
            last.epoch, last.mean_loss, last.mean_accuracy
        );
    }
    println!(
        "Now at epoch {}. Checkpoint saved to '{}'.",
        report.end_epoch,
        report.checkpoint.display()
    );
    Ok(())
}

fn run_checkpoints(args: CheckpointsArgs) -> Result<()> {
    use crate::application::list_use_case::ListCheckpointsUseCase;

    let entries = ListCheckpointsUseCase::new(&args.checkpoint_dir).execute()?;
    if entries.is_empty() {
        println!("No checkpoints in '{}'.", args.checkpoint_dir);
        return Ok(());
    }

    println!("{:<20} {:>8}  file", "written", "epoch");
    for entry in &entries {
        let written = entry
            .name
            .written_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| entry.name.timestamp().to_string());
        println!("{:<20} {:>8}  {}", written, entry.epoch(), entry.path.display());
    }
    if let Some(latest) = entries.last() {
        println!("\nLatest: epoch {}", latest.epoch());
    }
    Ok(())
}
