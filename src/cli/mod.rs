// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands everything else to Layer 2 (application).
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "bilstm-classifier",
    version,
    about = "Train a bidirectional LSTM binary text classifier on tab-separated records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => run_train(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on records in: {}", args.data_dir);

    let use_case  = TrainUseCase::new(args.into())?;
    let summaries = use_case.execute()?;

    if let Some(last) = summaries.last() {
        println!(
            "Training complete after {} epochs. Final mean loss: {:.4}",
            last.epoch, last.mean_loss
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::{ComputeDevice, TrainConfig};
    use crate::ml::model::Pooling;

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["bilstm-classifier", "train"]).unwrap();
        let Commands::Train(args) = cli.command;
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg, TrainConfig::default());
    }

    #[test]
    fn test_train_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "bilstm-classifier", "train",
            "--data-dir", "d",
            "--max-seq-length", "12",
            "--epochs", "3",
            "--pooling", "last-position",
            "--device", "cpu",
            "--vocab", "v.json",
        ])
        .unwrap();
        let Commands::Train(args) = cli.command;
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.data_dir, "d");
        assert_eq!(cfg.max_seq_length, 12);
        assert_eq!(cfg.num_epochs, 3);
        assert_eq!(cfg.pooling, Pooling::LastPosition);
        assert_eq!(cfg.device, ComputeDevice::Cpu);
        assert_eq!(cfg.vocab_path.as_deref(), Some("v.json"));
    }

    #[test]
    fn test_rejects_unknown_pooling() {
        assert!(Cli::try_parse_from(["bilstm-classifier", "train", "--pooling", "mean"]).is_err());
    }
}
