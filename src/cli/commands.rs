// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `train` subcommand and all its flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::train_use_case::{ComputeDevice, TrainConfig};
use crate::ml::model::Pooling;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the BiLSTM classifier on a directory of tab-separated files
    Train(TrainArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolingArg {
    /// Pool at each example's last real token
    LastToken,
    /// Pool at the final position, padding or not
    LastPosition,
}

impl From<PoolingArg> for Pooling {
    fn from(p: PoolingArg) -> Self {
        match p {
            PoolingArg::LastToken    => Pooling::LastToken,
            PoolingArg::LastPosition => Pooling::LastPosition,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceArg {
    /// GPU through WGPU
    Wgpu,
    /// CPU through ndarray
    Cpu,
}

impl From<DeviceArg> for ComputeDevice {
    fn from(d: DeviceArg) -> Self {
        match d {
            DeviceArg::Wgpu => ComputeDevice::Wgpu,
            DeviceArg::Cpu  => ComputeDevice::Cpu,
        }
    }
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Root directory; every file below it is read as `<text>\t<label>` lines
    #[arg(long, default_value = "preprocessed_data")]
    pub data_dir: String,

    /// Directory for vocab.json, train_config.json and metrics.csv
    #[arg(long, default_value = "runs")]
    pub output_dir: String,

    /// JSON vocabulary file (token → index, indices ≥ 2).
    /// Built from the data when omitted.
    #[arg(long)]
    pub vocab: Option<String>,

    /// Rows in the embedding table, including [PAD] and [UNK]
    #[arg(long, default_value_t = 10_000)]
    pub vocab_size: usize,

    /// Width of each word embedding
    #[arg(long, default_value_t = 300)]
    pub embedding_dim: usize,

    /// LSTM hidden size per direction
    #[arg(long, default_value_t = 128)]
    pub hidden_dim: usize,

    /// Number of stacked bidirectional LSTM layers
    #[arg(long, default_value_t = 2)]
    pub num_layers: usize,

    /// Output width; only 1 is supported
    #[arg(long, default_value_t = 1)]
    pub num_classes: usize,

    /// Dropout probability, also used between LSTM layers
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,

    /// Every text is truncated or padded to this many tokens
    #[arg(long, default_value_t = 50)]
    pub max_seq_length: usize,

    /// Examples per mini-batch
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Full passes over the dataset
    #[arg(long, default_value_t = 5)]
    pub epochs: usize,

    /// Adam step size
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Seed for parameter initialisation and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Threads prefetching batches
    #[arg(long, default_value_t = 1)]
    pub num_workers: usize,

    /// Which encoder position feeds the classifier head
    #[arg(long, value_enum, default_value_t = PoolingArg::LastToken)]
    pub pooling: PoolingArg,

    /// Compute device
    #[arg(long, value_enum, default_value_t = DeviceArg::Wgpu)]
    pub device: DeviceArg,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir:       a.data_dir,
            output_dir:     a.output_dir,
            vocab_path:     a.vocab,
            vocab_size:     a.vocab_size,
            embedding_dim:  a.embedding_dim,
            hidden_dim:     a.hidden_dim,
            num_layers:     a.num_layers,
            num_classes:    a.num_classes,
            dropout:        a.dropout,
            max_seq_length: a.max_seq_length,
            batch_size:     a.batch_size,
            num_epochs:     a.epochs,
            learning_rate:  a.lr,
            seed:           a.seed,
            num_workers:    a.num_workers,
            pooling:        a.pooling.into(),
            device:         a.device.into(),
        }
    }
}
