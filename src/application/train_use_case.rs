// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Validate the configuration         (Layer 2)
//   Step 2: Load records from the data tree    (Layer 4 - data)
//   Step 3: Load or build the vocabulary       (Layer 6 - infra)
//   Step 4: Encode records into a dataset      (Layer 4 - data)
//   Step 5: Save config for the run            (Layer 6 - infra)
//   Step 6: Run training loop                  (Layer 5 - ml)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::TextDataset,
    encoder::SequenceEncoder,
    loader::RecordLoader,
    tokenizer::WordTokenizer,
};
use crate::domain::error::ConfigError;
use crate::domain::traits::{EpochReporter, EpochSummary, RecordSource, Tokenize};
use crate::infra::{
    metrics::{MetricsLogger, TracingReporter},
    run_store::RunStore,
    vocab_store::VocabStore,
};
use crate::ml::model::Pooling;
use crate::ml::trainer::run_training;

/// Where the tensors live during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputeDevice {
    Wgpu,
    Cpu,
}

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so the
// exact settings of a run are written next to its metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir:       String,
    pub output_dir:     String,
    pub vocab_path:     Option<String>,
    pub vocab_size:     usize,
    pub embedding_dim:  usize,
    pub hidden_dim:     usize,
    pub num_layers:     usize,
    pub num_classes:    usize,
    pub dropout:        f64,
    pub max_seq_length: usize,
    pub batch_size:     usize,
    pub num_epochs:     usize,
    pub learning_rate:  f64,
    pub seed:           u64,
    pub num_workers:    usize,
    pub pooling:        Pooling,
    pub device:         ComputeDevice,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir:       "preprocessed_data".to_string(),
            output_dir:     "runs".to_string(),
            vocab_path:     None,
            vocab_size:     10_000,
            embedding_dim:  300,
            hidden_dim:     128,
            num_layers:     2,
            num_classes:    1,
            dropout:        0.5,
            max_seq_length: 50,
            batch_size:     32,
            num_epochs:     5,
            learning_rate:  1e-3,
            seed:           42,
            num_workers:    1,
            pooling:        Pooling::LastToken,
            device:         ComputeDevice::Wgpu,
        }
    }
}

impl TrainConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("vocab_size", self.vocab_size),
            ("embedding_dim", self.embedding_dim),
            ("hidden_dim", self.hidden_dim),
            ("num_layers", self.num_layers),
            ("max_seq_length", self.max_seq_length),
            ("batch_size", self.batch_size),
            ("num_epochs", self.num_epochs),
            ("num_workers", self.num_workers),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be greater than zero"));
            }
        }
        if self.num_classes != 1 {
            return Err(ConfigError::invalid(
                "num_classes",
                format!("binary classifier needs exactly 1 output, got {}", self.num_classes),
            ));
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(ConfigError::invalid("dropout", format!("{} is outside [0, 1)", self.dropout)));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::invalid(
                "learning_rate",
                format!("{} is not a positive number", self.learning_rate),
            ));
        }
        if self.data_dir.is_empty() {
            return Err(ConfigError::invalid("data_dir", "must not be empty"));
        }
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Validates `config` up front so a bad value never reaches the data layer.
    pub fn new(config: TrainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<Vec<EpochSummary>> {
        let cfg = &self.config;

        // ── Step 2: Read every record under the data directory ────────────────
        tracing::info!("Loading records from '{}'", cfg.data_dir);
        let loader  = RecordLoader::new(&cfg.data_dir);
        let records = loader.load_all()?;

        // ── Step 3: Vocabulary ────────────────────────────────────────────────
        // An explicit vocabulary file wins; otherwise reuse or build one
        // in the output directory from the training texts.
        let tokenizer: Arc<dyn Tokenize> = Arc::new(WordTokenizer::new());
        let vocab_store = VocabStore::new(&cfg.output_dir);
        let vocab = match &cfg.vocab_path {
            Some(path) => VocabStore::load_file(Path::new(path))?,
            None => {
                let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
                vocab_store.load_or_build(&texts, cfg.vocab_size, tokenizer.as_ref())?
            }
        };
        if vocab.size() > cfg.vocab_size {
            return Err(ConfigError::invalid(
                "vocab_size",
                format!(
                    "{} embedding rows cannot hold a vocabulary needing {}",
                    cfg.vocab_size,
                    vocab.size()
                ),
            )
            .into());
        }
        if vocab.is_empty() {
            tracing::warn!("Vocabulary is empty: every token will encode as [UNK]");
        }
        tracing::info!("Vocabulary: {} words ({} embedding rows)", vocab.len(), vocab.size());

        // ── Step 4: Encode into a fixed-length dataset ───────────────────────
        let encoder = SequenceEncoder::new(Arc::new(vocab), tokenizer, cfg.max_seq_length);
        let dataset = TextDataset::new(&records, &encoder, loader.root())?;
        tracing::info!("Built dataset with {} examples", dataset.len());

        // ── Step 5: Record the configuration of this run ─────────────────────
        let run_store = RunStore::new(&cfg.output_dir)?;
        run_store.save_config(cfg)?;

        // ── Step 6: Train ─────────────────────────────────────────────────────
        let mut reporters: Vec<Box<dyn EpochReporter>> = vec![
            Box::new(TracingReporter),
            Box::new(
                MetricsLogger::new(&cfg.output_dir)
                    .with_context(|| format!("Cannot open metrics log in '{}'", cfg.output_dir))?,
            ),
        ];
        run_training(cfg, dataset, &mut reporters)
    }
}
