// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a directory of text files and a batch
// of tensors:
//
//   *.tsv / *.txt files (any nesting)
//       │
//       ▼
//   RecordLoader      → walks the tree, splits lines on tabs
//       │
//       ▼
//   SequenceEncoder   → lowercase, tokenize, map, truncate, pad
//       │
//       ▼
//   TextDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   ClassificationBatcher → stacks examples into tensors
//       │
//       ▼
//   DataLoader        → shuffled mini-batches for training
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads tab-separated records from a directory tree
pub mod loader;

/// Word tokenizer built on the tokenizers crate
pub mod tokenizer;

/// Text → fixed-length token index sequence
pub mod encoder;

/// Implements Burn's Dataset trait for encoded examples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
