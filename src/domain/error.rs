use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning a directory tree into a dataset.
///
/// Malformed lines (no tab) are not errors: the loader skips and counts them.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("data directory '{0}' does not exist")]
    MissingRoot(PathBuf),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid label '{value}' at {path}:{line}: {source}")]
    Label {
        path: PathBuf,
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("tokenisation failed at {path}:{line}: {reason}")]
    Tokenize { path: PathBuf, line: usize, reason: String },

    #[error("dataset is empty: no valid records found under '{0}'")]
    Empty(PathBuf),
}

/// Precondition violations on a batch handed to the classifier.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("sequence length mismatch: expected {expected}, got {actual}")]
    SequenceLength { expected: usize, actual: usize },

    #[error("token index {index} out of range for vocabulary of {vocab_size}")]
    TokenOutOfRange { index: i64, vocab_size: usize },

    #[error("lengths tensor has {actual} entries for a batch of {expected}")]
    LengthsMismatch { expected: usize, actual: usize },

    #[error("sequence length {length} outside 0..={max}")]
    LengthOutOfRange { length: i64, max: usize },
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid { field, reason: reason.into() }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VocabError {
    #[error("token '{token}' uses reserved index {index}")]
    ReservedIndex { token: String, index: u32 },

    #[error("token '{token}' has index {index}, past the last embedding row")]
    IndexTooLarge { token: String, index: u32 },

    #[error("index {index} is assigned to both '{first}' and '{second}'")]
    DuplicateIndex { index: u32, first: String, second: String },
}
