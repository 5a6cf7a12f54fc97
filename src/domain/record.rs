// ============================================================
// Layer 3 — Record and EncodedExample
// ============================================================
// A Record is one `<text>\t<label>` line as read from disk.
// An EncodedExample is the same record after tokenisation:
// a fixed-length sequence of token indices plus a float label.
//
// Example with max_seq_length = 6:
//   Record:  text = "Good movie", label = 1
//   Encoded: token_ids = [17, 342, 0, 0, 0, 0], length = 2, label = 1.0

use std::path::PathBuf;

/// One labelled line from a data file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Raw text field (first tab-separated column)
    pub text: String,

    /// Integer label (second column). Expected 0 or 1 but not enforced.
    pub label: i64,

    /// File the record was read from, kept for diagnostics
    pub source: PathBuf,

    /// 1-based line number within `source`
    pub line: usize,
}

impl Record {
    pub fn new(text: impl Into<String>, label: i64, source: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            text: text.into(),
            label,
            source: source.into(),
            line,
        }
    }
}

/// A record ready for batching.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedExample {
    /// Exactly `max_seq_length` token indices, right-padded with PAD
    pub token_ids: Vec<u32>,

    /// Number of real (non-padding) tokens at the front of `token_ids`
    pub length: usize,

    /// 0.0 or 1.0 for well-formed data
    pub label: f32,
}
