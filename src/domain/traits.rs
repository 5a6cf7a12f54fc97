// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers. The application layer talks to
// these traits, so a different record source, tokenizer or
// progress sink can be dropped in without touching the
// training code.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::error::DatasetError;
use crate::domain::record::Record;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce labelled records.
///
/// Implementations:
///   - RecordLoader → walks a directory of tab-separated files
pub trait RecordSource {
    /// Load every valid record. Malformed lines are skipped;
    /// unreadable files and unparseable labels are errors.
    fn load_all(&self) -> Result<Vec<Record>, DatasetError>;
}

// ─── Tokenize ─────────────────────────────────────────────────────────────────
/// Splits already-lowercased text into word tokens.
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}

// ─── EpochReporter ────────────────────────────────────────────────────────────
/// Summary of one completed training epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochSummary {
    /// 1-based epoch number
    pub epoch: usize,

    /// Total epochs in this run
    pub num_epochs: usize,

    /// Mean binary cross-entropy across the epoch's mini-batches
    pub mean_loss: f64,

    /// Number of mini-batches processed
    pub batches: usize,
}

/// Receives one call per completed epoch.
///
/// Implementations:
///   - TracingReporter → logs the summary
///   - MetricsLogger   → appends a CSV row
pub trait EpochReporter {
    fn report(&mut self, summary: &EpochSummary) -> Result<()>;
}

/// Fan a summary out to several reporters, in order.
impl EpochReporter for Vec<Box<dyn EpochReporter>> {
    fn report(&mut self, summary: &EpochSummary) -> Result<()> {
        for reporter in self.iter_mut() {
            reporter.report(summary)?;
        }
        Ok(())
    }
}
