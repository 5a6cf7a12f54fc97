// ============================================================
// Layer 4 — Record Loader
// ============================================================
// Walks a directory tree and reads every file as lines of
// tab-separated records:
//
//   <text>\t<label>[\t<ignored>...]
//
// Per-line handling:
//   - blank line            → skipped quietly
//   - fewer than 2 fields   → skipped, counted as malformed
//   - label not an integer  → fatal for the whole load
//
// Files are visited in file-name order at every directory
// level so repeated runs see records in the same order.
//
// Reference: walkdir crate documentation
//            Rust Book §9 (Error Handling)

use std::{
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::domain::error::DatasetError;
use crate::domain::record::Record;
use crate::domain::traits::RecordSource;

/// Counters collected during one load, logged when it finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub files:     usize,
    pub records:   usize,
    pub malformed: usize,
    pub blank:     usize,
}

/// Loads every record under a root directory.
/// Implements the RecordSource trait from Layer 3.
pub struct RecordLoader {
    root: PathBuf,
}

impl RecordLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Like `load_all`, but also returns the load counters.
    pub fn load_with_stats(&self) -> Result<(Vec<Record>, LoadStats), DatasetError> {
        if !self.root.exists() {
            return Err(DatasetError::MissingRoot(self.root.clone()));
        }

        let mut records = Vec::new();
        let mut stats   = LoadStats::default();

        for entry in WalkDir::new(&self.root).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
                DatasetError::Io { path, source: e.into() }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            tracing::debug!("Reading file: {}", entry.path().display());
            let text = fs::read_to_string(entry.path()).map_err(|source| DatasetError::Io {
                path: entry.path().to_path_buf(),
                source,
            })?;

            stats.files += 1;
            parse_lines(entry.path(), &text, &mut records, &mut stats)?;
        }

        stats.records = records.len();
        tracing::info!(
            "Loaded {} records from {} files ({} malformed lines skipped, {} blank)",
            stats.records,
            stats.files,
            stats.malformed,
            stats.blank
        );
        Ok((records, stats))
    }
}

impl RecordSource for RecordLoader {
    fn load_all(&self) -> Result<Vec<Record>, DatasetError> {
        self.load_with_stats().map(|(records, _)| records)
    }
}

/// Parse one file's contents, appending valid records.
fn parse_lines(
    path:    &Path,
    text:    &str,
    records: &mut Vec<Record>,
    stats:   &mut LoadStats,
) -> Result<(), DatasetError> {
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line    = raw.trim();

        if line.is_empty() {
            stats.blank += 1;
            continue;
        }

        let mut fields = line.split('\t');
        let (Some(text), Some(label)) = (fields.next(), fields.next()) else {
            stats.malformed += 1;
            tracing::warn!("Skipping malformed line {}:{}: {:?}", path.display(), line_no, line);
            continue;
        };

        let label_str = label.trim();
        let label = label_str.parse::<i64>().map_err(|source| DatasetError::Label {
            path:  path.to_path_buf(),
            line:  line_no,
            value: label_str.to_string(),
            source,
        })?;

        records.push(Record::new(text, label, path, line_no));
    }
    Ok(())
}
