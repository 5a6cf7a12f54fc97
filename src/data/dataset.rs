use std::path::Path;

use burn::data::dataset::Dataset;

use crate::data::encoder::SequenceEncoder;
use crate::domain::error::DatasetError;
use crate::domain::record::{EncodedExample, Record};

/// Encoded examples, built once and never mutated.
/// An empty dataset cannot be constructed.
#[derive(Debug, Clone)]
pub struct TextDataset {
    examples: Vec<EncodedExample>,
}

impl TextDataset {
    /// Encode `records` in order. Fails with `DatasetError::Empty`
    /// if there is nothing to encode.
    pub fn new(
        records: &[Record],
        encoder: &SequenceEncoder,
        origin:  &Path,
    ) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty(origin.to_path_buf()));
        }
        let examples = records
            .iter()
            .map(|r| encoder.encode_record(r))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { examples })
    }
}

impl Dataset<EncodedExample> for TextDataset {
    fn get(&self, index: usize) -> Option<EncodedExample> {
        self.examples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.examples.len()
    }
}
