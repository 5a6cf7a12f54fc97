// ============================================================
// Layer 4 — Classification Batcher
// ============================================================
// Implements Burn's Batcher trait to stack EncodedExamples
// into tensors for one mini-batch.
//
//   Input:  Vec of N EncodedExamples, each with S token ids
//   Output: ClassificationBatch
//             tokens   [N, S]  Int
//             lengths  [N]     Int   (real tokens per row)
//             targets  [N]     Int   (labels for the loss)
//
// Every example is already padded to the same length, so the
// token ids are flattened row by row and reshaped to [N, S].
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::domain::record::EncodedExample;

/// A batch ready for the classifier forward pass.
#[derive(Debug, Clone)]
pub struct ClassificationBatch<B: Backend> {
    /// Token indices — shape: [batch_size, max_seq_length]
    pub tokens: Tensor<B, 2, Int>,

    /// Number of real tokens per example — shape: [batch_size]
    pub lengths: Tensor<B, 1, Int>,

    /// Labels as integers — shape: [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug, Default)]
pub struct ClassificationBatcher;

impl ClassificationBatcher {
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Batcher<B, EncodedExample, ClassificationBatch<B>> for ClassificationBatcher {
    fn batch(&self, items: Vec<EncodedExample>, device: &B::Device) -> ClassificationBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, |e| e.token_ids.len());

        let token_flat: Vec<B::IntElem> = items
            .iter()
            .flat_map(|e| e.token_ids.iter().map(|&id| (id as i64).elem()))
            .collect();

        let lengths: Vec<B::IntElem> = items
            .iter()
            .map(|e| (e.length as i64).elem())
            .collect();

        // Labels are stored as floats but are whole numbers by construction
        let targets: Vec<B::IntElem> = items
            .iter()
            .map(|e| (e.label.round() as i64).elem())
            .collect();

        let tokens = Tensor::<B, 2, Int>::from_data(
            TensorData::new(token_flat, [batch_size, seq_len]),
            device,
        );
        let lengths = Tensor::<B, 1, Int>::from_data(TensorData::new(lengths, [batch_size]), device);
        let targets = Tensor::<B, 1, Int>::from_data(TensorData::new(targets, [batch_size]), device);

        ClassificationBatch { tokens, lengths, targets }
    }
}
