use burn::{
    nn::{
        loss::BinaryCrossEntropyLoss,
        BiLstm, BiLstmConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::domain::error::ModelError;

/// Which encoder position feeds the linear head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pooling {
    /// Always position `max_seq_length - 1`, which is padding for short texts.
    LastPosition,
    /// Position of each example's last real token.
    LastToken,
}

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    pub vocab_size:     usize,
    pub embedding_dim:  usize,
    pub hidden_dim:     usize,
    pub num_layers:     usize,
    pub max_seq_length: usize,
    #[config(default = 1)]
    pub num_classes:    usize,
    #[config(default = 0.5)]
    pub dropout:        f64,
    #[config(default = "Pooling::LastToken")]
    pub pooling:        Pooling,
}

impl ClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> BiLstmClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);

        // First layer reads embeddings, later layers read both directions of the one below.
        let encoder: Vec<BiLstm<B>> = (0..self.num_layers)
            .map(|i| {
                let d_input = if i == 0 { self.embedding_dim } else { 2 * self.hidden_dim };
                BiLstmConfig::new(d_input, self.hidden_dim, true).init(device)
            })
            .collect();

        let layer_dropout = DropoutConfig::new(self.dropout).init();
        let dropout       = DropoutConfig::new(self.dropout).init();
        let head          = LinearConfig::new(2 * self.hidden_dim, self.num_classes).init(device);

        BiLstmClassifier {
            embedding,
            encoder,
            layer_dropout,
            dropout,
            head,
            vocab_size:      self.vocab_size,
            max_seq_length:  self.max_seq_length,
            pool_last_token: self.pooling == Pooling::LastToken,
        }
    }
}

#[derive(Module, Debug)]
pub struct BiLstmClassifier<B: Backend> {
    pub embedding:     Embedding<B>,
    pub encoder:       Vec<BiLstm<B>>,
    pub layer_dropout: Dropout,
    pub dropout:       Dropout,
    pub head:          Linear<B>,
    vocab_size:        usize,
    max_seq_length:    usize,
    pool_last_token:   bool,
}

impl<B: Backend> BiLstmClassifier<B> {
    /// Reject batches the model cannot score correctly.
    pub fn check_batch(
        &self,
        tokens:  &Tensor<B, 2, Int>,
        lengths: &Tensor<B, 1, Int>,
    ) -> Result<(), ModelError> {
        let [batch_size, seq_len] = tokens.dims();
        if seq_len != self.max_seq_length {
            return Err(ModelError::SequenceLength { expected: self.max_seq_length, actual: seq_len });
        }
        let [n_lengths] = lengths.dims();
        if n_lengths != batch_size {
            return Err(ModelError::LengthsMismatch { expected: batch_size, actual: n_lengths });
        }
        if batch_size == 0 {
            return Ok(());
        }

        let min = tokens.clone().min().into_scalar().elem::<i64>();
        if min < 0 {
            return Err(ModelError::TokenOutOfRange { index: min, vocab_size: self.vocab_size });
        }
        let max = tokens.clone().max().into_scalar().elem::<i64>();
        if max >= self.vocab_size as i64 {
            return Err(ModelError::TokenOutOfRange { index: max, vocab_size: self.vocab_size });
        }

        // Pooling gathers at length - 1, so every length must land inside the sequence
        let shortest = lengths.clone().min().into_scalar().elem::<i64>();
        if shortest < 0 {
            return Err(ModelError::LengthOutOfRange { length: shortest, max: seq_len });
        }
        let longest = lengths.clone().max().into_scalar().elem::<i64>();
        if longest > seq_len as i64 {
            return Err(ModelError::LengthOutOfRange { length: longest, max: seq_len });
        }
        Ok(())
    }

    /// Validated forward pass.
    pub fn try_forward(
        &self,
        tokens:  Tensor<B, 2, Int>,
        lengths: Tensor<B, 1, Int>,
    ) -> Result<Tensor<B, 2>, ModelError> {
        self.check_batch(&tokens, &lengths)?;
        Ok(self.forward(tokens, lengths))
    }

    /// tokens: [batch, seq_len], lengths: [batch] → logits: [batch, num_classes]
    pub fn forward(&self, tokens: Tensor<B, 2, Int>, lengths: Tensor<B, 1, Int>) -> Tensor<B, 2> {
        let [batch_size, seq_len] = tokens.dims();

        let mut x = self.embedding.forward(tokens); // [batch, seq_len, embedding_dim]
        for (i, layer) in self.encoder.iter().enumerate() {
            if i > 0 {
                x = self.layer_dropout.forward(x);
            }
            let (output, _state) = layer.forward(x, None);
            x = output; // [batch, seq_len, 2 * hidden_dim]
        }

        // Dropout over every position, not only the pooled one
        let x = self.dropout.forward(x);
        let [_, _, features] = x.dims();

        let pooled = if self.pool_last_token {
            let index = lengths
                .sub_scalar(1)
                .clamp_min(0)
                .reshape([batch_size, 1, 1])
                .expand([batch_size, 1, features]);
            x.gather(1, index)
        } else {
            x.slice([0..batch_size, seq_len - 1..seq_len, 0..features])
        };

        self.head.forward(pooled.reshape([batch_size, features]))
    }

    /// Scalar binary cross-entropy for one batch. `loss` must be built with logits enabled.
    pub fn forward_loss(
        &self,
        tokens:  Tensor<B, 2, Int>,
        lengths: Tensor<B, 1, Int>,
        targets: Tensor<B, 1, Int>,
        loss:    &BinaryCrossEntropyLoss<B>,
    ) -> Result<Tensor<B, 1>, ModelError> {
        let logits = self.try_forward(tokens, lengths)?;
        let [batch_size, _] = logits.dims();
        Ok(loss.forward(logits.reshape([batch_size]), targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use burn::module::AutodiffModule;
    use burn::nn::loss::BinaryCrossEntropyLossConfig;
    use burn::tensor::TensorData;

    type TestBackend = NdArray;

    fn config(pooling: Pooling) -> ClassifierConfig {
        ClassifierConfig::new(20, 8, 6, 2, 5)
            .with_dropout(0.0)
            .with_pooling(pooling)
    }

    fn ints<const D: usize>(values: Vec<i64>, shape: [usize; D]) -> Tensor<TestBackend, D, Int> {
        Tensor::from_data(TensorData::new(values, shape), &Default::default())
    }

    fn to_vec(t: Tensor<TestBackend, 2>) -> Vec<f32> {
        t.into_data().convert::<f32>().to_vec().unwrap()
    }

    #[test]
    fn test_output_shape() {
        let _rng = crate::ml::backend_rng_guard();
        let model: BiLstmClassifier<TestBackend> = config(Pooling::LastToken).init(&Default::default());
        let tokens  = ints(vec![2, 3, 4, 0, 0, 5, 6, 0, 0, 0, 7, 8, 9, 10, 11], [3, 5]);
        let lengths = ints(vec![3, 2, 5], [3]);
        let logits  = model.try_forward(tokens, lengths).unwrap();
        assert_eq!(logits.dims(), [3, 1]);
    }

    #[test]
    fn test_all_padding_gives_finite_logit() {
        let _rng = crate::ml::backend_rng_guard();
        for pooling in [Pooling::LastToken, Pooling::LastPosition] {
            let model: BiLstmClassifier<TestBackend> = config(pooling).init(&Default::default());
            let logits = model
                .try_forward(ints(vec![0; 10], [2, 5]), ints(vec![0, 0], [2]))
                .unwrap();
            assert!(to_vec(logits).iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_wrong_sequence_length_fails_fast() {
        let _rng = crate::ml::backend_rng_guard();
        let model: BiLstmClassifier<TestBackend> = config(Pooling::LastToken).init(&Default::default());
        let err = model
            .try_forward(ints(vec![1; 8], [2, 4]), ints(vec![4, 4], [2]))
            .unwrap_err();
        assert_eq!(err, ModelError::SequenceLength { expected: 5, actual: 4 });
    }

    #[test]
    fn test_token_out_of_range_fails_fast() {
        let _rng = crate::ml::backend_rng_guard();
        let model: BiLstmClassifier<TestBackend> = config(Pooling::LastToken).init(&Default::default());
        let err = model
            .try_forward(ints(vec![1, 2, 3, 4, 20], [1, 5]), ints(vec![5], [1]))
            .unwrap_err();
        assert_eq!(err, ModelError::TokenOutOfRange { index: 20, vocab_size: 20 });

        let err = model
            .try_forward(ints(vec![-1, 2, 3, 4, 5], [1, 5]), ints(vec![5], [1]))
            .unwrap_err();
        assert_eq!(err, ModelError::TokenOutOfRange { index: -1, vocab_size: 20 });
    }

    #[test]
    fn test_lengths_must_match_batch() {
        let _rng = crate::ml::backend_rng_guard();
        let model: BiLstmClassifier<TestBackend> = config(Pooling::LastToken).init(&Default::default());
        let err = model
            .try_forward(ints(vec![1; 10], [2, 5]), ints(vec![5], [1]))
            .unwrap_err();
        assert_eq!(err, ModelError::LengthsMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_length_beyond_sequence_fails_fast() {
        let _rng = crate::ml::backend_rng_guard();
        let model: BiLstmClassifier<TestBackend> = config(Pooling::LastToken).init(&Default::default());
        let err = model
            .try_forward(ints(vec![1, 2, 3, 4, 5], [1, 5]), ints(vec![9], [1]))
            .unwrap_err();
        assert_eq!(err, ModelError::LengthOutOfRange { length: 9, max: 5 });

        let err = model
            .try_forward(ints(vec![1; 10], [2, 5]), ints(vec![5, -1], [2]))
            .unwrap_err();
        assert_eq!(err, ModelError::LengthOutOfRange { length: -1, max: 5 });
    }

    #[test]
    fn test_full_and_empty_lengths_are_accepted() {
        let _rng = crate::ml::backend_rng_guard();
        let model: BiLstmClassifier<TestBackend> = config(Pooling::LastToken).init(&Default::default());
        let logits = model
            .try_forward(ints(vec![1; 10], [2, 5]), ints(vec![5, 0], [2]))
            .unwrap();
        assert_eq!(logits.dims(), [2, 1]);
    }

    #[test]
    fn test_pooling_agrees_on_full_length_sequences() {
        let _rng = crate::ml::backend_rng_guard();
        let device  = Default::default();
        let model: BiLstmClassifier<TestBackend> = config(Pooling::LastToken).init(&device);
        let tokens  = ints(vec![2, 3, 4, 5, 6, 7, 8, 9, 10, 11], [2, 5]);
        let lengths = ints(vec![5, 5], [2]);

        let by_token    = to_vec(model.forward(tokens.clone(), lengths.clone()));
        let model       = BiLstmClassifier { pool_last_token: false, ..model };
        let by_position = to_vec(model.forward(tokens, lengths));

        for (a, b) in by_token.iter().zip(&by_position) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn test_forward_loss_is_finite_scalar() {
        let _rng = crate::ml::backend_rng_guard();
        let device = Default::default();
        let model: BiLstmClassifier<TestBackend> = config(Pooling::LastToken).init(&device);
        let loss_fn = BinaryCrossEntropyLossConfig::new().with_logits(true).init(&device);

        let loss = model
            .forward_loss(
                ints(vec![2, 3, 0, 0, 0, 4, 0, 0, 0, 0], [2, 5]),
                ints(vec![2, 1], [2]),
                ints(vec![1, 0], [2]),
                &loss_fn,
            )
            .unwrap();
        assert_eq!(loss.dims(), [1]);
        let value = loss.into_scalar().elem::<f32>();
        assert!(value.is_finite() && value > 0.0);
    }

    #[test]
    fn test_single_layer_has_one_encoder() {
        let _rng = crate::ml::backend_rng_guard();
        let model: BiLstmClassifier<TestBackend> = ClassifierConfig::new(10, 4, 3, 1, 6)
            .init(&Default::default());
        assert_eq!(model.encoder.len(), 1);
        assert_eq!(model.max_seq_length, 6);
        assert!(model.pool_last_token);
    }

    #[test]
    fn test_dropout_is_identity_in_evaluation() {
        let _rng  = crate::ml::backend_rng_guard();
        let model: BiLstmClassifier<Autodiff<TestBackend>> = ClassifierConfig::new(20, 8, 6, 2, 5)
            .with_dropout(0.5)
            .init(&Default::default());
        let model = model.valid();

        let tokens  = ints(vec![2, 3, 4, 0, 0, 5, 6, 7, 8, 9], [2, 5]);
        let lengths = ints(vec![3, 5], [2]);
        let first   = to_vec(model.forward(tokens.clone(), lengths.clone()));
        let second  = to_vec(model.forward(tokens, lengths));
        assert_eq!(first, second);
    }
}
