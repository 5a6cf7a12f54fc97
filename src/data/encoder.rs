// ============================================================
// Layer 4 — Sequence Encoder
// ============================================================
// Turns raw text into a fixed-length sequence of token indices.
//
//   1. lowercase the text
//   2. split into word tokens
//   3. keep the first `max_seq_length` tokens (truncate the end)
//   4. map each token through the vocabulary (unknown → UNK)
//   5. right-pad with PAD up to exactly `max_seq_length`
//
// Example with max_seq_length = 5:
//   "Great film , loved it !"  → [12, 40, 7, 88, 9]      (truncated)
//   "Dull"                     → [301, 0, 0, 0, 0]       (padded)
//
// The number of real tokens is returned alongside so pooling
// can find the last real position later.

use std::sync::Arc;

use crate::domain::error::DatasetError;
use crate::domain::record::{EncodedExample, Record};
use crate::domain::traits::Tokenize;
use crate::domain::vocabulary::{Vocabulary, PAD_INDEX};

#[derive(Clone)]
pub struct SequenceEncoder {
    vocab:          Arc<Vocabulary>,
    tokenizer:      Arc<dyn Tokenize>,
    max_seq_length: usize,
}

impl SequenceEncoder {
    pub fn new(vocab: Arc<Vocabulary>, tokenizer: Arc<dyn Tokenize>, max_seq_length: usize) -> Self {
        Self { vocab, tokenizer, max_seq_length }
    }

    /// Encode text into `(token_ids, real_length)`.
    pub fn encode(&self, text: &str) -> anyhow::Result<(Vec<u32>, usize)> {
        let lowered = text.to_lowercase();
        let tokens  = self.tokenizer.tokenize(&lowered)?;

        let mut ids: Vec<u32> = tokens
            .iter()
            .take(self.max_seq_length)
            .map(|t| self.vocab.lookup(t))
            .collect();
        let length = ids.len();
        ids.resize(self.max_seq_length, PAD_INDEX);

        Ok((ids, length))
    }

    pub fn encode_record(&self, record: &Record) -> Result<EncodedExample, DatasetError> {
        let (token_ids, length) = self.encode(&record.text).map_err(|e| DatasetError::Tokenize {
            path:   record.source.clone(),
            line:   record.line,
            reason: e.to_string(),
        })?;
        Ok(EncodedExample {
            token_ids,
            length,
            label: record.label as f32,
        })
    }
}

impl std::fmt::Debug for SequenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceEncoder")
            .field("vocab_len", &self.vocab.len())
            .field("max_seq_length", &self.max_seq_length)
            .finish()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tokenizer::WordTokenizer;
    use crate::domain::vocabulary::UNK_INDEX;

    fn encoder(max_len: usize) -> SequenceEncoder {
        let vocab = Vocabulary::from_tokens(["the", "movie", "was", "great", "bad"]);
        SequenceEncoder::new(Arc::new(vocab), Arc::new(WordTokenizer::new()), max_len)
    }

    #[test]
    fn test_length_is_always_max_seq_length() {
        let enc = encoder(4);
        for text in ["", "the", "the movie was great", "the movie was great and long and more"] {
            let (ids, _) = enc.encode(text).unwrap();
            assert_eq!(ids.len(), 4, "text: {text:?}");
        }
    }

    #[test]
    fn test_truncates_from_the_end() {
        let enc = encoder(3);
        let (long, len) = enc.encode("the movie was great bad bad").unwrap();
        let (prefix, _) = enc.encode("the movie was").unwrap();
        assert_eq!(long, prefix);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_short_text_is_padded_with_zero() {
        let enc = encoder(6);
        let (ids, len) = enc.encode("the movie").unwrap();
        assert_eq!(len, 2);
        assert!(ids[len..].iter().all(|&id| id == PAD_INDEX));
    }

    #[test]
    fn test_lowercases_before_lookup() {
        let enc = encoder(3);
        let (ids, _) = enc.encode("The MOVIE").unwrap();
        assert_eq!(ids, vec![2, 3, PAD_INDEX]);
    }

    #[test]
    fn test_unknown_words_are_not_padding() {
        let enc = encoder(3);
        let (ids, len) = enc.encode("spectacular").unwrap();
        assert_eq!(ids, vec![UNK_INDEX, PAD_INDEX, PAD_INDEX]);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_encode_record_converts_label_to_float() {
        let enc = encoder(2);
        let rec = Record::new("great", 1, "x.tsv", 1);
        let ex  = enc.encode_record(&rec).unwrap();
        assert_eq!(ex.label, 1.0);
        assert_eq!(ex.token_ids, vec![5, PAD_INDEX]);
    }

    struct FailingTokenizer;

    impl Tokenize for FailingTokenizer {
        fn tokenize(&self, _text: &str) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("tokenizer unavailable")
        }
    }

    #[test]
    fn test_tokenizer_failure_names_the_record() {
        let enc = SequenceEncoder::new(Arc::new(Vocabulary::default()), Arc::new(FailingTokenizer), 3);
        let err = enc.encode_record(&Record::new("text", 0, "data/a.tsv", 7)).unwrap_err();
        match err {
            DatasetError::Tokenize { path, line, reason } => {
                assert_eq!(path, std::path::PathBuf::from("data/a.tsv"));
                assert_eq!(line, 7);
                assert!(reason.contains("unavailable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
