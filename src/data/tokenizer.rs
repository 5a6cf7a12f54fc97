// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// Splits text into word tokens with the `tokenizers` crate's
// Whitespace pre-tokenizer, which matches the pattern
//
//   \w+|[^\w\s]+
//
// so "don't stop!" becomes ["don", "'", "t", "stop", "!"].
// Runs of punctuation stay together, words stay whole.
//
// The tokenizer never changes case; the encoder lowercases
// the text before calling it.

use anyhow::Result;
use tokenizers::{
    pre_tokenizers::whitespace::Whitespace, OffsetReferential, OffsetType, PreTokenizedString,
    PreTokenizer,
};

use crate::domain::traits::Tokenize;

#[derive(Debug, Clone, Default)]
pub struct WordTokenizer {
    inner: Whitespace,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tokenize for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut pretokenized = PreTokenizedString::from(text);
        self.inner
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| anyhow::anyhow!("pre-tokenisation failed: {e}"))?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(token, _, _)| token.to_string())
            .collect())
    }
}
