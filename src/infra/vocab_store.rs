// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Loads a token → index vocabulary from JSON, or builds one
// from the training texts when none exists yet.
//
// File format (vocab.json):
//   { "movie": 2, "the": 1, ... }
//
// Index 0 is [PAD] and never appears in the file. Words start
// at 1; Vocabulary moves them up one row so [UNK] gets row 1.
//
// Building keeps the most frequent lowercase word tokens,
// ties broken alphabetically so the same corpus always gives
// the same file.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::domain::traits::Tokenize;
use crate::domain::vocabulary::{Vocabulary, RESERVED};

pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join("vocab.json")
    }

    /// Load existing vocabulary or build a new one from texts
    pub fn load_or_build(
        &self,
        texts:      &[&str],
        vocab_size: usize,
        tokenizer:  &dyn Tokenize,
    ) -> Result<Vocabulary> {
        let path = self.path();
        if path.exists() {
            tracing::info!("Loading existing vocabulary from '{}'", path.display());
            Self::load_file(&path)
        } else {
            tracing::info!("Building new vocabulary (vocab_size={})", vocab_size);
            let vocab = build(texts, vocab_size, tokenizer)?;
            self.save(&vocab)?;
            Ok(vocab)
        }
    }

    pub fn load_file(path: &Path) -> Result<Vocabulary> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read vocabulary from '{}'", path.display()))?;
        let map: HashMap<String, u32> = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a token → index JSON object", path.display()))?;
        Vocabulary::from_map(map)
            .with_context(|| format!("Invalid vocabulary in '{}'", path.display()))
    }

    pub fn save(&self, vocab: &Vocabulary) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        // Sorted keys so the file diffs cleanly between runs
        let ordered = vocab.to_file_map();

        let path = self.path();
        fs::write(&path, serde_json::to_string_pretty(&ordered)?)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;

        tracing::debug!("Saved {} words to '{}'", vocab.len(), path.display());
        Ok(())
    }
}

/// Keep the `vocab_size - RESERVED` most frequent tokens.
pub fn build(texts: &[&str], vocab_size: usize, tokenizer: &dyn Tokenize) -> Result<Vocabulary> {
    let mut freq: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for token in tokenizer.tokenize(&text.to_lowercase())? {
            *freq.entry(token).or_insert(0) += 1;
        }
    }

    let mut words: Vec<(String, usize)> = freq.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(vocab_size.saturating_sub(RESERVED as usize));

    Ok(Vocabulary::from_tokens(words.into_iter().map(|(w, _)| w)))
}
