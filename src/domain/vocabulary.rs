// ============================================================
// Layer 3 — Vocabulary
// ============================================================
// Immutable mapping from lowercase word token to embedding row.
//
// Two rows are reserved and never assigned to a real word:
//   0 = [PAD]  fills the tail of short sequences
//   1 = [UNK]  stands in for any word not in the vocabulary
//
// Keeping them apart lets the model (and anyone reading an
// encoded sequence) tell "no word here" from "a word we never saw".
//
// Vocabulary files only reserve index 0, so real words there
// start at 1. Every file index moves up one row on load and
// back down on save:
//
//   file  { "the": 1, "movie": 2 }
//   rows  the → 2, movie → 3        (1 stays [UNK])
//
// Reference: Rust Book §8 (Hash Maps)

use std::collections::{BTreeMap, HashMap};

use crate::domain::error::VocabError;

pub const PAD_INDEX: u32 = 0;
pub const UNK_INDEX: u32 = 1;

/// Number of reserved rows at the start of the embedding table
pub const RESERVED: u32 = 2;

/// Rows reserved in memory but not in vocabulary files
const FILE_SHIFT: u32 = RESERVED - 1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    index: HashMap<String, u32>,
}

impl Vocabulary {
    /// Assign consecutive indices (starting after the reserved rows)
    /// to tokens in iteration order. Repeated tokens keep their first index.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        let mut next  = RESERVED;
        for token in tokens {
            index.entry(token.into()).or_insert_with(|| {
                let id = next;
                next += 1;
                id
            });
        }
        Self { index }
    }

    /// Take a mapping in vocabulary-file indices (index 0 reserved,
    /// words from 1). Index 0, duplicate indices and indices with no
    /// row left after the shift are rejected.
    pub fn from_map(map: HashMap<String, u32>) -> Result<Self, VocabError> {
        let mut seen: HashMap<u32, &str> = HashMap::with_capacity(map.len());
        for (token, &id) in &map {
            if id == PAD_INDEX {
                return Err(VocabError::ReservedIndex { token: token.clone(), index: id });
            }
            if id > u32::MAX - FILE_SHIFT {
                return Err(VocabError::IndexTooLarge { token: token.clone(), index: id });
            }
            if let Some(first) = seen.insert(id, token) {
                // Order the pair so the message is stable across runs
                let (first, second) = if first < token.as_str() {
                    (first, token.as_str())
                } else {
                    (token.as_str(), first)
                };
                return Err(VocabError::DuplicateIndex {
                    index: id,
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }

        let index = map.into_iter().map(|(token, id)| (token, id + FILE_SHIFT)).collect();
        Ok(Self { index })
    }

    /// The mapping in vocabulary-file indices, sorted by token.
    pub fn to_file_map(&self) -> BTreeMap<&str, u32> {
        self.index
            .iter()
            .map(|(token, &id)| (token.as_str(), id - FILE_SHIFT))
            .collect()
    }

    /// Index for `token`, or UNK_INDEX if the token is unknown.
    pub fn lookup(&self, token: &str) -> u32 {
        self.index.get(token).copied().unwrap_or(UNK_INDEX)
    }

    /// Number of real (non-reserved) entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Minimum number of embedding rows needed to look up every index.
    pub fn size(&self) -> usize {
        self.index
            .values()
            .max()
            .map_or(RESERVED as usize, |&max| max as usize + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_token_maps_to_unk() {
        let v = Vocabulary::from_tokens(["good", "bad"]);
        assert_eq!(v.lookup("excellent"), UNK_INDEX);
        assert_ne!(v.lookup("excellent"), PAD_INDEX);
    }

    #[test]
    fn test_real_tokens_skip_reserved_rows() {
        let v = Vocabulary::from_tokens(["good", "bad", "good"]);
        assert_eq!(v.lookup("good"), 2);
        assert_eq!(v.lookup("bad"), 3);
        assert_eq!(v.len(), 2);
        assert_eq!(v.size(), 4);
    }

    #[test]
    fn test_empty_vocabulary_still_has_reserved_rows() {
        let v = Vocabulary::default();
        assert!(v.is_empty());
        assert_eq!(v.size(), 2);
    }

    #[test]
    fn test_from_map_rejects_reserved_index() {
        let map = HashMap::from([("the".to_string(), 0u32)]);
        let err = Vocabulary::from_map(map).unwrap_err();
        assert_eq!(err, VocabError::ReservedIndex { token: "the".into(), index: 0 });
    }

    #[test]
    fn test_from_map_rejects_duplicate_index() {
        let map = HashMap::from([("a".to_string(), 5u32), ("b".to_string(), 5u32)]);
        let err = Vocabulary::from_map(map).unwrap_err();
        assert_eq!(
            err,
            VocabError::DuplicateIndex { index: 5, first: "a".into(), second: "b".into() }
        );
    }

    #[test]
    fn test_size_follows_highest_index() {
        let map = HashMap::from([("x".to_string(), 2u32), ("y".to_string(), 9u32)]);
        let v = Vocabulary::from_map(map).unwrap();
        assert_eq!(v.size(), 11);
        assert_eq!(v.lookup("y"), 10);
    }

    #[test]
    fn test_file_indices_from_one_shift_past_unk() {
        let map = HashMap::from([("the".to_string(), 1u32), ("movie".to_string(), 2u32)]);
        let v = Vocabulary::from_map(map).unwrap();
        assert_eq!(v.lookup("the"), 2);
        assert_eq!(v.lookup("movie"), 3);
        assert_eq!(v.lookup("film"), UNK_INDEX);
        assert_eq!(v.size(), 4);
    }

    #[test]
    fn test_file_map_undoes_the_shift() {
        let map = HashMap::from([("the".to_string(), 1u32), ("movie".to_string(), 2u32)]);
        let v = Vocabulary::from_map(map.clone()).unwrap();
        let back: HashMap<String, u32> =
            v.to_file_map().into_iter().map(|(t, id)| (t.to_string(), id)).collect();
        assert_eq!(back, map);
    }

    #[test]
    fn test_from_map_rejects_index_with_no_row() {
        let map = HashMap::from([("huge".to_string(), u32::MAX)]);
        assert!(matches!(
            Vocabulary::from_map(map),
            Err(VocabError::IndexTooLarge { index: u32::MAX, .. })
        ));
    }
}
