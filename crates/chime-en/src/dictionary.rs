// Pronunciation lookup backed by the CMU pronouncing dictionary format.

use std::path::Path;

use hashbrown::HashMap;

use chime_core::Pronunciation;

/// Error type for dictionary loading.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
}

/// Ordered pronunciation lookup: the seam between the scorer and
/// whatever supplies pronunciations.
///
/// An empty result means "not found"; the scorer treats that as an
/// unresolvable word, not an error.
pub trait PronunciationLookup {
    fn resolve(&self, key: &str) -> Vec<Pronunciation>;
}

/// In-memory dictionary parsed from CMU pronouncing dictionary text.
///
/// Each line is a word followed by its ARPABET segments, e.g.
/// `cat  K AE1 T`. Alternate pronunciations appear on their own lines
/// with a parenthesized index (`cat(2)  ...`) and are folded into the
/// base entry in file order. Lines starting with `;;;` are comments.
/// Keys are case-folded to lowercase.
#[derive(Debug, Clone, Default)]
pub struct CmuDictionary {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl CmuDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dictionary text in the CMU format.
    pub fn parse(text: &str) -> Result<Self, DictionaryError> {
        let mut dict = Self::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let (word, rest) = line.split_once(char::is_whitespace).ok_or_else(|| {
                DictionaryError::InvalidLine {
                    line: i + 1,
                    reason: "no pronunciation after word".to_string(),
                }
            })?;
            let pron =
                Pronunciation::parse(rest).map_err(|e| DictionaryError::InvalidLine {
                    line: i + 1,
                    reason: e.to_string(),
                })?;
            dict.insert(strip_variant_index(word), pron);
        }
        Ok(dict)
    }

    /// Load and parse a dictionary file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Append a pronunciation for a word, preserving insertion order.
    pub fn insert(&mut self, word: &str, pron: Pronunciation) {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(pron);
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a word has at least one pronunciation.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_lowercase())
    }
}

impl PronunciationLookup for CmuDictionary {
    fn resolve(&self, key: &str) -> Vec<Pronunciation> {
        self.entries
            .get(&key.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

/// Strip a trailing `(n)` alternate-pronunciation marker from a word.
fn strip_variant_index(word: &str) -> &str {
    match word.split_once('(') {
        Some((base, _)) if !base.is_empty() => base,
        _ => word,
    }
}
