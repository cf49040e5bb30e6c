// RhymeHandle: top-level integration point for rhyme scoring.
//
// Owns the reference data (dictionary, feature table, distance matrix)
// as one immutable context object and exposes the comparison entry
// point. Comparisons borrow the handle, so the data is loaded once and
// shared by every query; nothing here mutates after construction.

use std::fmt;

use chime_core::Pronunciation;
use chime_features::{DistanceMatrix, FeatureError, FeatureTable};

use crate::dictionary::{CmuDictionary, PronunciationLookup};
use crate::score::explain::{
    self, GroupedFeatures, PositionScore, SegmentPairDiff,
};
use crate::score::{Alignment, CompareOptions, EvaluatedPair, ScoreResult, search};

/// Error type for rhyme comparison.
#[derive(Debug, thiserror::Error)]
pub enum RhymeError {
    /// A segment fell outside the phonetic inventory, or the reference
    /// data itself failed to load.
    #[error("feature data error: {0}")]
    Feature(#[from] FeatureError),

    /// The requested syllable count was zero.
    #[error("syllable count must be at least 1")]
    InvalidSyllables,

    /// The two rhyme spans differ in length by more than the scorer is
    /// willing to bridge with gaps.
    #[error("rhyme span length difference {difference} exceeds limit {limit}")]
    SpanDiffTooLarge { difference: usize, limit: usize },
}

/// A word to compare: either a dictionary key or an explicit
/// pronunciation supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordRef {
    Lexical(String),
    Pronounced(Pronunciation),
}

impl WordRef {
    /// Candidate pronunciations for this reference. A lexical key goes
    /// through the lookup (empty means "not found"); an explicit
    /// pronunciation is its own singleton list.
    fn candidates(&self, lookup: &dyn PronunciationLookup) -> Vec<Pronunciation> {
        match self {
            WordRef::Lexical(key) => lookup.resolve(key),
            WordRef::Pronounced(pron) => vec![pron.clone()],
        }
    }
}

impl fmt::Display for WordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordRef::Lexical(key) => f.write_str(key),
            WordRef::Pronounced(pron) => write!(f, "{pron}"),
        }
    }
}

impl From<&str> for WordRef {
    fn from(key: &str) -> Self {
        WordRef::Lexical(key.to_string())
    }
}

impl From<String> for WordRef {
    fn from(key: String) -> Self {
        WordRef::Lexical(key)
    }
}

impl From<Pronunciation> for WordRef {
    fn from(pron: Pronunciation) -> Self {
        WordRef::Pronounced(pron)
    }
}

/// Top-level handle owning the dictionary, the feature table, and the
/// distance matrix derived from it.
pub struct RhymeHandle {
    dictionary: CmuDictionary,
    features: FeatureTable,
    distances: DistanceMatrix,
}

impl RhymeHandle {
    /// Create a handle over the embedded feature table, deriving the
    /// distance matrix from it.
    pub fn new(dictionary: CmuDictionary) -> Result<Self, RhymeError> {
        let features = FeatureTable::embedded()?;
        let distances = DistanceMatrix::from_features(&features)?;
        Ok(Self::with_tables(dictionary, features, distances))
    }

    /// Create a handle from pre-loaded reference data.
    pub fn with_tables(
        dictionary: CmuDictionary,
        features: FeatureTable,
        distances: DistanceMatrix,
    ) -> Self {
        Self {
            dictionary,
            features,
            distances,
        }
    }

    /// Compare two words (or explicit pronunciations).
    ///
    /// Resolves both references to candidate pronunciation lists,
    /// evaluates the full cross product, and returns the comparison
    /// holding the globally best alignment plus the whole evaluation
    /// table. A reference that resolves to nothing makes the comparison
    /// unresolved (sentinel score) rather than an error.
    pub fn compare(
        &self,
        word1: impl Into<WordRef>,
        word2: impl Into<WordRef>,
        options: &CompareOptions,
    ) -> Result<RhymeComparison<'_>, RhymeError> {
        if options.syllables == 0 {
            return Err(RhymeError::InvalidSyllables);
        }
        let words = (word1.into(), word2.into());
        let prons1 = words.0.candidates(&self.dictionary);
        let prons2 = words.1.candidates(&self.dictionary);
        let (best, evaluated) = search::best_of(&prons1, &prons2, options, &self.distances)?;
        Ok(RhymeComparison {
            handle: self,
            words,
            options: *options,
            best,
            evaluated,
        })
    }

    pub fn dictionary(&self) -> &CmuDictionary {
        &self.dictionary
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}

/// The outcome of one comparison: the winning alignment, its score, and
/// every evaluated pronunciation pair, with feature-level explanations
/// computed on demand against the handle's reference data.
pub struct RhymeComparison<'a> {
    handle: &'a RhymeHandle,
    words: (WordRef, WordRef),
    options: CompareOptions,
    best: ScoreResult,
    evaluated: Vec<EvaluatedPair>,
}

impl RhymeComparison<'_> {
    /// The compared word references, as given.
    pub fn words(&self) -> (&WordRef, &WordRef) {
        (&self.words.0, &self.words.1)
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// The winning (minimum) dissimilarity score. Zero is a perfect
    /// rhyme; the sentinel value marks an unresolvable word (see
    /// [`RhymeComparison::is_unresolved`]).
    pub fn score(&self) -> u32 {
        self.best.score()
    }

    /// Whether either word failed dictionary resolution.
    pub fn is_unresolved(&self) -> bool {
        self.best.is_unresolved()
    }

    /// The winning alignment.
    pub fn best_alignment(&self) -> &Alignment {
        self.best.alignment()
    }

    /// The winning result as a whole.
    pub fn best_result(&self) -> &ScoreResult {
        &self.best
    }

    /// Every evaluated pronunciation pair, in enumeration order.
    pub fn evaluated_pairs(&self) -> &[EvaluatedPair] {
        &self.evaluated
    }

    /// All feature names differing on mismatched segment pairs of the
    /// winning alignment, in position order, duplicates preserved.
    pub fn differing_features(&self) -> Result<Vec<String>, RhymeError> {
        explain::differing_features(&self.best, &self.handle.features, &self.handle.distances)
    }

    /// Differing feature names bucketed into consonant and vowel
    /// contrasts.
    pub fn differing_features_by_class(&self) -> Result<GroupedFeatures, RhymeError> {
        explain::differing_features_by_class(
            &self.best,
            &self.handle.features,
            &self.handle.distances,
        )
    }

    /// Per-position score breakdown of the winning alignment.
    pub fn segment_scores(&self) -> Result<Vec<PositionScore>, RhymeError> {
        explain::segment_scores(&self.best, self.options.gap_penalty, &self.handle.distances)
    }

    /// Per-pair feature contrasts for the winning alignment.
    pub fn feature_breakdown(&self) -> Result<Vec<SegmentPairDiff>, RhymeError> {
        explain::feature_breakdown(&self.best, &self.handle.features, &self.handle.distances)
    }
}
