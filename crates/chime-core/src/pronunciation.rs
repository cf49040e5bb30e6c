// Pronunciation: one surface reading of a word as an ordered segment list.

use std::fmt;

use crate::segment::Segment;

/// Error type for pronunciation parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePronunciationError {
    /// The input contained no segments.
    #[error("pronunciation is empty")]
    Empty,
}

/// An ordered, non-empty sequence of segments representing one surface
/// reading of a word.
///
/// Pronunciations are immutable once constructed; the scorer never
/// mutates them, it only borrows their segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pronunciation {
    segments: Vec<Segment>,
}

impl Pronunciation {
    /// Build a pronunciation from pre-constructed segments.
    ///
    /// Returns `Err` if the segment list is empty.
    pub fn new(segments: Vec<Segment>) -> Result<Self, ParsePronunciationError> {
        if segments.is_empty() {
            return Err(ParsePronunciationError::Empty);
        }
        Ok(Self { segments })
    }

    /// Parse a whitespace-separated ARPABET string such as `"K AE1 T"`.
    pub fn parse(text: &str) -> Result<Self, ParsePronunciationError> {
        let segments: Vec<Segment> = text.split_whitespace().map(Segment::new).collect();
        Self::new(segments)
    }

    /// The segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A pronunciation is never empty; provided for slice-like symmetry.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of syllable nuclei (stress-marked segments).
    pub fn vowel_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_vowel()).count()
    }
}

impl fmt::Display for Pronunciation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}
