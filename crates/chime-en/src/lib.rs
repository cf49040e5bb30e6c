//! English rhyme scoring for chime.
//!
//! Resolves words through a CMU-format pronouncing dictionary, extracts
//! the trailing rhyme span of each candidate pronunciation, aligns span
//! pairs by gap insertion, and reports the best-scoring alignment with
//! feature-level explanations.
//!
//! - [`dictionary`] -- pronunciation lookup (CMU dictionary text format)
//! - [`score`] -- rhyme extraction, alignment search, candidate search,
//!   and feature-diff explanation
//! - [`handle`] -- [`handle::RhymeHandle`], the owning entry point
//!
//! ```no_run
//! use chime_en::dictionary::CmuDictionary;
//! use chime_en::handle::RhymeHandle;
//! use chime_en::score::CompareOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dict = CmuDictionary::from_path("cmudict.dict")?;
//! let handle = RhymeHandle::new(dict)?;
//! let cmp = handle.compare("cat", "hat", &CompareOptions::default())?;
//! println!("score: {}", cmp.score());
//! # Ok(())
//! # }
//! ```

pub mod dictionary;
pub mod handle;
pub mod score;

pub use dictionary::{CmuDictionary, DictionaryError, PronunciationLookup};
pub use handle::{RhymeComparison, RhymeError, RhymeHandle, WordRef};
pub use score::{Alignment, CompareOptions, EvaluatedPair, ScoreResult, Slot};
