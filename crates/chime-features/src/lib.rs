//! Phonological reference data for the chime rhyme scorer.
//!
//! This crate loads the binary feature table and derives the pairwise
//! segment distance matrix the scorer runs on:
//!
//! - [`arpabet`] -- the closed ARPABET inventory and its IPA keys
//! - [`table`] -- feature table parsing and feature-vector queries
//! - [`distance`] -- symbol-pair distance matrix (derive, load, persist)
//!
//! All of it is read-only after construction and safe to share across
//! threads without locking.

pub mod arpabet;
pub mod distance;
pub mod table;

pub use distance::DistanceMatrix;
pub use table::{FeatureTable, FeatureVector};

/// Error type for feature-table and distance-matrix loading and lookups.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// A symbol outside the phonetic inventory was queried. The inventory
    /// is closed; this is a caller or data error, not a runtime condition.
    #[error("unknown phonetic symbol: {0}")]
    UnknownSymbol(String),

    #[error("malformed feature table: {0}")]
    InvalidTable(String),

    #[error("malformed distance matrix: {0}")]
    InvalidMatrix(String),
}
