//! Shared phonetic primitives for the chime rhyme scorer.
//!
//! This crate holds the leaf types every other chime crate builds on:
//!
//! - [`segment::Segment`] -- one ARPABET token, possibly stress-marked
//! - [`pronunciation::Pronunciation`] -- an ordered segment sequence
//!
//! No scoring or dictionary logic lives here.

pub mod pronunciation;
pub mod segment;

pub use pronunciation::{ParsePronunciationError, Pronunciation};
pub use segment::Segment;
