// Alignment search: length-match two rhyme spans by gap insertion and
// find the minimum-cost pairing.

use chime_core::Segment;
use chime_features::DistanceMatrix;

use super::{Alignment, ScoreResult, Slot};
use crate::handle::RhymeError;

/// Upper bound on the span length difference, i.e. on the number of
/// gaps inserted. The candidate count is `C(long, short)`, combinatorial
/// in the difference; this acts as a safety limit so adversarial inputs
/// cannot stall a comparison.
pub const MAX_GAP_INSERTIONS: usize = 8;

/// Align two rhyme spans and return the minimum-cost pairing.
///
/// The strictly longer span keeps its segments untouched; the shorter
/// one has exactly `long - short` gaps inserted at every possible set of
/// positions (order preserved). Each candidate is scored position by
/// position: a gap costs `gap_penalty`, a segment pair costs the
/// distance between their stress-stripped symbols. Candidates are
/// enumerated in lexicographic order over the segment-position index
/// sets and the first minimum is kept, so among ties the alignment with
/// its segments packed leftmost (gaps rightmost) wins.
///
/// With equal lengths the first span is treated as the long side and
/// there is a single gap-free candidate.
pub fn align(
    left: &[Segment],
    right: &[Segment],
    gap_penalty: u32,
    distances: &DistanceMatrix,
) -> Result<ScoreResult, RhymeError> {
    let (long, short) = if right.len() > left.len() {
        (right, left)
    } else {
        (left, right)
    };

    let gaps = long.len() - short.len();
    if gaps > MAX_GAP_INSERTIONS {
        return Err(RhymeError::SpanDiffTooLarge {
            difference: gaps,
            limit: MAX_GAP_INSERTIONS,
        });
    }

    let mut best: Option<(Vec<Slot>, u32)> = None;
    for positions in SegmentPlacements::new(long.len(), short.len()) {
        let (slots, score) = score_placement(long, short, &positions, gap_penalty, distances)?;
        if best.as_ref().is_none_or(|(_, s)| score < *s) {
            best = Some((slots, score));
        }
    }

    // SegmentPlacements always yields at least the packed-left placement,
    // so `best` is present even for empty spans.
    let (gapped, score) = best.unwrap_or((Vec::new(), 0));
    let long_slots = long.iter().cloned().map(Slot::Segment).collect();
    Ok(ScoreResult::new(Alignment::new(long_slots, gapped), score))
}

/// Build the gapped side for one placement of the short span's segments
/// and compute its total cost against the long side.
fn score_placement(
    long: &[Segment],
    short: &[Segment],
    positions: &[usize],
    gap_penalty: u32,
    distances: &DistanceMatrix,
) -> Result<(Vec<Slot>, u32), RhymeError> {
    let mut slots = Vec::with_capacity(long.len());
    let mut total = 0u32;
    let mut k = 0usize;
    for (i, seg) in long.iter().enumerate() {
        if k < positions.len() && positions[k] == i {
            total += distances.distance(seg.symbol(), short[k].symbol())?;
            slots.push(Slot::Segment(short[k].clone()));
            k += 1;
        } else {
            total += gap_penalty;
            slots.push(Slot::Gap);
        }
    }
    Ok((slots, total))
}

/// Enumerates every way to place `m` segments into `n` slots in order:
/// the `C(n, m)` ascending index sets, in lexicographic order.
struct SegmentPlacements {
    n: usize,
    positions: Vec<usize>,
    started: bool,
    done: bool,
}

impl SegmentPlacements {
    fn new(n: usize, m: usize) -> Self {
        debug_assert!(m <= n);
        Self {
            n,
            positions: (0..m).collect(),
            started: false,
            done: false,
        }
    }
}

impl Iterator for SegmentPlacements {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.positions.clone());
        }

        let m = self.positions.len();
        // Find the rightmost index that can still move right.
        let mut i = m;
        while i > 0 {
            i -= 1;
            if self.positions[i] < self.n - m + i {
                self.positions[i] += 1;
                for j in (i + 1)..m {
                    self.positions[j] = self.positions[j - 1] + 1;
                }
                return Some(self.positions.clone());
            }
        }
        self.done = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_features::FeatureTable;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_features(&FeatureTable::embedded().unwrap()).unwrap()
    }

    fn span(text: &str) -> Vec<Segment> {
        text.split_whitespace().map(Segment::new).collect()
    }

    fn binomial(n: usize, m: usize) -> usize {
        let m = m.min(n - m);
        let mut result = 1usize;
        for i in 0..m {
            result = result * (n - i) / (i + 1);
        }
        result
    }

    #[test]
    fn placements_count_matches_binomial() {
        for n in 0..=7usize {
            for m in 0..=n {
                let count = SegmentPlacements::new(n, m).count();
                assert_eq!(count, binomial(n, m), "C({n}, {m})");
            }
        }
    }

    #[test]
    fn placements_are_lexicographic_and_distinct() {
        let all: Vec<Vec<usize>> = SegmentPlacements::new(5, 3).collect();
        let mut sorted = all.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(all, sorted);
    }

    #[test]
    fn identical_spans_score_zero() {
        let result = align(&span("AE1 T"), &span("AE1 T"), 6, &matrix()).unwrap();
        assert_eq!(result.score(), 0);
        assert_eq!(result.alignment().len(), 2);
    }

    #[test]
    fn voicing_mismatch_scores_one() {
        let result = align(&span("AE1 T"), &span("AE1 D"), 6, &matrix()).unwrap();
        assert_eq!(result.score(), 1);
    }

    #[test]
    fn stress_is_ignored_for_distance() {
        let result = align(&span("AE1 T"), &span("AE2 T"), 6, &matrix()).unwrap();
        assert_eq!(result.score(), 0);
    }

    #[test]
    fn shorter_span_gets_the_gaps() {
        let matrix = matrix();
        let result = align(&span("EH1 S T"), &span("EH1 S"), 6, &matrix).unwrap();
        let gaps = result
            .alignment()
            .right()
            .iter()
            .filter(|s| s.is_gap())
            .count();
        assert_eq!(gaps, 1);
        assert!(result.alignment().left().iter().all(|s| !s.is_gap()));
        // EH1 and S pair exactly; the gap lands on T.
        assert_eq!(result.score(), 6);
    }

    #[test]
    fn argument_order_does_not_change_the_score() {
        let matrix = matrix();
        let a = span("IY1 P S");
        let b = span("AE1 T");
        let forward = align(&a, &b, 6, &matrix).unwrap();
        let backward = align(&b, &a, 6, &matrix).unwrap();
        assert_eq!(forward.score(), backward.score());
    }

    #[test]
    fn returned_score_is_the_global_minimum() {
        let matrix = matrix();
        let long = span("S T R IY1 T S");
        let short = span("IY1 T");
        let best = align(&long, &short, 6, &matrix).unwrap();
        for positions in SegmentPlacements::new(long.len(), short.len()) {
            let (_, score) =
                score_placement(&long, &short, &positions, 6, &matrix).unwrap();
            assert!(best.score() <= score);
        }
    }

    #[test]
    fn tie_break_packs_segments_left() {
        let matrix = matrix();
        // Both placements of the single segment against two identical
        // long segments tie; the first (leftmost) placement must win.
        let result = align(&span("T T"), &span("T"), 6, &matrix).unwrap();
        assert_eq!(result.alignment().right()[0], Slot::Segment(Segment::new("T")));
        assert!(result.alignment().right()[1].is_gap());
    }

    #[test]
    fn empty_spans_align_to_nothing() {
        let result = align(&[], &[], 6, &matrix()).unwrap();
        assert_eq!(result.score(), 0);
        assert!(result.alignment().is_empty());
    }

    #[test]
    fn empty_against_nonempty_is_all_gaps() {
        let result = align(&span("AE1 T"), &[], 7, &matrix()).unwrap();
        assert_eq!(result.score(), 14);
        assert!(result.alignment().right().iter().all(Slot::is_gap));
    }

    #[test]
    fn oversized_difference_is_rejected() {
        let long: Vec<Segment> = std::iter::repeat_n(Segment::new("T"), 12).collect();
        let err = align(&long, &[], 6, &matrix()).unwrap_err();
        assert!(matches!(err, RhymeError::SpanDiffTooLarge { .. }));
    }

    #[test]
    fn unknown_symbol_is_a_hard_error() {
        let err = align(&span("QX"), &span("T"), 6, &matrix()).unwrap_err();
        assert!(matches!(err, RhymeError::Feature(_)));
    }
}
