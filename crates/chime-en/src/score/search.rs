// Candidate search: evaluate every pronunciation pair and keep the
// global best alignment.

use chime_core::Pronunciation;
use chime_features::DistanceMatrix;

use super::align::align;
use super::extract::rhyme_span;
use super::{CompareOptions, EvaluatedPair, ScoreResult};
use crate::handle::RhymeError;

/// Score every pronunciation pair in the cross product of the two
/// candidate lists and return the globally best result along with the
/// full evaluation table.
///
/// Pairs are evaluated in enumeration order (first word outer, second
/// inner) and the minimum is kept with strict comparison, so the first
/// pair to reach the best score wins ties. If either list is empty the
/// comparison short-circuits to the unresolved sentinel result with an
/// empty table.
pub(crate) fn best_of(
    prons1: &[Pronunciation],
    prons2: &[Pronunciation],
    options: &CompareOptions,
    distances: &DistanceMatrix,
) -> Result<(ScoreResult, Vec<EvaluatedPair>), RhymeError> {
    if prons1.is_empty() || prons2.is_empty() {
        return Ok((ScoreResult::unresolved(), Vec::new()));
    }

    let mut evaluated: Vec<EvaluatedPair> = Vec::with_capacity(prons1.len() * prons2.len());
    let mut best: Option<usize> = None;

    for p1 in prons1 {
        let span1 = rhyme_span(p1, options.syllables);
        for p2 in prons2 {
            let span2 = rhyme_span(p2, options.syllables);
            let result = align(&span1, &span2, options.gap_penalty, distances)?;
            let is_better = best
                .map(|i| result.score() < evaluated[i].result.score())
                .unwrap_or(true);
            if is_better {
                best = Some(evaluated.len());
            }
            evaluated.push(EvaluatedPair {
                pronunciations: (p1.clone(), p2.clone()),
                result,
            });
        }
    }

    // The lists are non-empty, so at least one pair was evaluated.
    let best = best.and_then(|i| evaluated.get(i)).map(|p| p.result.clone());
    Ok((best.unwrap_or_else(ScoreResult::unresolved), evaluated))
}
