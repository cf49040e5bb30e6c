// Feature-diff explanation: which phonological features separate the
// mismatched segment pairs of an alignment.

use chime_core::Segment;
use chime_features::{DistanceMatrix, FeatureTable};

use super::{ScoreResult, Slot};
use crate::handle::RhymeError;

/// One alignment position with its contribution to the total score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionScore {
    pub left: Slot,
    pub right: Slot,
    pub score: u32,
}

/// One feature on which a segment pair disagrees, with each side's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureContrast {
    pub feature: String,
    pub left: bool,
    pub right: bool,
}

/// The full feature contrast for one mismatched segment pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPairDiff {
    pub left: Segment,
    pub right: Segment,
    pub contrasts: Vec<FeatureContrast>,
}

/// Differing feature names bucketed by segment class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedFeatures {
    pub consonant: Vec<String>,
    pub vowel: Vec<String>,
}

/// Per-position score breakdown of an alignment: gaps charge the gap
/// penalty, segment pairs charge their symbol distance.
pub fn segment_scores(
    result: &ScoreResult,
    gap_penalty: u32,
    distances: &DistanceMatrix,
) -> Result<Vec<PositionScore>, RhymeError> {
    let mut scores = Vec::with_capacity(result.alignment().len());
    for (left, right) in result.alignment().pairs() {
        let score = match (left.segment(), right.segment()) {
            (Some(a), Some(b)) => distances.distance(a.symbol(), b.symbol())?,
            _ => gap_penalty,
        };
        scores.push(PositionScore {
            left: left.clone(),
            right: right.clone(),
            score,
        });
    }
    Ok(scores)
}

/// All feature names that differ across the alignment's mismatched
/// segment pairs, in position order, duplicates preserved.
pub fn differing_features(
    result: &ScoreResult,
    table: &FeatureTable,
    distances: &DistanceMatrix,
) -> Result<Vec<String>, RhymeError> {
    let mut features = Vec::new();
    for (a, b) in mismatched_pairs(result, distances)? {
        features.extend(
            table
                .differing(a.symbol(), b.symbol())?
                .into_iter()
                .map(str::to_string),
        );
    }
    Ok(features)
}

/// Like [`differing_features`], but bucketed into vowel contrasts
/// (either segment stress-marked) and consonant contrasts.
pub fn differing_features_by_class(
    result: &ScoreResult,
    table: &FeatureTable,
    distances: &DistanceMatrix,
) -> Result<GroupedFeatures, RhymeError> {
    let mut grouped = GroupedFeatures::default();
    for (a, b) in mismatched_pairs(result, distances)? {
        let names = table
            .differing(a.symbol(), b.symbol())?
            .into_iter()
            .map(str::to_string);
        if a.is_vowel() || b.is_vowel() {
            grouped.vowel.extend(names);
        } else {
            grouped.consonant.extend(names);
        }
    }
    Ok(grouped)
}

/// Per-pair feature contrasts for every mismatched segment pair,
/// carrying each side's value for display.
pub fn feature_breakdown(
    result: &ScoreResult,
    table: &FeatureTable,
    distances: &DistanceMatrix,
) -> Result<Vec<SegmentPairDiff>, RhymeError> {
    let mut breakdown = Vec::new();
    for (a, b) in mismatched_pairs(result, distances)? {
        let va = table.vector(a.symbol())?;
        let vb = table.vector(b.symbol())?;
        let contrasts = table
            .feature_names()
            .iter()
            .zip(va.values().iter().zip(vb.values()))
            .filter(|(_, (x, y))| x != y)
            .map(|(name, (x, y))| FeatureContrast {
                feature: name.clone(),
                left: *x,
                right: *y,
            })
            .collect();
        breakdown.push(SegmentPairDiff {
            left: a.clone(),
            right: b.clone(),
            contrasts,
        });
    }
    Ok(breakdown)
}

/// Aligned pairs where both sides are segments and the symbol distance
/// is nonzero.
fn mismatched_pairs<'a>(
    result: &'a ScoreResult,
    distances: &DistanceMatrix,
) -> Result<Vec<(&'a Segment, &'a Segment)>, RhymeError> {
    let mut pairs = Vec::new();
    for (left, right) in result.alignment().pairs() {
        if let (Some(a), Some(b)) = (left.segment(), right.segment()) {
            if distances.distance(a.symbol(), b.symbol())? > 0 {
                pairs.push((a, b));
            }
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::align::align;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_features(&FeatureTable::embedded().unwrap()).unwrap()
    }

    fn span(text: &str) -> Vec<Segment> {
        text.split_whitespace().map(Segment::new).collect()
    }

    #[test]
    fn voicing_contrast_is_named() {
        let table = FeatureTable::embedded().unwrap();
        let matrix = matrix();
        let result = align(&span("AE1 T"), &span("AE1 D"), 6, &matrix).unwrap();
        assert_eq!(
            differing_features(&result, &table, &matrix).unwrap(),
            vec!["voice"]
        );
    }

    #[test]
    fn grouping_splits_consonants_from_vowels() {
        let table = FeatureTable::embedded().unwrap();
        let matrix = matrix();
        // Vowel mismatch (AE/IH) and consonant mismatch (T/D).
        let result = align(&span("AE1 T"), &span("IH1 D"), 6, &matrix).unwrap();
        let grouped = differing_features_by_class(&result, &table, &matrix).unwrap();
        assert_eq!(grouped.consonant, vec!["voice"]);
        assert!(!grouped.vowel.is_empty());
        assert!(grouped.vowel.contains(&"high".to_string()));
    }

    #[test]
    fn identical_alignment_has_no_diffs() {
        let table = FeatureTable::embedded().unwrap();
        let matrix = matrix();
        let result = align(&span("AE1 T"), &span("AE1 T"), 6, &matrix).unwrap();
        assert!(differing_features(&result, &table, &matrix).unwrap().is_empty());
        assert!(feature_breakdown(&result, &table, &matrix).unwrap().is_empty());
    }

    #[test]
    fn gaps_are_skipped_but_charged() {
        let table = FeatureTable::embedded().unwrap();
        let matrix = matrix();
        let result = align(&span("EH1 S T"), &span("EH1 S"), 6, &matrix).unwrap();
        assert!(differing_features(&result, &table, &matrix).unwrap().is_empty());
        let scores = segment_scores(&result, 6, &matrix).unwrap();
        assert_eq!(scores.len(), 3);
        assert_eq!(scores.iter().map(|p| p.score).sum::<u32>(), result.score());
        assert_eq!(scores[2].score, 6);
        assert!(scores[2].right.is_gap());
    }

    #[test]
    fn breakdown_carries_each_sides_value() {
        let table = FeatureTable::embedded().unwrap();
        let matrix = matrix();
        let result = align(&span("AE1 T"), &span("AE1 D"), 6, &matrix).unwrap();
        let breakdown = feature_breakdown(&result, &table, &matrix).unwrap();
        assert_eq!(breakdown.len(), 1);
        let contrast = &breakdown[0].contrasts[0];
        assert_eq!(contrast.feature, "voice");
        assert!(!contrast.left);
        assert!(contrast.right);
    }

    #[test]
    fn duplicates_are_preserved() {
        let table = FeatureTable::embedded().unwrap();
        let matrix = matrix();
        // Two voicing mismatches in one alignment: T/D and S/Z.
        let result = align(&span("AE1 T S"), &span("AE1 D Z"), 6, &matrix).unwrap();
        assert_eq!(
            differing_features(&result, &table, &matrix).unwrap(),
            vec!["voice", "voice"]
        );
    }
}
