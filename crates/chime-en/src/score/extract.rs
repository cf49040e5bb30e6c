// Rhyme span extraction: the trailing portion of a pronunciation that
// carries the requested number of syllable nuclei.

use chime_core::{Pronunciation, Segment};

/// Extract the rhyme span of `pron` for a requested syllable count.
///
/// Scans from the end, keeping every segment up to and including the
/// nucleus that brings the vowel count to
/// `min(syllables, vowel_count(pron))`, and returns the kept segments
/// in forward order. The span is always a true suffix of the
/// pronunciation. A pronunciation without nuclei (or a zero limit)
/// yields the empty span.
pub fn rhyme_span(pron: &Pronunciation, syllables: usize) -> Vec<Segment> {
    let limit = syllables.min(pron.vowel_count());
    if limit == 0 {
        return Vec::new();
    }

    let mut span = Vec::new();
    let mut nuclei = 0usize;
    for seg in pron.segments().iter().rev() {
        span.push(seg.clone());
        if seg.is_vowel() {
            nuclei += 1;
            if nuclei == limit {
                break;
            }
        }
    }
    span.reverse();
    span
}
