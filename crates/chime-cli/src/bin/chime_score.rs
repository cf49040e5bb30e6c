// chime-score: score how well two words rhyme.
//
// Usage:
//   chime-score [OPTIONS] [WORD1 WORD2]
//
// With two words given, scores that pair once. Otherwise reads pairs
// from stdin, one `word1 word2` pair per line.
//
// Options:
//   -d, --dict-path PATH    Dictionary file or directory
//   -n, --syllables N       Rhyme span length in syllables (default 1)
//   -g, --gap-penalty N     Cost per unmatched position (default 6)
//   -v, -vv, -vvv           Increasingly detailed breakdowns
//   -h, --help              Print help

use std::io::{self, BufRead, Write};

use chime_en::handle::{RhymeComparison, RhymeHandle};
use chime_en::score::CompareOptions;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = chime_cli::parse_dict_path(&args);

    if chime_cli::wants_help(&args) {
        println!("chime-score: Score how well two words rhyme.");
        println!();
        println!("Usage: chime-score [OPTIONS] [WORD1 WORD2]");
        println!();
        println!("With two words given, scores that pair. Otherwise reads");
        println!("`word1 word2` pairs from stdin, one per line.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH    Dictionary file or directory");
        println!("  -n, --syllables N       Rhyme span length in syllables (default 1)");
        println!("  -g, --gap-penalty N     Cost per unmatched position (default 6)");
        println!("  -v, -vv, -vvv           Increasingly detailed breakdowns");
        println!("  -h, --help              Print this help");
        return;
    }

    let (syllables, args) = chime_cli::parse_numeric_flag(&args, "-n", "--syllables");
    let (gap_penalty, args) = chime_cli::parse_numeric_flag(&args, "-g", "--gap-penalty");
    let (verbosity, words) = chime_cli::parse_verbosity(&args);

    let defaults = CompareOptions::default();
    let options = CompareOptions {
        gap_penalty: gap_penalty.unwrap_or(defaults.gap_penalty),
        syllables: syllables.map(|n| n as usize).unwrap_or(defaults.syllables),
    };

    let handle = chime_cli::load_handle(dict_path.as_deref())
        .unwrap_or_else(|e| chime_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match words.as_slice() {
        [w1, w2] => score_pair(&handle, w1, w2, &options, verbosity, &mut out),
        [] => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        eprintln!("error reading stdin: {e}");
                        break;
                    }
                };
                let mut parts = line.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(w1), Some(w2), None) => {
                        score_pair(&handle, w1, w2, &options, verbosity, &mut out);
                    }
                    (None, ..) => {}
                    _ => eprintln!("skipping line (expected two words): {line}"),
                }
            }
        }
        _ => chime_cli::fatal("expected exactly two words (or none, to read stdin)"),
    }
}

fn score_pair(
    handle: &RhymeHandle,
    word1: &str,
    word2: &str,
    options: &CompareOptions,
    verbosity: usize,
    out: &mut impl Write,
) {
    let cmp = match handle.compare(word1, word2, options) {
        Ok(cmp) => cmp,
        Err(e) => chime_cli::fatal(&e.to_string()),
    };

    let _ = writeln!(out, "'{word1}' vs. '{word2}'\t SCORE: {}", cmp.score());
    if cmp.is_unresolved() {
        let _ = writeln!(out, "(one of the words is not in the dictionary)");
        return;
    }
    if verbosity >= 1 {
        print_segment_scores(&cmp, out);
    }
    if verbosity >= 2 {
        print_feature_breakdown(&cmp, out);
    }
    if verbosity >= 3 {
        print_evaluated_pairs(&cmp, out);
    }
}

fn print_segment_scores(cmp: &RhymeComparison<'_>, out: &mut impl Write) {
    let scores = match cmp.segment_scores() {
        Ok(scores) => scores,
        Err(e) => chime_cli::fatal(&e.to_string()),
    };
    let _ = writeln!(out, "Segment Comparisons");
    let _ = writeln!(out, "---");
    for position in scores {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            position.left, position.right, position.score
        );
    }
}

fn print_feature_breakdown(cmp: &RhymeComparison<'_>, out: &mut impl Write) {
    let breakdown = match cmp.feature_breakdown() {
        Ok(breakdown) => breakdown,
        Err(e) => chime_cli::fatal(&e.to_string()),
    };
    if breakdown.is_empty() {
        return;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Feature Comparisons");
    let _ = writeln!(out, "---");
    for pair in breakdown {
        let _ = writeln!(out, "{} vs. {}", pair.left, pair.right);
        for contrast in &pair.contrasts {
            let _ = writeln!(
                out,
                "  {}: {} -> {}",
                contrast.feature, contrast.left as u8, contrast.right as u8
            );
        }
    }
}

fn print_evaluated_pairs(cmp: &RhymeComparison<'_>, out: &mut impl Write) {
    let pairs = cmp.evaluated_pairs();
    let _ = writeln!(out);
    if pairs.len() == 1 {
        let _ = writeln!(out, "No alternate pronunciations found.");
        return;
    }
    let _ = writeln!(out, "Pronunciation Comparison");
    let _ = writeln!(out, "---");
    for pair in pairs {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            pair.pronunciations.0,
            pair.pronunciations.1,
            pair.result.score()
        );
    }
}
