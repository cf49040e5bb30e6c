// chime-lookup: print dictionary pronunciations for words.
//
// Usage:
//   chime-lookup [OPTIONS] [WORD...]
//
// With words given, prints each word's pronunciations. Otherwise reads
// words from stdin, one per line.
//
// Options:
//   -d, --dict-path PATH   Dictionary file or directory
//   --ipa                  Also print an IPA transliteration
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use chime_core::Pronunciation;
use chime_en::dictionary::PronunciationLookup;
use chime_en::handle::RhymeHandle;
use chime_features::arpabet;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = chime_cli::parse_dict_path(&args);

    if chime_cli::wants_help(&args) {
        println!("chime-lookup: Print dictionary pronunciations for words.");
        println!();
        println!("Usage: chime-lookup [OPTIONS] [WORD...]");
        println!();
        println!("With no words given, reads words from stdin, one per line.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary file or directory");
        println!("  --ipa                  Also print an IPA transliteration");
        println!("  -h, --help             Print this help");
        return;
    }

    let ipa = args.iter().any(|a| a == "--ipa");
    let words: Vec<String> = args.into_iter().filter(|a| a != "--ipa").collect();

    let handle = chime_cli::load_handle(dict_path.as_deref())
        .unwrap_or_else(|e| chime_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if !word.is_empty() {
                lookup_word(&handle, word, ipa, &mut out);
            }
        }
    } else {
        for word in &words {
            lookup_word(&handle, word, ipa, &mut out);
        }
    }
}

fn lookup_word(handle: &RhymeHandle, word: &str, ipa: bool, out: &mut impl Write) {
    let prons = handle.dictionary().resolve(word);
    if prons.is_empty() {
        let _ = writeln!(out, "{word}\t(not found)");
        return;
    }
    for pron in prons {
        if ipa {
            let _ = writeln!(out, "{word}\t{pron}\t/{}/", transliterate(&pron));
        } else {
            let _ = writeln!(out, "{word}\t{pron}");
        }
    }
}

/// Transliterate a pronunciation to IPA, stress digits dropped.
fn transliterate(pron: &Pronunciation) -> String {
    pron.segments()
        .iter()
        .map(|seg| arpabet::to_ipa(seg.symbol()).unwrap_or("?"))
        .collect()
}
