// Criterion benchmarks for chime-en.
//
// Runs against a small in-memory dictionary so no external data is
// needed.
//
// Run:
//   cargo bench -p chime-en

use criterion::{Criterion, criterion_group, criterion_main};

use chime_core::Pronunciation;
use chime_en::dictionary::CmuDictionary;
use chime_en::handle::RhymeHandle;
use chime_en::score::CompareOptions;

fn pron(text: &str) -> Pronunciation {
    Pronunciation::parse(text).expect("bench pronunciation")
}

fn bench_handle() -> RhymeHandle {
    let mut dict = CmuDictionary::new();
    dict.insert("cat", pron("K AE1 T"));
    dict.insert("hat", pron("HH AE1 T"));
    dict.insert("splendid", pron("S P L EH1 N D AH0 D"));
    dict.insert("candid", pron("K AE1 N D AH0 D"));
    dict.insert("read", pron("R IY1 D"));
    dict.insert("read", pron("R EH1 D"));
    dict.insert("lead", pron("L IY1 D"));
    dict.insert("lead", pron("L EH1 D"));
    RhymeHandle::new(dict).expect("embedded feature data")
}

/// One-syllable comparison of two single-pronunciation words.
fn bench_simple_pair(c: &mut Criterion) {
    let handle = bench_handle();
    let options = CompareOptions::default();
    c.bench_function("simple_pair", |b| {
        b.iter(|| handle.compare("cat", "hat", &options).unwrap().score())
    });
}

/// Cross-product search over two words with alternate pronunciations.
fn bench_alternate_pronunciations(c: &mut Criterion) {
    let handle = bench_handle();
    let options = CompareOptions::default();
    c.bench_function("alternate_pronunciations", |b| {
        b.iter(|| handle.compare("read", "lead", &options).unwrap().score())
    });
}

/// Two-syllable spans of different lengths, exercising gap insertion.
fn bench_gapped_alignment(c: &mut Criterion) {
    let handle = bench_handle();
    let options = CompareOptions {
        syllables: 2,
        ..CompareOptions::default()
    };
    c.bench_function("gapped_alignment", |b| {
        b.iter(|| {
            handle
                .compare("splendid", "candid", &options)
                .unwrap()
                .score()
        })
    });
}

criterion_group!(
    benches,
    bench_simple_pair,
    bench_alternate_pronunciations,
    bench_gapped_alignment
);
criterion_main!(benches);
