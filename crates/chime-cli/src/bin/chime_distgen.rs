// chime-distgen: regenerate the persisted segment distance matrix.
//
// Derives the pairwise distance matrix from the embedded feature table
// and writes it to stdout in the square CSV form, one row and column
// per ARPABET symbol.
//
// Usage:
//   chime-distgen > distances.csv

use std::io::{self, Write};

use chime_features::{DistanceMatrix, FeatureTable};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if chime_cli::wants_help(&args) {
        println!("chime-distgen: Regenerate the segment distance matrix.");
        println!();
        println!("Usage: chime-distgen > distances.csv");
        println!();
        println!("Derives pairwise feature distances from the embedded");
        println!("feature table and writes the square CSV to stdout.");
        return;
    }

    let table = match FeatureTable::embedded() {
        Ok(table) => table,
        Err(e) => chime_cli::fatal(&e.to_string()),
    };
    let matrix = match DistanceMatrix::from_features(&table) {
        Ok(matrix) => matrix,
        Err(e) => chime_cli::fatal(&e.to_string()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = out.write_all(matrix.to_csv().as_bytes()) {
        chime_cli::fatal(&format!("failed to write matrix: {e}"));
    }
}
