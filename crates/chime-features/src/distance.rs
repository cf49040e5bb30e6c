// Segment distance matrix: pairwise feature differences over the inventory.

use hashbrown::HashMap;

use crate::FeatureError;
use crate::arpabet;
use crate::table::FeatureTable;

/// Pairwise distances between every two symbols in the inventory.
///
/// Stored as a dense `n x n` table over a symbol-to-index map. Each cell
/// is the Hamming distance between the two symbols' feature vectors, so
/// the matrix is symmetric with a zero diagonal; both properties are
/// enforced when a persisted matrix is loaded.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    symbols: Vec<String>,
    index: HashMap<String, usize>,
    cells: Vec<u32>,
}

impl DistanceMatrix {
    /// Derive the matrix from a feature table, covering the ARPABET
    /// inventory in its canonical order.
    pub fn from_features(table: &FeatureTable) -> Result<Self, FeatureError> {
        let symbols: Vec<String> = arpabet::symbols().map(str::to_string).collect();
        let vectors = symbols
            .iter()
            .map(|s| table.vector(s))
            .collect::<Result<Vec<_>, _>>()?;

        let n = symbols.len();
        let mut cells = vec![0u32; n * n];
        for i in 0..n {
            for j in 0..n {
                cells[i * n + j] = vectors[i].hamming(vectors[j]);
            }
        }

        Ok(Self {
            index: Self::build_index(&symbols),
            symbols,
            cells,
        })
    }

    /// Parse a persisted matrix from CSV text: an empty-cornered header
    /// row of symbols, then one row per symbol with integer cells.
    pub fn parse_csv(source: &str) -> Result<Self, FeatureError> {
        let mut lines = source.lines().filter(|l| !l.trim().is_empty());

        let header = lines
            .next()
            .ok_or_else(|| FeatureError::InvalidMatrix("missing header row".to_string()))?;
        let mut columns = header.split(',');
        columns.next(); // empty corner cell
        let symbols: Vec<String> = columns.map(|c| c.trim().to_string()).collect();
        if symbols.is_empty() {
            return Err(FeatureError::InvalidMatrix(
                "header declares no symbols".to_string(),
            ));
        }

        let n = symbols.len();
        let mut cells = vec![0u32; n * n];
        let mut row_count = 0usize;
        for line in lines {
            if row_count >= n {
                return Err(FeatureError::InvalidMatrix(format!(
                    "more than {n} data rows"
                )));
            }
            let mut row_cells = line.split(',');
            let symbol = row_cells.next().map(str::trim).unwrap_or_default();
            if symbol != symbols[row_count] {
                return Err(FeatureError::InvalidMatrix(format!(
                    "row {} is {symbol:?}, expected {:?}",
                    row_count + 1,
                    symbols[row_count]
                )));
            }
            let mut col = 0usize;
            for cell in row_cells {
                if col >= n {
                    return Err(FeatureError::InvalidMatrix(format!(
                        "row {symbol}: more than {n} cells"
                    )));
                }
                let value: u32 = cell.trim().parse().map_err(|_| {
                    FeatureError::InvalidMatrix(format!(
                        "row {symbol}: cell {cell:?} is not a nonnegative integer"
                    ))
                })?;
                cells[row_count * n + col] = value;
                col += 1;
            }
            if col != n {
                return Err(FeatureError::InvalidMatrix(format!(
                    "row {symbol}: expected {n} cells, got {col}"
                )));
            }
            row_count += 1;
        }
        if row_count != n {
            return Err(FeatureError::InvalidMatrix(format!(
                "expected {n} data rows, got {row_count}"
            )));
        }

        let matrix = Self {
            index: Self::build_index(&symbols),
            symbols,
            cells,
        };
        matrix.check_invariants()?;
        Ok(matrix)
    }

    /// Serialize to the persisted CSV form.
    pub fn to_csv(&self) -> String {
        let n = self.symbols.len();
        let mut out = String::new();
        for symbol in &self.symbols {
            out.push(',');
            out.push_str(symbol);
        }
        out.push('\n');
        for (i, symbol) in self.symbols.iter().enumerate() {
            out.push_str(symbol);
            for j in 0..n {
                out.push(',');
                out.push_str(&self.cells[i * n + j].to_string());
            }
            out.push('\n');
        }
        out
    }

    /// Distance between two stress-stripped ARPABET symbols.
    pub fn distance(&self, a: &str, b: &str) -> Result<u32, FeatureError> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Ok(self.cells[i * self.symbols.len() + j])
    }

    /// The symbols covered, in matrix order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    fn index_of(&self, symbol: &str) -> Result<usize, FeatureError> {
        self.index
            .get(symbol)
            .copied()
            .ok_or_else(|| FeatureError::UnknownSymbol(symbol.to_string()))
    }

    fn build_index(symbols: &[String]) -> HashMap<String, usize> {
        symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect()
    }

    fn check_invariants(&self) -> Result<(), FeatureError> {
        let n = self.symbols.len();
        for i in 0..n {
            if self.cells[i * n + i] != 0 {
                return Err(FeatureError::InvalidMatrix(format!(
                    "nonzero diagonal for {}",
                    self.symbols[i]
                )));
            }
            for j in (i + 1)..n {
                if self.cells[i * n + j] != self.cells[j * n + i] {
                    return Err(FeatureError::InvalidMatrix(format!(
                        "asymmetric cell for {} / {}",
                        self.symbols[i], self.symbols[j]
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived() -> DistanceMatrix {
        let table = FeatureTable::embedded().unwrap();
        DistanceMatrix::from_features(&table).unwrap()
    }

    #[test]
    fn symmetric_with_zero_diagonal() {
        let matrix = derived();
        for a in matrix.symbols().to_vec() {
            assert_eq!(matrix.distance(&a, &a).unwrap(), 0);
            for b in matrix.symbols().to_vec() {
                assert_eq!(
                    matrix.distance(&a, &b).unwrap(),
                    matrix.distance(&b, &a).unwrap(),
                    "asymmetry at {a}/{b}"
                );
            }
        }
    }

    #[test]
    fn voicing_pair_distance_is_one() {
        let matrix = derived();
        assert_eq!(matrix.distance("T", "D").unwrap(), 1);
        assert_eq!(matrix.distance("S", "Z").unwrap(), 1);
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let matrix = derived();
        assert!(matches!(
            matrix.distance("T", "QX"),
            Err(FeatureError::UnknownSymbol(_))
        ));
    }

    #[test]
    fn csv_round_trip() {
        let matrix = derived();
        let parsed = DistanceMatrix::parse_csv(&matrix.to_csv()).unwrap();
        assert_eq!(parsed.symbols(), matrix.symbols());
        for a in matrix.symbols().to_vec() {
            for b in matrix.symbols().to_vec() {
                assert_eq!(
                    parsed.distance(&a, &b).unwrap(),
                    matrix.distance(&a, &b).unwrap()
                );
            }
        }
    }

    #[test]
    fn reject_asymmetric_matrix() {
        let csv = ",a,b\na,0,1\nb,2,0\n";
        assert!(matches!(
            DistanceMatrix::parse_csv(csv),
            Err(FeatureError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn reject_nonzero_diagonal() {
        let csv = ",a,b\na,1,2\nb,2,0\n";
        assert!(matches!(
            DistanceMatrix::parse_csv(csv),
            Err(FeatureError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn reject_missing_rows() {
        let csv = ",a,b\na,0,1\n";
        assert!(matches!(
            DistanceMatrix::parse_csv(csv),
            Err(FeatureError::InvalidMatrix(_))
        ));
    }
}
