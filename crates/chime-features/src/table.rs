// Feature table: binary phonological feature vectors keyed by segment.

use hashbrown::HashMap;

use crate::FeatureError;
use crate::arpabet;

/// The feature table shipped with the crate, covering the whole ARPABET
/// inventory in derived form (diphthong rows carry their onset vowel's
/// features plus an offglide bit, syllabic r carries the r row with
/// `syllabic` set).
const EMBEDDED_TABLE: &str = include_str!("../data/features.csv");

/// A segment's binary profile over the feature system.
///
/// Values are ordered to match the owning table's feature-name list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    values: Vec<bool>,
}

impl FeatureVector {
    /// The feature values in table column order.
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Count of positions where the two vectors disagree.
    pub fn hamming(&self, other: &FeatureVector) -> u32 {
        self.values
            .iter()
            .zip(&other.values)
            .filter(|(a, b)| a != b)
            .count() as u32
    }
}

/// Feature vectors for every symbol in the phonetic inventory.
///
/// Rows are keyed by IPA spelling as persisted; lookups by ARPABET
/// symbol go through the inventory mapping. The table is immutable
/// after parsing.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    feature_names: Vec<String>,
    rows: HashMap<String, FeatureVector>,
}

impl FeatureTable {
    /// Parse a feature table from CSV text.
    ///
    /// The header row is `symbol` followed by one column per feature
    /// name; each data row is an IPA symbol followed by `0`/`1` cells,
    /// one per feature.
    pub fn parse_csv(source: &str) -> Result<Self, FeatureError> {
        let mut lines = source.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| FeatureError::InvalidTable("missing header row".to_string()))?;
        let mut columns = header.split(',');
        columns.next(); // symbol column
        let feature_names: Vec<String> = columns.map(|c| c.trim().to_string()).collect();
        if feature_names.is_empty() {
            return Err(FeatureError::InvalidTable(
                "header declares no features".to_string(),
            ));
        }

        let mut rows = HashMap::new();
        for (line_no, line) in lines {
            let mut cells = line.split(',');
            let symbol = cells
                .next()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    FeatureError::InvalidTable(format!("line {}: missing symbol", line_no + 1))
                })?;

            let mut values = Vec::with_capacity(feature_names.len());
            for cell in cells {
                match cell.trim() {
                    "0" => values.push(false),
                    "1" => values.push(true),
                    other => {
                        return Err(FeatureError::InvalidTable(format!(
                            "line {}: value {other:?} is not 0 or 1",
                            line_no + 1
                        )));
                    }
                }
            }
            if values.len() != feature_names.len() {
                return Err(FeatureError::InvalidTable(format!(
                    "line {}: expected {} values, got {}",
                    line_no + 1,
                    feature_names.len(),
                    values.len()
                )));
            }

            if rows
                .insert(symbol.to_string(), FeatureVector { values })
                .is_some()
            {
                return Err(FeatureError::InvalidTable(format!(
                    "line {}: duplicate symbol {symbol}",
                    line_no + 1
                )));
            }
        }

        Ok(Self {
            feature_names,
            rows,
        })
    }

    /// Load the table embedded in the crate and verify it covers the
    /// whole ARPABET inventory.
    pub fn embedded() -> Result<Self, FeatureError> {
        let table = Self::parse_csv(EMBEDDED_TABLE)?;
        for symbol in arpabet::symbols() {
            table.vector(symbol)?;
        }
        Ok(table)
    }

    /// The feature names in column order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by its IPA key.
    pub fn vector_ipa(&self, ipa: &str) -> Option<&FeatureVector> {
        self.rows.get(ipa)
    }

    /// Look up a row by stress-stripped ARPABET symbol.
    pub fn vector(&self, symbol: &str) -> Result<&FeatureVector, FeatureError> {
        arpabet::to_ipa(symbol)
            .and_then(|ipa| self.rows.get(ipa))
            .ok_or_else(|| FeatureError::UnknownSymbol(symbol.to_string()))
    }

    /// Names of the features on which two ARPABET symbols disagree,
    /// in column order.
    pub fn differing(&self, a: &str, b: &str) -> Result<Vec<&str>, FeatureError> {
        let va = self.vector(a)?;
        let vb = self.vector(b)?;
        Ok(self
            .feature_names
            .iter()
            .zip(va.values().iter().zip(vb.values()))
            .filter(|(_, (x, y))| x != y)
            .map(|(name, _)| name.as_str())
            .collect())
    }
}
