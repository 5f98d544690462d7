//! Statistical imputation of missing cells.
//!
//! The fill value of a column is inferred from a small sample of its
//! non-missing values: numeric-looking columns get `"0"`, everything else
//! gets the sample mode.

use crate::config::CleaningOptions;
use crate::types::{CellValue, Record};
use crate::utils::{collect_sample_values, looks_numeric};
use indexmap::IndexMap;
use tracing::debug;

/// Value imputed into numeric-looking columns.
pub const NUMERIC_FILL_VALUE: &str = "0";

/// Value imputed when a column has no non-missing values at all.
pub const UNKNOWN_FILL_VALUE: &str = "Unknown";

/// Sample-based imputer for missing cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticalImputer {
    sample_size: usize,
    numeric_ratio: f64,
}

impl Default for StatisticalImputer {
    fn default() -> Self {
        Self::from_options(&CleaningOptions::default())
    }
}

impl StatisticalImputer {
    pub fn new(sample_size: usize, numeric_ratio: f64) -> Self {
        Self {
            sample_size,
            numeric_ratio,
        }
    }

    /// Build an imputer from the fill tunables of a cleaning run.
    pub fn from_options(options: &CleaningOptions) -> Self {
        Self::new(options.fill_sample_size, options.numeric_fill_ratio)
    }

    /// Infer the fill value for a column from the whole dataset.
    ///
    /// Takes the first `sample_size` non-missing values in row order. If at
    /// least `numeric_ratio` of them have a numeric prefix the result is
    /// `"0"`; otherwise it is the most frequent sampled value (by string form,
    /// ties resolved towards the value seen first). Without any samples the
    /// result is `"Unknown"`.
    pub fn infer_fill_value(&self, rows: &[Record], column: &str) -> CellValue {
        let samples = collect_sample_values(rows, column, self.sample_size);

        if samples.is_empty() {
            debug!(
                "Column '{}' has no values to sample, filling with '{}'",
                column, UNKNOWN_FILL_VALUE
            );
            return CellValue::from(UNKNOWN_FILL_VALUE);
        }

        let numeric_count = samples.iter().filter(|v| looks_numeric(v)).count();
        if numeric_count as f64 >= samples.len() as f64 * self.numeric_ratio {
            debug!(
                "Column '{}' looks numeric ({}/{} samples), filling with '{}'",
                column,
                numeric_count,
                samples.len(),
                NUMERIC_FILL_VALUE
            );
            return CellValue::from(NUMERIC_FILL_VALUE);
        }

        let mode = sample_mode(&samples);
        debug!("Column '{}' filled with mode '{}'", column, mode);
        CellValue::from(mode)
    }
}

/// Most frequent string form among the samples, first-seen on ties.
fn sample_mode(samples: &[&CellValue]) -> String {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in samples {
        *counts.entry(value.to_plain_string().into_owned()).or_insert(0) += 1;
    }

    let mut best: Option<(&String, usize)> = None;
    for (value, &count) in &counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record;

    fn column_rows(values: &[&str]) -> Vec<Record> {
        values.iter().map(|v| record([("c", *v)])).collect()
    }

    #[test]
    fn test_numeric_column_fills_zero() {
        let rows = column_rows(&["1", "2", "3", "4", "5", "6", "7", "8", "x", "y", ""]);
        let imputer = StatisticalImputer::default();
        assert_eq!(imputer.infer_fill_value(&rows, "c"), CellValue::from("0"));
    }

    #[test]
    fn test_exactly_half_numeric_fills_zero() {
        let rows = column_rows(&[
            "1", "2", "3", "4", "5", "red", "red", "red", "blue", "green", "",
        ]);
        let imputer = StatisticalImputer::default();
        assert_eq!(imputer.infer_fill_value(&rows, "c"), CellValue::from("0"));
    }

    #[test]
    fn test_under_half_numeric_uses_mode() {
        let rows = column_rows(&["1", "2", "red", "red", "blue"]);
        let imputer = StatisticalImputer::default();
        assert_eq!(imputer.infer_fill_value(&rows, "c"), CellValue::from("red"));
    }

    #[test]
    fn test_categorical_column_fills_mode() {
        let rows = column_rows(&["red", "blue", "red", "", "green", "red"]);
        let imputer = StatisticalImputer::default();
        assert_eq!(imputer.infer_fill_value(&rows, "c"), CellValue::from("red"));
    }

    #[test]
    fn test_mode_tie_prefers_first_seen() {
        let rows = column_rows(&["blue", "red", "red", "blue"]);
        let imputer = StatisticalImputer::default();
        assert_eq!(imputer.infer_fill_value(&rows, "c"), CellValue::from("blue"));
    }

    #[test]
    fn test_empty_column_fills_unknown() {
        let rows = column_rows(&["", "NaN", ""]);
        let imputer = StatisticalImputer::default();
        assert_eq!(imputer.infer_fill_value(&rows, "c"), CellValue::from("Unknown"));
    }

    #[test]
    fn test_sample_limited_to_first_values() {
        // The numeric tail is never sampled with a sample size of 3
        let rows = column_rows(&["a", "a", "b", "1", "2", "3", "4", "5"]);
        let imputer = StatisticalImputer::new(3, 0.5);
        assert_eq!(imputer.infer_fill_value(&rows, "c"), CellValue::from("a"));
    }

    #[test]
    fn test_number_cells_count_as_numeric() {
        let rows: Vec<Record> = [1.0, 2.0, 3.0]
            .into_iter()
            .map(|n| record([("c", n)]))
            .collect();
        let imputer = StatisticalImputer::default();
        assert_eq!(imputer.infer_fill_value(&rows, "c"), CellValue::from("0"));
    }
}
