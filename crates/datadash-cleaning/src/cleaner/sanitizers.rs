//! Value standardization for text cells.

use crate::types::{CellValue, Record};
use crate::utils::{is_false_token, is_null_token, is_true_token};
use tracing::debug;

/// Canonical text for boolean-true tokens.
pub const CANONICAL_TRUE: &str = "True";

/// Canonical text for boolean-false tokens.
pub const CANONICAL_FALSE: &str = "False";

/// Standardize a single text value.
///
/// Trims surrounding whitespace, then maps boolean-like tokens to
/// `True`/`False` and null tokens to the empty string.
pub fn standardize_text(value: &str) -> String {
    let trimmed = value.trim();

    if is_true_token(trimmed) {
        CANONICAL_TRUE.to_string()
    } else if is_false_token(trimmed) {
        CANONICAL_FALSE.to_string()
    } else if is_null_token(trimmed) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Standardize every text cell of `columns`.
///
/// Non-text cells pass through. Returns the new rows and the number of
/// cells whose value changed.
pub fn standardize_values(rows: &[Record], columns: &[String]) -> (Vec<Record>, usize) {
    let mut changed = 0;

    let output: Vec<Record> = rows
        .iter()
        .map(|row| {
            let mut new_row = row.clone();
            for column in columns {
                let Some(CellValue::Text(text)) = new_row.get_mut(column) else {
                    continue;
                };
                let standardized = standardize_text(text);
                if standardized != *text {
                    *text = standardized;
                    changed += 1;
                }
            }
            new_row
        })
        .collect();

    debug!("Standardized {} values", changed);
    (output, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standardize_text_tokens() {
        assert_eq!(standardize_text("  TRUE  "), "True");
        assert_eq!(standardize_text("1"), "True");
        assert_eq!(standardize_text("false"), "False");
        assert_eq!(standardize_text("0"), "False");
        assert_eq!(standardize_text("NULL"), "");
        assert_eq!(standardize_text("nan"), "");
        assert_eq!(standardize_text(" Paris "), "Paris");
        assert_eq!(standardize_text("10"), "10");
    }

    #[test]
    fn test_standardize_values_counts_changes() {
        let rows = vec![
            record([("flag", "  TRUE  "), ("city", "Paris")]),
            record([("flag", "0"), ("city", " Lyon")]),
            record([("flag", "True"), ("city", "Nice")]),
        ];
        let columns = vec!["flag".to_string(), "city".to_string()];
        let (result, changed) = standardize_values(&rows, &columns);

        assert_eq!(changed, 3);
        assert_eq!(result[0]["flag"], CellValue::from("True"));
        assert_eq!(result[1]["flag"], CellValue::from("False"));
        assert_eq!(result[1]["city"], CellValue::from("Lyon"));
    }

    #[test]
    fn test_non_text_cells_untouched() {
        let rows = vec![record([
            ("n", CellValue::from(1.0)),
            ("b", CellValue::from(true)),
            ("x", CellValue::Absent),
        ])];
        let columns = vec!["n".to_string(), "b".to_string(), "x".to_string()];
        let (result, changed) = standardize_values(&rows, &columns);
        assert_eq!(result, rows);
        assert_eq!(changed, 0);
    }

    #[test]
    fn test_columns_outside_list_untouched() {
        let rows = vec![record([("a", " x "), ("b", " y ")])];
        let (result, _) = standardize_values(&rows, &["a".to_string()]);
        assert_eq!(result[0]["a"], CellValue::from("x"));
        assert_eq!(result[0]["b"], CellValue::from(" y "));
    }
}
