//! Shared utilities for the data cleaning pipeline.
//!
//! This module contains common helper functions used across multiple modules
//! to reduce code duplication and ensure consistency.

use crate::types::{CellValue, Record, cell};

// =============================================================================
// Token Utilities
// =============================================================================

/// Tokens standardized to the canonical `"True"` (compared case-insensitively).
pub const BOOLEAN_TRUE_TOKENS: [&str; 2] = ["true", "1"];

/// Tokens standardized to the canonical `"False"` (compared case-insensitively).
pub const BOOLEAN_FALSE_TOKENS: [&str; 2] = ["false", "0"];

/// Null representations standardized to the empty string.
pub const NULL_TOKENS: [&str; 2] = ["null", "nan"];

fn matches_token(s: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| s.eq_ignore_ascii_case(t))
}

/// Check if a string is a boolean-true token (`true`, `1`).
pub fn is_true_token(s: &str) -> bool {
    matches_token(s, &BOOLEAN_TRUE_TOKENS)
}

/// Check if a string is a boolean-false token (`false`, `0`).
pub fn is_false_token(s: &str) -> bool {
    matches_token(s, &BOOLEAN_FALSE_TOKENS)
}

/// Check if a string is a null token (`null`, `nan`).
pub fn is_null_token(s: &str) -> bool {
    matches_token(s, &NULL_TOKENS)
}

// =============================================================================
// Numeric Parsing Utilities
// =============================================================================

/// Parse the longest numeric prefix of a string.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12kg"`
/// yields `12.0` while `"kg12"` yields `None`. `Infinity` with an optional
/// sign is accepted.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(parse_float_prefix("  3.5 apples"), Some(3.5));
/// assert_eq!(parse_float_prefix("abc"), None);
/// ```
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let sign = if s.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parse a whole string as a finite number.
///
/// Surrounding whitespace is ignored; anything else that is not part of a
/// decimal literal makes the parse fail. Infinite and NaN values are rejected.
pub fn parse_finite_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Word forms that `f64::from_str` accepts but are not decimal literals
    let lower = trimmed.trim_start_matches(['+', '-']).to_ascii_lowercase();
    if lower.starts_with("inf") || lower.starts_with("nan") {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether a cell looks numeric for fill-value inference.
///
/// Numbers count, booleans never do, text counts when it has a numeric prefix.
pub fn looks_numeric(value: &CellValue) -> bool {
    match value {
        CellValue::Number(n) => !n.is_nan(),
        CellValue::Text(s) | CellValue::DateIso(s) => parse_float_prefix(s).is_some(),
        CellValue::Boolean(_) | CellValue::Absent => false,
    }
}

// =============================================================================
// Column Utilities
// =============================================================================

/// Collect up to `max_samples` non-missing values of a column, in row order.
pub fn collect_sample_values<'a>(
    rows: &'a [Record],
    column: &str,
    max_samples: usize,
) -> Vec<&'a CellValue> {
    rows.iter()
        .map(|row| cell(row, column))
        .filter(|value| !value.is_missing())
        .take(max_samples)
        .collect()
}

/// Count blank (absent or empty) cells of a column.
pub fn count_blank_cells(rows: &[Record], column: &str) -> usize {
    rows.iter()
        .filter(|row| cell(row, column).is_blank())
        .count()
}

/// Column names in first-seen order across all records.
pub fn infer_columns(rows: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

// =============================================================================
// Tests
// =============================================================================
