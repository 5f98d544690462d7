//! Duplicate row elimination over a composite key.

use crate::types::{Record, cell};
use std::collections::HashSet;
use tracing::debug;

/// Separator between key columns in the composite key.
pub const KEY_SEPARATOR: &str = "|";

/// Build the composite key of a row over `key_columns`.
///
/// Absent cells contribute the empty string.
pub fn composite_key(row: &Record, key_columns: &[String]) -> String {
    key_columns
        .iter()
        .map(|column| cell(row, column).to_plain_string())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Keep the first row of every composite key, preserving row order.
///
/// The key covers only `key_columns`: rows that differ solely in other
/// fields collapse into the first of them. Keys are plain joins, so a cell
/// containing `|` can make two different rows share a key.
pub fn remove_duplicates(rows: &[Record], key_columns: &[String]) -> Vec<Record> {
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());

    let unique: Vec<Record> = rows
        .iter()
        .filter(|row| seen.insert(composite_key(row, key_columns)))
        .cloned()
        .collect();

    debug!(
        "Duplicate check kept {} of {} rows",
        unique.len(),
        rows.len()
    );
    unique
}
