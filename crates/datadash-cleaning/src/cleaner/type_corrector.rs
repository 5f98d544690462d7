//! Type validation: coerce text cells to numbers, booleans and ISO dates.

use super::converters::{text_to_boolean, text_to_iso_date, text_to_number};
use crate::types::{CellValue, Record};
use tracing::{debug, trace};

/// Coerce a single cell.
///
/// Only non-empty text is examined. The first conversion that succeeds wins:
/// finite number, then `true`/`false`, then a calendar date. Anything else is
/// returned unchanged.
pub fn coerce_cell(value: &CellValue) -> CellValue {
    let CellValue::Text(text) = value else {
        return value.clone();
    };
    if text.is_empty() {
        return value.clone();
    }

    text_to_number(text)
        .or_else(|| text_to_boolean(text))
        .or_else(|| text_to_iso_date(text))
        .unwrap_or_else(|| value.clone())
}

/// Coerce every cell of `columns` to its detected type.
///
/// Returns the new rows and the number of cells whose variant changed.
pub fn validate_data_types(rows: &[Record], columns: &[String]) -> (Vec<Record>, usize) {
    let mut corrected = 0;

    let output: Vec<Record> = rows
        .iter()
        .map(|row| {
            let mut new_row = row.clone();
            for column in columns {
                let Some(value) = new_row.get_mut(column) else {
                    continue;
                };
                let coerced = coerce_cell(value);
                if !coerced.same_variant(value) {
                    trace!(
                        "Column '{}': {} -> {}",
                        column,
                        value.type_name(),
                        coerced.type_name()
                    );
                    corrected += 1;
                }
                *value = coerced;
            }
            new_row
        })
        .collect();

    debug!("Corrected {} data types", corrected);
    (output, corrected)
}
