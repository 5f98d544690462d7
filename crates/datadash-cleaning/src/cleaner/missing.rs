//! Missing-value handling: drop, fill or keep rows with missing cells.

use crate::config::MissingValueStrategy;
use crate::imputers::StatisticalImputer;
use crate::types::{CellValue, Record, cell};
use tracing::debug;

/// Whether any of `columns` is missing in the row.
pub fn has_missing(row: &Record, columns: &[String]) -> bool {
    columns.iter().any(|column| cell(row, column).is_missing())
}

/// Apply a missing-value policy with the default imputer.
///
/// Returns the resulting rows and the number of cells that were filled.
pub fn handle_missing_values(
    rows: &[Record],
    columns: &[String],
    strategy: MissingValueStrategy,
) -> (Vec<Record>, usize) {
    handle_missing_values_with(rows, columns, strategy, &StatisticalImputer::default())
}

/// Apply a missing-value policy using the given imputer for `Fill`.
pub fn handle_missing_values_with(
    rows: &[Record],
    columns: &[String],
    strategy: MissingValueStrategy,
    imputer: &StatisticalImputer,
) -> (Vec<Record>, usize) {
    match strategy {
        MissingValueStrategy::Remove => {
            let kept: Vec<Record> = rows
                .iter()
                .filter(|row| !has_missing(row, columns))
                .cloned()
                .collect();
            debug!("Removed {} rows with missing values", rows.len() - kept.len());
            (kept, 0)
        }
        MissingValueStrategy::Fill => fill_missing(rows, columns, imputer),
        MissingValueStrategy::Keep => (rows.to_vec(), 0),
    }
}

fn fill_missing(
    rows: &[Record],
    columns: &[String],
    imputer: &StatisticalImputer,
) -> (Vec<Record>, usize) {
    // Fill values come from the pre-fill dataset, inferred lazily once per column
    let mut fill_values: Vec<Option<CellValue>> = vec![None; columns.len()];
    let mut filled = 0;

    let output = rows
        .iter()
        .map(|row| {
            let mut new_row = row.clone();
            for (idx, column) in columns.iter().enumerate() {
                if !cell(row, column).is_missing() {
                    continue;
                }
                let value = fill_values[idx]
                    .get_or_insert_with(|| imputer.infer_fill_value(rows, column))
                    .clone();
                new_row.insert(column.clone(), value);
                filled += 1;
            }
            new_row
        })
        .collect();

    debug!("Filled {} missing cells", filled);
    (output, filled)
}
