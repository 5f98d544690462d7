//! Excel workbook ingestion through calamine.

use super::reader::{DataFormat, LoadedDataset, drop_blank_rows};
use crate::error::{CleaningError, Result};
use crate::types::{CellValue, Record};
use calamine::{DataType, Reader, open_workbook_auto};
use std::path::Path;
use tracing::debug;

/// Header given to columns whose header cell is blank.
const EMPTY_HEADER: &str = "__EMPTY";

/// Read the first worksheet of a workbook.
///
/// The first row holds the column names; every following row becomes a
/// record. Numbers, booleans and strings map to the matching cell variant,
/// date cells keep their serial number and empty cells are absent.
pub(crate) fn read_excel(path: &Path) -> Result<LoadedDataset> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook.sheet_names().first().cloned().ok_or_else(|| {
        CleaningError::InvalidInput(format!("{} contains no worksheets", path.display()))
    })?;

    let range = workbook.worksheet_range(&sheet_name).ok_or_else(|| {
        CleaningError::InvalidInput(format!("Unable to read worksheet '{}'", sheet_name))
    })??;
    debug!("Reading worksheet '{}' ({:?})", sheet_name, range.get_size());

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Ok(LoadedDataset {
            rows: Vec::new(),
            columns: Vec::new(),
            format: DataFormat::Excel,
        });
    };
    let columns = header_names(header_row);

    let rows = sheet_rows
        .map(|cells| {
            columns
                .iter()
                .enumerate()
                .map(|(idx, name)| {
                    let value = cells.get(idx).map_or(CellValue::Absent, excel_to_cell);
                    (name.clone(), value)
                })
                .collect::<Record>()
        })
        .collect();

    Ok(LoadedDataset {
        rows: drop_blank_rows(rows),
        columns,
        format: DataFormat::Excel,
    })
}

/// Column names from the header row. Blank headers become `__EMPTY`, and
/// repeated names get a `_1`, `_2`, ... suffix.
fn header_names(cells: &[DataType]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(cells.len());
    for cell in cells {
        let base = match cell {
            DataType::Empty => EMPTY_HEADER.to_string(),
            other => {
                let text = other.to_string();
                let text = text.trim();
                if text.is_empty() {
                    EMPTY_HEADER.to_string()
                } else {
                    text.to_string()
                }
            }
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }
    names
}

fn excel_to_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Absent,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::Int(i) => CellValue::Number(*i as f64),
        DataType::Bool(b) => CellValue::Boolean(*b),
        DataType::DateTime(serial) => CellValue::Number(*serial),
        other => CellValue::Text(other.to_string()),
    }
}
