//! Reading uploaded files into records.

use super::excel::read_excel;
use crate::error::{CleaningError, Result, ResultExt};
use crate::types::{CellValue, Dataset, Record};
use crate::utils::infer_columns;
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Csv,
    Json,
    /// First worksheet of an `.xlsx`/`.xls`/`.xlsb`/`.ods` workbook.
    Excel,
}

impl DataFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" | "xls" | "xlsb" | "ods" => Ok(Self::Excel),
            "" => Err(CleaningError::UnsupportedFormat(format!(
                "{} has no file extension",
                path.display()
            ))),
            other => Err(CleaningError::UnsupportedFormat(format!(
                ".{} files are not supported",
                other
            ))),
        }
    }
}

/// A parsed dataset together with its column list.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub rows: Dataset,
    /// Header order for CSV and Excel, JSON keys in first-seen order.
    pub columns: Vec<String>,
    pub format: DataFormat,
}

/// Load a CSV, JSON or Excel file.
///
/// Rows in which every cell is blank are dropped.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<LoadedDataset> {
    let path = path.as_ref();
    let format = DataFormat::from_path(path)?;
    info!("Loading {:?} dataset from {}", format, path.display());

    let dataset = match format {
        DataFormat::Csv => read_csv_file(path),
        DataFormat::Json => {
            let text = std::fs::read_to_string(path)
                .context(format!("Failed to read {}", path.display()))?;
            parse_json(&text)
        }
        DataFormat::Excel => read_excel(path),
    }
    .map_err(|e| e.with_context(format!("Loading {}", path.display())))?;

    debug!(
        "Loaded {} rows with {} columns",
        dataset.rows.len(),
        dataset.columns.len()
    );
    Ok(dataset)
}

fn csv_options() -> CsvReadOptions {
    // Schema inference disabled: every column stays a string column
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_missing_is_null(false),
        )
}

fn read_csv_file(path: &Path) -> Result<LoadedDataset> {
    let df = csv_options()
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))
        .context("Failed to open CSV file")?
        .finish()
        .context("Failed to parse CSV")?;

    dataframe_to_dataset(&df)
}

/// Parse CSV text with a header row.
pub fn parse_csv(content: &str) -> Result<LoadedDataset> {
    let df = csv_options()
        .into_reader_with_file_handle(Cursor::new(content.as_bytes().to_vec()))
        .finish()
        .context("Failed to parse CSV")?;

    dataframe_to_dataset(&df)
}

fn dataframe_to_dataset(df: &DataFrame) -> Result<LoadedDataset> {
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let mut cells_by_column: Vec<Vec<CellValue>> = Vec::with_capacity(columns.len());
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let values = series
            .str()
            .context(format!("Column '{}' was not read as text", series.name()))?
            .into_iter()
            .map(|value| value.map_or(CellValue::Absent, CellValue::from))
            .collect();
        cells_by_column.push(values);
    }

    let rows = (0..df.height())
        .map(|idx| {
            columns
                .iter()
                .zip(&cells_by_column)
                .map(|(name, cells)| (name.clone(), cells[idx].clone()))
                .collect::<Record>()
        })
        .collect();

    Ok(LoadedDataset {
        rows: drop_blank_rows(rows),
        columns,
        format: DataFormat::Csv,
    })
}

/// Drop rows in which every cell is absent or empty.
pub(crate) fn drop_blank_rows(rows: Dataset) -> Dataset {
    let before = rows.len();
    let kept: Dataset = rows
        .into_iter()
        .filter(|row| row.values().any(|value| !value.is_blank()))
        .collect();

    if kept.len() < before {
        debug!("Dropped {} blank rows", before - kept.len());
    }
    kept
}

/// Parse JSON text holding an array of flat objects.
///
/// The column list is the union of object keys in first-seen order.
/// Strings, numbers, booleans and `null` become cells directly; nested
/// arrays and objects are kept as their JSON text.
pub fn parse_json(content: &str) -> Result<LoadedDataset> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let serde_json::Value::Array(items) = value else {
        return Err(CleaningError::InvalidInput(
            "JSON data must be an array of objects".to_string(),
        ));
    };

    let rows = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, json_to_cell(value)))
                .collect::<Record>()),
            other => Err(CleaningError::InvalidInput(format!(
                "Element {} of the JSON array is not an object: {}",
                idx, other
            ))),
        })
        .collect::<Result<Dataset>>()?;

    let columns = infer_columns(&rows);
    Ok(LoadedDataset {
        rows: drop_blank_rows(rows),
        columns,
        format: DataFormat::Json,
    })
}

fn json_to_cell(value: serde_json::Value) -> CellValue {
    match value {
        serde_json::Value::Null => CellValue::Absent,
        serde_json::Value::Bool(b) => CellValue::Boolean(b),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map_or_else(|| CellValue::Text(n.to_string()), CellValue::Number),
        serde_json::Value::String(s) => CellValue::Text(s),
        nested => CellValue::Text(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_detection() {
        assert_eq!(DataFormat::from_path(Path::new("a/b.CSV")).unwrap(), DataFormat::Csv);
        assert_eq!(DataFormat::from_path(Path::new("data.json")).unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("book.XLSX")).unwrap(), DataFormat::Excel);
        assert_eq!(DataFormat::from_path(Path::new("old.xls")).unwrap(), DataFormat::Excel);

        let err = DataFormat::from_path(Path::new("notes.txt")).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
        assert!(DataFormat::from_path(Path::new("notes")).is_err());
    }

    #[test]
    fn test_parse_csv_keeps_text() {
        let loaded = parse_csv("name,age,active\nAda,36,true\nBob,,false\n").unwrap();

        assert_eq!(loaded.columns, vec!["name", "age", "active"]);
        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.rows[0]["age"], CellValue::from("36"));
        assert_eq!(loaded.rows[0]["active"], CellValue::from("true"));
        assert_eq!(loaded.rows[1]["age"], CellValue::from(""));
    }

    #[test]
    fn test_parse_csv_drops_blank_rows() {
        let loaded = parse_csv("a,b\n1,2\n,\n3,\n").unwrap();

        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.rows[1]["a"], CellValue::from("3"));
    }

    #[test]
    fn test_parse_csv_quoted_fields() {
        let loaded = parse_csv("city,note\n\"Paris, FR\",\"  padded  \"\n").unwrap();
        assert_eq!(loaded.rows[0]["city"], CellValue::from("Paris, FR"));
        assert_eq!(loaded.rows[0]["note"], CellValue::from("  padded  "));
    }

    #[test]
    fn test_parse_json_records() {
        let loaded = parse_json(
            r#"[{"name": "Ada", "age": 36, "tags": ["x"]}, {"name": null, "city": "Oslo"}]"#,
        )
        .unwrap();

        assert_eq!(loaded.columns, vec!["name", "age", "tags", "city"]);
        assert_eq!(loaded.rows[0]["age"], CellValue::Number(36.0));
        assert_eq!(loaded.rows[0]["tags"], CellValue::from("[\"x\"]"));
        assert_eq!(loaded.rows[1]["name"], CellValue::Absent);
        assert_eq!(loaded.format, DataFormat::Json);
    }

    #[test]
    fn test_parse_json_drops_blank_rows() {
        let loaded = parse_json(r#"[{"a": "x"}, {"a": null, "b": ""}, {}, {"b": 0}]"#).unwrap();

        assert_eq!(loaded.columns, vec!["a", "b"]);
        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.rows[1]["b"], CellValue::Number(0.0));
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        let err = parse_json(r#"{"name": "Ada"}"#).unwrap_err();
        assert!(err.is_input_error());

        let err = parse_json(r#"[{"a": 1}, 2]"#).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("Element 1"));
    }

    #[test]
    fn test_parse_json_syntax_error() {
        let err = parse_json("[{").unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
    }
}
