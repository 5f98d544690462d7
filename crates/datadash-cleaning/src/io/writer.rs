//! CSV export of cleaned records.

use crate::error::{Result, ResultExt};
use crate::types::{Record, cell};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// How cell values are quoted in exported CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    /// Byte-for-byte the dashboard download: embedded quotes are not
    /// escaped and falsy values (`0`, `false`, empty, absent) are written
    /// as `""`.
    Legacy,
    /// Embedded quotes are doubled and every value keeps its string form.
    #[default]
    Escaped,
}

/// Render rows as CSV text.
///
/// The header is the column names joined by `,` (unquoted). Each row writes
/// every column's value wrapped in double quotes. Lines are joined with
/// `\n` and there is no trailing newline.
pub fn export_csv(rows: &[Record], columns: &[String], quoting: CsvQuoting) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join(","));

    for row in rows {
        let fields: Vec<String> = columns
            .iter()
            .map(|column| {
                let value = cell(row, column);
                match quoting {
                    CsvQuoting::Legacy if value.is_truthy() => {
                        format!("\"{}\"", value.to_plain_string())
                    }
                    CsvQuoting::Legacy => "\"\"".to_string(),
                    CsvQuoting::Escaped => {
                        format!("\"{}\"", value.to_plain_string().replace('"', "\"\""))
                    }
                }
            })
            .collect();
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

/// Write rows as CSV to a file.
pub fn write_csv(
    path: impl AsRef<Path>,
    rows: &[Record],
    columns: &[String],
    quoting: CsvQuoting,
) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, export_csv(rows, columns, quoting))
        .context(format!("Failed to write {}", path.display()))?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, record};
    use pretty_assertions::assert_eq;

    fn sample() -> (Vec<Record>, Vec<String>) {
        let rows = vec![
            record([
                ("name", CellValue::from("Ada \"the first\"")),
                ("age", CellValue::from(36.0)),
                ("active", CellValue::from(true)),
            ]),
            record([
                ("name", CellValue::from("Bob")),
                ("age", CellValue::from(0.0)),
                ("active", CellValue::from(false)),
            ]),
        ];
        let columns = vec!["name".to_string(), "age".to_string(), "active".to_string()];
        (rows, columns)
    }

    #[test]
    fn test_escaped_export() {
        let (rows, columns) = sample();
        let csv = export_csv(&rows, &columns, CsvQuoting::Escaped);
        assert_eq!(
            csv,
            "name,age,active\n\"Ada \"\"the first\"\"\",\"36\",\"true\"\n\"Bob\",\"0\",\"false\""
        );
    }

    #[test]
    fn test_legacy_export_drops_falsy_values() {
        let (rows, columns) = sample();
        let csv = export_csv(&rows, &columns, CsvQuoting::Legacy);
        assert_eq!(
            csv,
            "name,age,active\n\"Ada \"the first\"\",\"36\",\"true\"\n\"Bob\",\"\",\"\""
        );
    }

    #[test]
    fn test_absent_cells_export_empty() {
        let rows = vec![record([("a", "x")])];
        let columns = vec!["a".to_string(), "b".to_string()];
        assert_eq!(export_csv(&rows, &columns, CsvQuoting::default()), "a,b\n\"x\",\"\"");
    }

    #[test]
    fn test_header_only_for_empty_rows() {
        let columns = vec!["a".to_string(), "b".to_string()];
        assert_eq!(export_csv(&[], &columns, CsvQuoting::Escaped), "a,b");
    }

    #[test]
    fn test_write_csv_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        let (rows, columns) = sample();

        write_csv(&path, &rows, &columns, CsvQuoting::Escaped).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, export_csv(&rows, &columns, CsvQuoting::Escaped));
    }
}
