//! Dataset ingestion and export.
//!
//! Uploaded files are read into the record model (CSV through polars with
//! every column kept as text, JSON as an array of objects, Excel through
//! calamine) and cleaned records are exported back to CSV.

mod excel;
mod reader;
mod writer;

pub use reader::{DataFormat, LoadedDataset, load_dataset, parse_csv, parse_json};
pub use writer::{CsvQuoting, export_csv, write_csv};
