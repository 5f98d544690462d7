//! Data cleaning stages for tabular records.
//!
//! This module provides the per-stage operations the pipeline sequences:
//! - Removing duplicate rows over a composite key
//! - Dropping or filling rows with missing values
//! - Standardizing text values
//! - Type validation and conversion
//!
//! Every stage borrows its input and returns new rows together with the
//! number of changes it made.

mod converters;
mod duplicates;
mod missing;
mod sanitizers;
mod type_corrector;

pub use converters::parse_date;
pub use duplicates::{KEY_SEPARATOR, composite_key, remove_duplicates};
pub use missing::{handle_missing_values, handle_missing_values_with, has_missing};
pub use sanitizers::{CANONICAL_FALSE, CANONICAL_TRUE, standardize_text, standardize_values};
pub use type_corrector::{coerce_cell, validate_data_types};
