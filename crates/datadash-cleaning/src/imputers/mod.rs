//! Imputation module for handling missing values.
//!
//! Fill values are inferred per column from a sample of the column's own
//! non-missing values.

mod statistical;

pub use statistical::{NUMERIC_FILL_VALUE, StatisticalImputer, UNKNOWN_FILL_VALUE};
