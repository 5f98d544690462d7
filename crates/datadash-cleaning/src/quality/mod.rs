//! Data quality scoring module.
//!
//! This module turns the change counts of a cleaning run into a single
//! 0-100 score that drops as more intervention was needed.

mod scorer;

pub use scorer::{EMPTY_DATASET_SCORE, calculate_quality_score, clamp_score};
