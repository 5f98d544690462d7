//! Pipeline module.
//!
//! This module provides the cleaning pipeline and its progress reporting.

mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder, clean_dataset};
pub use progress::{ClosureProgressReporter, CleaningStage, ProgressReporter, ProgressUpdate};
