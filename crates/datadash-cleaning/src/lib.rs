//! Data Cleaning Library for the DataDash dashboard
//!
//! A rule-based cleaning pipeline for uploaded tabular data, with optional
//! AI-generated cleaning advice.
//!
//! # Overview
//!
//! This library provides:
//!
//! - **Deduplication**: first-seen-wins removal over a composite key
//! - **Missing Values**: drop rows, impute from the column sample, or keep
//! - **Standardization**: trimming and boolean/null token canonicalization
//! - **Type Validation**: text to number, boolean and ISO date coercion
//! - **Quality Score**: a single 0-100 number summarizing the interventions
//! - **Advisory Suggestions**: AI-generated recommendations with a rule-based fallback
//! - **Data Insights**: AI-generated insights and chart recommendations
//! - **Ingestion and Export**: CSV/JSON/Excel loading and CSV download
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use datadash_cleaning::{CleaningOptions, MissingValueStrategy, clean_dataset};
//! use datadash_cleaning::io::{CsvQuoting, export_csv, load_dataset};
//!
//! let dataset = load_dataset("customers.csv")?;
//!
//! let options = CleaningOptions::builder()
//!     .missing_value_strategy(MissingValueStrategy::Fill)
//!     .build()?;
//!
//! let result = clean_dataset(&dataset.rows, &dataset.columns, &options)?;
//! println!("Quality score: {}", result.quality_score);
//!
//! let csv = export_csv(&result.cleaned_data, &dataset.columns, CsvQuoting::Escaped);
//! ```
//!
//! # AI Providers
//!
//! Suggestions come from any [`ai::AIProvider`]. The Gemini provider
//! ([`ai::GeminiProvider`]) is available with the `ai` feature. When the
//! provider fails, [`get_ai_cleaning_suggestions`] returns the rule-based
//! suggestions instead of an error.
//!
//! # Progress Reporting
//!
//! ```rust,ignore
//! use datadash_cleaning::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {}", update.stage, update.message);
//!     })
//!     .build()?
//!     .clean_dataset(&rows, &columns)?;
//! ```

pub mod advisory;
pub mod ai;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod insights;
pub mod io;
pub mod pipeline;
pub mod quality;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use advisory::{
    AiSuggestionEngine, SuggestionEngine, fallback_suggestions, get_ai_cleaning_suggestions,
};
pub use cleaner::{
    handle_missing_values, remove_duplicates, standardize_values, validate_data_types,
};
pub use config::{
    CleaningOptions, CleaningOptionsBuilder, ConfigValidationError, MissingValueStrategy,
    QualityDenominator,
};
pub use error::{CleaningError, ResultExt};
pub use imputers::StatisticalImputer;
pub use insights::analyze_data_with_ai;
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate, clean_dataset,
};
pub use quality::{calculate_quality_score, clamp_score};
pub use types::{
    AdvisorySuggestion, CellValue, CleaningReport, CleaningResult, DataInsights, Dataset,
    Priority, Record, ValidationError,
};
