//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the data cleaning workflow.

use crate::advisory::get_ai_cleaning_suggestions;
use crate::ai::AIProvider;
use crate::cleaner::{
    handle_missing_values_with, remove_duplicates, standardize_values, validate_data_types,
};
use crate::config::{CleaningOptions, ConfigValidationError};
use crate::error::{CleaningError, Result};
use crate::imputers::StatisticalImputer;
use crate::insights::analyze_data_with_ai;
use crate::pipeline::progress::{
    ClosureProgressReporter, CleaningStage, ProgressReporter, ProgressUpdate,
};
use crate::quality::calculate_quality_score;
use crate::types::{AdvisorySuggestion, CleaningReport, CleaningResult, DataInsights, Record};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// The main cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom options.
///
/// # Example
///
/// ```rust,ignore
/// use datadash_cleaning::{Pipeline, CleaningOptions, MissingValueStrategy};
/// use datadash_cleaning::ai::GeminiProvider;
/// use std::sync::Arc;
///
/// let provider = Arc::new(GeminiProvider::new(api_key)?);
///
/// let pipeline = Pipeline::builder()
///     .options(
///         CleaningOptions::builder()
///             .missing_value_strategy(MissingValueStrategy::Fill)
///             .build()?,
///     )
///     .ai_provider(provider)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?;
///
/// let suggestion = pipeline.suggest(&rows, &columns);
/// let result = pipeline.clean_dataset(&rows, &columns)?;
/// ```
pub struct Pipeline {
    options: CleaningOptions,
    ai_provider: Option<Arc<dyn AIProvider>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

// Hosts run the pipeline off their UI thread
static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The options every run of this pipeline uses.
    pub fn options(&self) -> &CleaningOptions {
        &self.options
    }

    /// Clean a dataset.
    ///
    /// Stages run in a fixed order: deduplication, missing values,
    /// standardization, type validation, scoring. `rows` is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`CleaningError::InvalidInput`] if a column name is empty or
    /// repeated. Any failure inside a stage aborts the whole run as
    /// [`CleaningError::CleaningFailed`]; no partial result is returned.
    pub fn clean_dataset(&self, rows: &[Record], columns: &[String]) -> Result<CleaningResult> {
        match self.clean_internal(rows, columns) {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Cleaned {} rows, quality score {}",
                    result.final_count, result.quality_score
                )));
                Ok(result)
            }
            Err(e) => {
                error!("Cleaning error: {}", e);
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                if e.is_input_error() {
                    Err(e)
                } else {
                    Err(CleaningError::CleaningFailed(e.to_string()))
                }
            }
        }
    }

    /// Get advisory suggestions for a dataset.
    ///
    /// Uses the configured AI provider when there is one and falls back to
    /// the rule-based suggestions otherwise. Never fails.
    pub fn suggest(&self, rows: &[Record], columns: &[String]) -> AdvisorySuggestion {
        get_ai_cleaning_suggestions(rows, columns, self.ai_provider.as_deref())
    }

    /// Get narrative insights and chart recommendations for a dataset.
    pub fn insights(&self, rows: &[Record], columns: &[String]) -> DataInsights {
        analyze_data_with_ai(rows, columns, self.ai_provider.as_deref())
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn stage_started(&self, stage: CleaningStage, message: &str) {
        info!("{}", message);
        self.report_progress(ProgressUpdate::new(stage, 0.0, message));
    }

    fn stage_finished(&self, stage: CleaningStage, message: String) {
        debug!("{}", message);
        self.report_progress(ProgressUpdate::new(stage, 1.0, message));
    }

    fn clean_internal(&self, rows: &[Record], columns: &[String]) -> Result<CleaningResult> {
        let start_time = Instant::now();

        self.stage_started(CleaningStage::Initializing, "Starting data cleaning...");
        validate_columns(columns)?;
        self.options
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;

        let original_count = rows.len();
        let mut report = CleaningReport::default();

        // Step 1: Duplicates
        let data = if self.options.remove_duplicates {
            self.stage_started(CleaningStage::Deduplication, "Step 1: Removing duplicate rows...");
            let unique = remove_duplicates(rows, columns);
            report.removed_duplicates = original_count - unique.len();
            self.stage_finished(
                CleaningStage::Deduplication,
                format!("Removed {} duplicate rows", report.removed_duplicates),
            );
            unique
        } else {
            info!("Step 1: Skipping duplicate removal (disabled)");
            rows.to_vec()
        };

        // Step 2: Missing values
        self.stage_started(
            CleaningStage::MissingValues,
            &format!(
                "Step 2: Handling missing values ({:?})...",
                self.options.missing_value_strategy
            ),
        );
        let before_missing = data.len();
        let imputer = StatisticalImputer::from_options(&self.options);
        let (data, filled) = handle_missing_values_with(
            &data,
            columns,
            self.options.missing_value_strategy,
            &imputer,
        );
        report.filled_missing_values = filled;
        report.rows_removed_missing = before_missing - data.len();
        self.stage_finished(
            CleaningStage::MissingValues,
            format!(
                "Filled {} cells, removed {} rows with missing values",
                report.filled_missing_values, report.rows_removed_missing
            ),
        );

        // Step 3: Standardization
        let data = if self.options.standardize_values {
            self.stage_started(CleaningStage::Standardization, "Step 3: Standardizing values...");
            let (standardized, changed) = standardize_values(&data, columns);
            report.standardized_values = changed;
            self.stage_finished(
                CleaningStage::Standardization,
                format!("Standardized {} values", changed),
            );
            standardized
        } else {
            info!("Step 3: Skipping standardization (disabled)");
            data
        };

        // Step 4: Type validation
        let data = if self.options.validate_types {
            self.stage_started(CleaningStage::TypeValidation, "Step 4: Validating data types...");
            let (validated, corrected) = validate_data_types(&data, columns);
            report.corrected_data_types = corrected;
            self.stage_finished(
                CleaningStage::TypeValidation,
                format!("Corrected {} data types", corrected),
            );
            validated
        } else {
            info!("Step 4: Skipping type validation (disabled)");
            data
        };

        // Step 5: Score
        self.stage_started(CleaningStage::Scoring, "Step 5: Scoring data quality...");
        let quality_score = calculate_quality_score(
            &report,
            original_count,
            columns.len(),
            self.options.quality_denominator,
        );
        self.stage_finished(
            CleaningStage::Scoring,
            format!("Quality score: {}", quality_score),
        );

        info!(
            "Data cleaning finished in {:.2?}: {} -> {} rows",
            start_time.elapsed(),
            original_count,
            data.len()
        );

        Ok(CleaningResult {
            original_count,
            final_count: data.len(),
            cleaned_data: data,
            quality_score,
            cleaning_report: report,
        })
    }
}

/// Column names must be non-empty and unique.
fn validate_columns(columns: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if column.is_empty() {
            return Err(CleaningError::InvalidInput(
                "Column names must not be empty".to_string(),
            ));
        }
        if !seen.insert(column.as_str()) {
            return Err(CleaningError::InvalidInput(format!(
                "Column '{}' is listed more than once",
                column
            )));
        }
    }
    Ok(())
}

/// Clean a dataset with the given options.
///
/// Convenience wrapper around [`Pipeline::clean_dataset`] for callers that
/// need neither an AI provider nor progress updates.
pub fn clean_dataset(
    rows: &[Record],
    columns: &[String],
    options: &CleaningOptions,
) -> Result<CleaningResult> {
    Pipeline::builder()
        .options(options.clone())
        .build()
        .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?
        .clean_dataset(rows, columns)
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    options: Option<CleaningOptions>,
    ai_provider: Option<Arc<dyn AIProvider>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the cleaning options.
    pub fn options(mut self, options: CleaningOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the AI provider used by [`Pipeline::suggest`].
    ///
    /// Use `Arc` to share one provider across several pipelines. Without a
    /// provider, suggestions come from the rule-based engine.
    pub fn ai_provider(mut self, provider: Arc<dyn AIProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Set a progress reporter for receiving updates during cleaning.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// This is a convenience method for simple progress handling.
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the options are invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let options = self.options.unwrap_or_default();
        options.validate()?;

        Ok(Pipeline {
            options,
            ai_provider: self.ai_provider,
            progress_reporter: self.progress_reporter,
        })
    }
}
