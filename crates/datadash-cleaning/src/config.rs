//! Configuration types for the data cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup. Options are an immutable value
//! handed to each run; there is no process-wide cleaning state.

use serde::{Deserialize, Deserializer, Serialize};

/// Policy for rows that contain missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingValueStrategy {
    /// Drop every row with at least one missing cell
    #[default]
    Remove,
    /// Impute a value inferred from the column's own distribution
    Fill,
    /// Leave rows untouched
    Keep,
}

impl MissingValueStrategy {
    /// Parse a strategy name. Unrecognised names behave like `keep`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "remove" => Self::Remove,
            "fill" => Self::Fill,
            _ => Self::Keep,
        }
    }
}

impl<'de> Deserialize<'de> for MissingValueStrategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name(&raw))
    }
}

/// Denominator used by the standardization and type sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum QualityDenominator {
    /// `original_count × 5`, the number of fields in the dashboard's report object
    #[default]
    ReportFields,
    /// `original_count × column count`
    Columns,
}

const DEFAULT_FILL_SAMPLE_SIZE: usize = 10;
const DEFAULT_NUMERIC_FILL_RATIO: f64 = 0.5;

fn default_true() -> bool {
    true
}

fn default_fill_sample_size() -> usize {
    DEFAULT_FILL_SAMPLE_SIZE
}

fn default_numeric_fill_ratio() -> f64 {
    DEFAULT_NUMERIC_FILL_RATIO
}

/// Configuration for a cleaning run.
///
/// Use [`CleaningOptions::builder()`] to create a new configuration
/// with fluent API. The serde form matches the dashboard's camelCase
/// options object, so options posted by a frontend deserialize directly.
///
/// # Example
///
/// ```rust,ignore
/// use datadash_cleaning::config::{CleaningOptions, MissingValueStrategy};
///
/// let options = CleaningOptions::builder()
///     .missing_value_strategy(MissingValueStrategy::Fill)
///     .validate_types(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningOptions {
    /// Whether to collapse rows that share a composite key.
    /// Default: true
    #[serde(default = "default_true")]
    pub remove_duplicates: bool,

    /// What to do with rows holding missing cells.
    /// Default: Remove
    #[serde(default, alias = "handleMissingValues")]
    pub missing_value_strategy: MissingValueStrategy,

    /// Whether to trim and canonicalize boolean/null tokens.
    /// Default: true
    #[serde(default = "default_true")]
    pub standardize_values: bool,

    /// Whether to coerce text cells to numbers, booleans and ISO dates.
    /// Default: true
    #[serde(default = "default_true")]
    pub validate_types: bool,

    /// Number of non-missing values sampled when inferring a fill value.
    /// Default: 10
    #[serde(default = "default_fill_sample_size")]
    pub fill_sample_size: usize,

    /// Share of numeric samples at or above which a column is filled with `"0"`.
    /// Default: 0.5
    #[serde(default = "default_numeric_fill_ratio")]
    pub numeric_fill_ratio: f64,

    /// Denominator for the standardization and type sub-scores.
    /// Default: ReportFields
    #[serde(default)]
    pub quality_denominator: QualityDenominator,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            remove_duplicates: true,
            missing_value_strategy: MissingValueStrategy::default(),
            standardize_values: true,
            validate_types: true,
            fill_sample_size: DEFAULT_FILL_SAMPLE_SIZE,
            numeric_fill_ratio: DEFAULT_NUMERIC_FILL_RATIO,
            quality_denominator: QualityDenominator::default(),
        }
    }
}

impl CleaningOptions {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningOptionsBuilder {
        CleaningOptionsBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.fill_sample_size == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(
                self.fill_sample_size,
            ));
        }

        if !(0.0..=1.0).contains(&self.numeric_fill_ratio) {
            return Err(ConfigValidationError::InvalidRatio {
                field: "numeric_fill_ratio".to_string(),
                value: self.numeric_fill_ratio,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid ratio for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidRatio { field: String, value: f64 },

    #[error("Invalid fill sample size: {0} (must be at least 1)")]
    InvalidSampleSize(usize),
}

/// Builder for [`CleaningOptions`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningOptionsBuilder {
    remove_duplicates: Option<bool>,
    missing_value_strategy: Option<MissingValueStrategy>,
    standardize_values: Option<bool>,
    validate_types: Option<bool>,
    fill_sample_size: Option<usize>,
    numeric_fill_ratio: Option<f64>,
    quality_denominator: Option<QualityDenominator>,
}

impl CleaningOptionsBuilder {
    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Set the missing-value policy.
    pub fn missing_value_strategy(mut self, strategy: MissingValueStrategy) -> Self {
        self.missing_value_strategy = Some(strategy);
        self
    }

    /// Enable or disable value standardization.
    pub fn standardize_values(mut self, enable: bool) -> Self {
        self.standardize_values = Some(enable);
        self
    }

    /// Enable or disable type validation and coercion.
    pub fn validate_types(mut self, enable: bool) -> Self {
        self.validate_types = Some(enable);
        self
    }

    /// Set how many non-missing values are sampled per column when filling.
    pub fn fill_sample_size(mut self, size: usize) -> Self {
        self.fill_sample_size = Some(size);
        self
    }

    /// Set the numeric share above which a column is filled with `"0"`.
    ///
    /// # Arguments
    /// * `ratio` - Value between 0.0 and 1.0 (e.g., 0.5 = more than half)
    pub fn numeric_fill_ratio(mut self, ratio: f64) -> Self {
        self.numeric_fill_ratio = Some(ratio);
        self
    }

    /// Set the denominator used by the quality score.
    pub fn quality_denominator(mut self, denominator: QualityDenominator) -> Self {
        self.quality_denominator = Some(denominator);
        self
    }

    /// Build the configuration.
    ///
    /// Returns validated `CleaningOptions` or an error if validation fails.
    pub fn build(self) -> Result<CleaningOptions, ConfigValidationError> {
        let options = CleaningOptions {
            remove_duplicates: self.remove_duplicates.unwrap_or(true),
            missing_value_strategy: self.missing_value_strategy.unwrap_or_default(),
            standardize_values: self.standardize_values.unwrap_or(true),
            validate_types: self.validate_types.unwrap_or(true),
            fill_sample_size: self.fill_sample_size.unwrap_or(DEFAULT_FILL_SAMPLE_SIZE),
            numeric_fill_ratio: self.numeric_fill_ratio.unwrap_or(DEFAULT_NUMERIC_FILL_RATIO),
            quality_denominator: self.quality_denominator.unwrap_or_default(),
        };

        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = CleaningOptions::default();
        assert!(options.remove_duplicates);
        assert_eq!(options.missing_value_strategy, MissingValueStrategy::Remove);
        assert!(options.standardize_values);
        assert!(options.validate_types);
        assert_eq!(options.fill_sample_size, 10);
        assert_eq!(options.numeric_fill_ratio, 0.5);
        assert_eq!(options.quality_denominator, QualityDenominator::ReportFields);
    }

    #[test]
    fn test_builder_custom_values() {
        let options = CleaningOptions::builder()
            .remove_duplicates(false)
            .missing_value_strategy(MissingValueStrategy::Fill)
            .standardize_values(false)
            .fill_sample_size(20)
            .quality_denominator(QualityDenominator::Columns)
            .build()
            .unwrap();

        assert!(!options.remove_duplicates);
        assert_eq!(options.missing_value_strategy, MissingValueStrategy::Fill);
        assert!(!options.standardize_values);
        assert!(options.validate_types);
        assert_eq!(options.fill_sample_size, 20);
        assert_eq!(options.quality_denominator, QualityDenominator::Columns);
    }

    #[test]
    fn test_validation_invalid_ratio() {
        let result = CleaningOptions::builder().numeric_fill_ratio(1.5).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidRatio { .. }
        ));
    }

    #[test]
    fn test_validation_invalid_sample_size() {
        let result = CleaningOptions::builder().fill_sample_size(0).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidSampleSize(0)
        ));
    }

    #[test]
    fn test_unknown_strategy_behaves_like_keep() {
        assert_eq!(MissingValueStrategy::from_name("fill"), MissingValueStrategy::Fill);
        assert_eq!(MissingValueStrategy::from_name("REMOVE"), MissingValueStrategy::Remove);
        assert_eq!(MissingValueStrategy::from_name("interpolate"), MissingValueStrategy::Keep);
    }

    #[test]
    fn test_options_from_frontend_json() {
        // The dashboard posts its options object as-is
        let json = r#"{
            "removeDuplicates": true,
            "handleMissingValues": "fill",
            "standardizeValues": false,
            "validateTypes": true
        }"#;

        let options: CleaningOptions =
            serde_json::from_str(json).expect("Should deserialize from frontend JSON");

        assert!(options.remove_duplicates);
        assert_eq!(options.missing_value_strategy, MissingValueStrategy::Fill);
        assert!(!options.standardize_values);
        assert!(options.validate_types);
        assert_eq!(options.fill_sample_size, 10);
    }

    #[test]
    fn test_options_empty_json_uses_defaults() {
        let options: CleaningOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CleaningOptions::default());
    }

    #[test]
    fn test_options_serialization_round_trip() {
        let options = CleaningOptions::builder()
            .missing_value_strategy(MissingValueStrategy::Keep)
            .build()
            .unwrap();
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"missingValueStrategy\":\"keep\""));

        let deserialized: CleaningOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, deserialized);
    }
}
