//! Custom error types for the data cleaning pipeline.
//!
//! This module provides the error hierarchy using `thiserror` for
//! the deterministic cleaning path, file ingestion and export.
//!
//! Errors are serializable so a host UI can show them as a blocking alert
//! with a stable error code.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Input does not have the shape of a table (e.g. JSON that is not a list of objects).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A cleaning stage failed. The whole run is aborted.
    #[error("Data cleaning failed: {0}")]
    CleaningFailed(String),

    /// File type the loader cannot read.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet reading error.
    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::CleaningFailed(_) => "CLEANING_FAILED",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Excel(_) => "EXCEL_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error comes from the shape of the input rather than from processing.
    ///
    /// Input-shape errors are shown to the user as-is; nothing of the input is kept.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::InvalidInput(_) | Self::ColumnNotFound(_) | Self::UnsupportedFormat(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CleaningError::InvalidInput("x".to_string()).error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            CleaningError::ColumnNotFound("test".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_cleaning_failed_message() {
        let error = CleaningError::CleaningFailed("boom".to_string());
        assert_eq!(error.to_string(), "Data cleaning failed: boom");
    }

    #[test]
    fn test_is_input_error() {
        assert!(CleaningError::InvalidInput("not a list".to_string()).is_input_error());
        assert!(CleaningError::UnsupportedFormat("xlsx".to_string()).is_input_error());
        assert!(!CleaningError::CleaningFailed("error".to_string()).is_input_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = CleaningError::ColumnNotFound("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error =
            CleaningError::InvalidInput("test".to_string()).with_context("Loading data.json");
        assert!(error.to_string().contains("Loading data.json"));
        assert_eq!(error.error_code(), "INVALID_INPUT"); // Preserves original code
        assert!(error.is_input_error());
    }
}
