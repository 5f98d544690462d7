use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Cell and Record Types
// ============================================================================

/// A single cell of an uploaded table.
///
/// Uploaded files carry no schema, so every cell is tagged with the variant
/// it currently holds. Conversions between variants are explicit and happen
/// only in the cleaning stages.
///
/// Serialized untagged: `Absent` becomes `null`, every other variant its
/// plain JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    /// No value at all (missing key, JSON `null`, CSV null).
    #[default]
    Absent,
    Boolean(bool),
    Number(f64),
    /// Raw text, including the empty string.
    Text(String),
    /// A date normalized to `YYYY-MM-DD`.
    DateIso(String),
}

static ABSENT: CellValue = CellValue::Absent;

impl CellValue {
    /// A cell is missing when it is absent, empty, or the literal `"NaN"`.
    ///
    /// The `"NaN"` check is case-sensitive.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.is_empty() || s == "NaN",
            _ => false,
        }
    }

    /// Absent or the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The text content for `Text` cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String form used for composite keys, comparisons and export.
    ///
    /// Absent renders as the empty string, numbers in shortest round-trip form.
    pub fn to_plain_string(&self) -> Cow<'_, str> {
        match self {
            Self::Absent => Cow::Borrowed(""),
            Self::Text(s) | Self::DateIso(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Boolean(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }

    /// Whether the value counts as "truthy" in the legacy CSV download.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Text(s) | Self::DateIso(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Boolean(b) => *b,
        }
    }

    /// Short variant name for logging and summaries.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::DateIso(_) => "date",
        }
    }

    /// Whether two cells hold the same variant, regardless of content.
    pub fn same_variant(&self, other: &CellValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// One row of tabular data, keyed by column name in insertion order.
pub type Record = IndexMap<String, CellValue>;

/// Ordered sequence of records.
pub type Dataset = Vec<Record>;

/// Build a record from `(column, value)` pairs.
pub fn record<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<CellValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Read a cell, treating keys missing from the record as `Absent`.
pub fn cell<'a>(record: &'a Record, column: &str) -> &'a CellValue {
    record.get(column).unwrap_or(&ABSENT)
}

// ============================================================================
// Cleaning Report Types
// ============================================================================

/// A rule violation found while cleaning.
///
/// Reserved: the deterministic stages never produce these today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub row: usize,
    pub column: String,
    pub message: String,
}

/// Counts of what each stage changed during one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningReport {
    /// Rows dropped as duplicates of an earlier row.
    pub removed_duplicates: usize,
    /// Cells that received an imputed value.
    pub filled_missing_values: usize,
    /// Cells rewritten by standardization.
    pub standardized_values: usize,
    /// Cells whose variant changed during type validation.
    pub corrected_data_types: usize,
    pub validation_errors: Vec<ValidationError>,
    /// Rows dropped by the `remove` missing-value policy. Not part of the score.
    #[serde(default)]
    pub rows_removed_missing: usize,
}

impl CleaningReport {
    /// Number of fields in the dashboard's report object
    /// (`removedDuplicates`, `filledMissingValues`, `standardizedValues`,
    /// `correctedDataTypes`, `validationErrors`).
    pub const FIELD_COUNT: usize = 5;

    /// Total number of interventions across all stages.
    pub fn total_changes(&self) -> usize {
        self.removed_duplicates
            + self.filled_missing_values
            + self.standardized_values
            + self.corrected_data_types
    }
}

/// Output of a full cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningResult {
    pub original_count: usize,
    pub cleaned_data: Dataset,
    pub final_count: usize,
    pub quality_score: i64,
    pub cleaning_report: CleaningReport,
}

impl CleaningResult {
    /// Rows removed by any stage.
    pub fn rows_removed(&self) -> usize {
        self.original_count.saturating_sub(self.final_count)
    }

    /// Quality score clamped to 0-100 for display.
    pub fn display_score(&self) -> u8 {
        crate::quality::clamp_score(self.quality_score)
    }
}

// ============================================================================
// Advisory Suggestion Types
// ============================================================================

/// Urgency of an advisory suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Confidence reported by the remote model when it omits the field.
pub const DEFAULT_AI_CONFIDENCE: u8 = 85;

fn default_confidence() -> u8 {
    DEFAULT_AI_CONFIDENCE
}

fn default_estimated_time() -> String {
    "unknown".to_string()
}

/// Accept integer or fractional confidence values and clamp them to 0-100.
fn deserialize_confidence<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("confidence must be a finite number"));
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// Human-readable cleaning recommendations.
///
/// Advisory only: produced fresh per call and never applied automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorySuggestion {
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_estimated_time")]
    pub estimated_time: String,
    #[serde(
        default = "default_confidence",
        deserialize_with = "deserialize_confidence"
    )]
    pub confidence: u8,
}

// ============================================================================
// Data Insight Types
// ============================================================================

/// Narrative analysis of a dataset for the dashboard's insights panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataInsights {
    #[serde(default)]
    pub insights: Vec<String>,
    /// Chart type names such as `bar` or `line`.
    #[serde(default)]
    pub recommended_charts: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl DataInsights {
    /// Insights used when the model answered without a JSON object.
    pub fn generic() -> Self {
        Self {
            insights: vec!["Data analyzed successfully".to_string()],
            recommended_charts: vec!["bar".to_string(), "line".to_string(), "pie".to_string()],
            patterns: vec!["Patterns detected in the data".to_string()],
            recommendations: vec!["Consider further analysis".to_string()],
        }
    }

    /// Insights used when the analysis could not be obtained at all.
    pub fn unavailable() -> Self {
        Self {
            insights: vec!["AI analysis temporarily unavailable".to_string()],
            recommended_charts: vec!["bar".to_string(), "line".to_string()],
            patterns: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}
