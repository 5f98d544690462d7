//! Composite data-quality score.

use crate::config::QualityDenominator;
use crate::types::CleaningReport;

/// Weight of the duplicate sub-score.
pub const DUPLICATE_WEIGHT: f64 = 0.3;
/// Weight of the missing-value sub-score.
pub const MISSING_WEIGHT: f64 = 0.4;
/// Weight of the standardization sub-score.
pub const STANDARDIZATION_WEIGHT: f64 = 0.2;
/// Weight of the type sub-score.
pub const TYPE_WEIGHT: f64 = 0.1;

/// Missing-value sub-score once any cell had to be filled.
pub const FILLED_MISSING_SCORE: f64 = 0.7;

/// Score reported for an empty input.
pub const EMPTY_DATASET_SCORE: i64 = 100;

/// Compute the quality score of a cleaning run.
///
/// ```text
/// duplicate       = 1 - removed / original
/// missing         = 0.7 if filled > 0 else 1
/// standardization = 1 - standardized / (original * D)
/// types           = 1 - corrected / (original * D)
/// score           = round(100 * (0.3 dup + 0.4 miss + 0.2 std + 0.1 types))
/// ```
///
/// `D` is the report field count (5) or the column count, per `denominator`.
/// The score is not clamped; a run that rewrites more cells than `original * D`
/// can go below zero. Use [`clamp_score`] for display.
pub fn calculate_quality_score(
    report: &CleaningReport,
    original_count: usize,
    column_count: usize,
    denominator: QualityDenominator,
) -> i64 {
    if original_count == 0 {
        return EMPTY_DATASET_SCORE;
    }

    let original = original_count as f64;
    let per_row = match denominator {
        QualityDenominator::ReportFields => CleaningReport::FIELD_COUNT,
        QualityDenominator::Columns => column_count.max(1),
    } as f64;
    let cells = original * per_row;

    let duplicate_score = 1.0 - report.removed_duplicates as f64 / original;
    let missing_score = if report.filled_missing_values > 0 {
        FILLED_MISSING_SCORE
    } else {
        1.0
    };
    let standardization_score = 1.0 - report.standardized_values as f64 / cells;
    let type_score = 1.0 - report.corrected_data_types as f64 / cells;

    let weighted = duplicate_score * DUPLICATE_WEIGHT
        + missing_score * MISSING_WEIGHT
        + standardization_score * STANDARDIZATION_WEIGHT
        + type_score * TYPE_WEIGHT;

    (weighted * 100.0).round() as i64
}

/// Clamp a score into `0..=100`.
pub fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}
