//! Rule-based suggestions using local heuristics.

use crate::types::{AdvisorySuggestion, Priority, Record};
use crate::utils::count_blank_cells;
use tracing::debug;

/// Time estimate attached to rule-based suggestions.
pub const FALLBACK_ESTIMATED_TIME: &str = "1-2 minutes";

/// Confidence attached to rule-based suggestions.
pub const FALLBACK_CONFIDENCE: u8 = 70;

/// Build suggestions from blank-cell counts per column.
///
/// Works without any AI service. Only blank cells (absent or empty) are
/// reported; the `"NaN"` sentinel is not counted here.
pub fn fallback_suggestions(rows: &[Record], columns: &[String]) -> AdvisorySuggestion {
    let missing_counts: Vec<usize> = columns
        .iter()
        .map(|column| count_blank_cells(rows, column))
        .filter(|&count| count > 0)
        .collect();

    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if !missing_counts.is_empty() {
        let total: usize = missing_counts.iter().sum();
        debug!(
            "{} columns hold {} blank cells",
            missing_counts.len(),
            total
        );
        issues.push(format!("Missing values in {} columns", missing_counts.len()));
        suggestions.push(format!("Fill or remove {} missing values", total));
    }

    let priority = if issues.is_empty() {
        Priority::Low
    } else {
        Priority::Medium
    };

    AdvisorySuggestion {
        issues,
        suggestions,
        priority,
        estimated_time: FALLBACK_ESTIMATED_TIME.to_string(),
        confidence: FALLBACK_CONFIDENCE,
    }
}
