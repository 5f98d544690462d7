//! Advisory cleaning suggestions.
//!
//! This module produces human-readable recommendations for a dataset. The
//! primary engine asks an [`AIProvider`]; [`fallback_suggestions`] is a
//! local heuristic used whenever the remote path fails. Suggestions are never
//! applied to the data.

mod ai_engine;
mod rule_engine;

pub use ai_engine::{
    AiSuggestionEngine, PROMPT_SAMPLE_ROWS, build_suggestion_prompt, extract_json_block,
};
pub use rule_engine::{FALLBACK_CONFIDENCE, FALLBACK_ESTIMATED_TIME, fallback_suggestions};

use crate::ai::AIProvider;
use crate::types::{AdvisorySuggestion, Record};
use anyhow::Result;
use tracing::{info, warn};

/// Trait for suggestion engines.
///
/// Implementations can use AI, rule-based heuristics, or other strategies
/// to describe what a dataset needs.
pub trait SuggestionEngine: Send + Sync {
    /// Produce suggestions for the given rows.
    fn suggest(&self, rows: &[Record], columns: &[String]) -> Result<AdvisorySuggestion>;
}

/// Get cleaning suggestions, preferring the AI provider when one is given.
///
/// Never fails: a missing provider, a failed request, a response without a
/// JSON object or an undecodable object all produce the rule-based
/// suggestions instead. Failures are logged at `warn`.
pub fn get_ai_cleaning_suggestions(
    rows: &[Record],
    columns: &[String],
    provider: Option<&dyn AIProvider>,
) -> AdvisorySuggestion {
    let Some(provider) = provider else {
        info!("No AI provider configured, using rule-based suggestions");
        return fallback_suggestions(rows, columns);
    };

    match AiSuggestionEngine::new(provider).suggest(rows, columns) {
        Ok(suggestion) => suggestion,
        Err(e) => {
            warn!(
                "AI suggestions from {} failed: {:#}. Using rule-based suggestions",
                provider.name(),
                e
            );
            fallback_suggestions(rows, columns)
        }
    }
}
