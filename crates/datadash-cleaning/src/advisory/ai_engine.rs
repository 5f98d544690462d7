//! AI-powered suggestion engine using an LLM via API.

use super::SuggestionEngine;
use crate::ai::AIProvider;
use crate::types::{AdvisorySuggestion, Record};
use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Number of rows embedded in the prompt.
pub const PROMPT_SAMPLE_ROWS: usize = 5;

/// First `{` through last `}` of a response, across lines.
static JSON_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("Invalid regex: JSON block"));

/// Build the prompt sent to the provider.
///
/// Embeds the column list and the first rows of the dataset as JSON.
pub fn build_suggestion_prompt(rows: &[Record], columns: &[String]) -> Result<String> {
    let sample = &rows[..rows.len().min(PROMPT_SAMPLE_ROWS)];
    let sample_json = serde_json::to_string(sample).context("Failed to serialize sample rows")?;

    Ok(format!(
        "Analyze this dataset with columns: {}.\n\
        Provide data cleaning recommendations in JSON format:\n\
        {{\n  \
          \"issues\": [\"list of data quality issues\"],\n  \
          \"suggestions\": [\"specific cleaning actions\"],\n  \
          \"priority\": \"high/medium/low\",\n  \
          \"estimatedTime\": \"estimated cleaning time\",\n  \
          \"confidence\": 0-100\n\
        }}\n\n\
        Sample data: {}",
        columns.join(", "),
        sample_json
    ))
}

/// Extract the outermost JSON object from free text.
pub fn extract_json_block(response: &str) -> Option<&str> {
    JSON_BLOCK.find(response).map(|m| m.as_str())
}

/// AI-powered suggestion engine.
///
/// # Example
///
/// ```rust,ignore
/// use datadash_cleaning::ai::GeminiProvider;
/// use datadash_cleaning::advisory::{AiSuggestionEngine, SuggestionEngine};
///
/// let provider = GeminiProvider::new("api-key")?;
/// let suggestion = AiSuggestionEngine::new(&provider).suggest(&rows, &columns)?;
/// ```
pub struct AiSuggestionEngine<'a> {
    ai_provider: &'a dyn AIProvider,
}

impl<'a> AiSuggestionEngine<'a> {
    /// Create a new AI suggestion engine with the given provider.
    pub fn new(ai_provider: &'a dyn AIProvider) -> Self {
        Self { ai_provider }
    }

    fn parse_response(&self, response: &str) -> Result<AdvisorySuggestion> {
        let block = extract_json_block(response)
            .ok_or_else(|| anyhow!("No JSON object in {} response", self.ai_provider.name()))?;

        serde_json::from_str(block).context("Failed to decode suggestion JSON")
    }
}

impl SuggestionEngine for AiSuggestionEngine<'_> {
    fn suggest(&self, rows: &[Record], columns: &[String]) -> Result<AdvisorySuggestion> {
        let prompt = build_suggestion_prompt(rows, columns)?;

        debug!(
            "Requesting suggestions from {} ({})",
            self.ai_provider.name(),
            self.ai_provider.model().unwrap_or("default model")
        );
        let response = self.ai_provider.generate(&prompt)?;

        self.parse_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_AI_CONFIDENCE, Priority, record};
    use std::sync::Mutex;

    /// Records the prompt it receives and answers with a fixed text.
    struct RecordingProvider {
        answer: String,
        prompt: Mutex<Option<String>>,
    }

    impl RecordingProvider {
        fn new(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                prompt: Mutex::new(None),
            }
        }
    }

    impl AIProvider for RecordingProvider {
        fn generate(&self, prompt: &str) -> Result<String> {
            *self.prompt.lock().unwrap() = Some(prompt.to_string());
            Ok(self.answer.clone())
        }

        fn name(&self) -> &str {
            "Recording"
        }
    }

    #[test]
    fn test_extract_json_block() {
        assert_eq!(
            extract_json_block("prefix {\"a\": {\"b\": 1}} suffix"),
            Some("{\"a\": {\"b\": 1}}")
        );
        assert_eq!(extract_json_block("{\n\"a\": 1\n}"), Some("{\n\"a\": 1\n}"));
        assert_eq!(extract_json_block("no json here"), None);
    }

    #[test]
    fn test_prompt_embeds_columns_and_first_rows() {
        let rows: Vec<Record> = (0..8).map(|i| record([("id", i as f64)])).collect();
        let columns = vec!["id".to_string(), "name".to_string()];
        let prompt = build_suggestion_prompt(&rows, &columns).unwrap();

        assert!(prompt.contains("columns: id, name."));
        assert!(prompt.contains("\"estimatedTime\""));
        assert!(prompt.contains("{\"id\":4.0}"));
        assert!(!prompt.contains("{\"id\":5.0}"));
    }

    #[test]
    fn test_suggest_decodes_response() {
        let provider = RecordingProvider::new(
            r#"{
                "issues": ["Duplicates"],
                "suggestions": ["Dedupe"],
                "priority": "Medium",
                "estimatedTime": "2 minutes",
                "confidence": 92
            }"#,
        );
        let rows = vec![record([("a", "1")])];
        let suggestion = AiSuggestionEngine::new(&provider)
            .suggest(&rows, &["a".to_string()])
            .unwrap();

        assert_eq!(suggestion.priority, Priority::Medium);
        assert_eq!(suggestion.confidence, 92);
        assert_eq!(suggestion.estimated_time, "2 minutes");
        assert!(provider.prompt.lock().unwrap().is_some());
    }

    #[test]
    fn test_confidence_defaults_when_absent() {
        let provider = RecordingProvider::new(r#"{"issues": [], "priority": "low"}"#);
        let suggestion = AiSuggestionEngine::new(&provider)
            .suggest(&[], &[])
            .unwrap();
        assert_eq!(suggestion.confidence, DEFAULT_AI_CONFIDENCE);
    }

    #[test]
    fn test_missing_json_is_an_error() {
        let provider = RecordingProvider::new("Sorry, no suggestions today.");
        let result = AiSuggestionEngine::new(&provider).suggest(&[], &[]);
        assert!(result.is_err());
    }
}
