//! Google Gemini AI provider implementation.
//!
//! This module provides the [`GeminiProvider`] which implements the [`AIProvider`]
//! trait for Google's Gemini API (<https://ai.google.dev/>).

use std::time::Duration;

use super::AIProvider;
use anyhow::{Result, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default Gemini API endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/";

/// Default model to use for cleaning suggestions.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default temperature for model responses (low for stable JSON output).
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default max tokens for responses.
const DEFAULT_MAX_TOKENS: u32 = 1000;

// Gemini API request structures
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

// Gemini API response structures
#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate.
    ///
    /// Responses blocked by a safety filter carry no usable text.
    fn into_text(self) -> Result<String> {
        self.candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|c| {
                if let Some(reason) = &c.finish_reason
                    && (reason == "SAFETY" || reason == "BLOCKED")
                {
                    return None;
                }
                c.content
            })
            .and_then(|content| content.parts)
            .and_then(|parts| parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| anyhow!("No response content from Gemini API"))
    }
}

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// The model to use (e.g., "gemini-2.0-flash").
    pub model: String,
    /// Temperature for response generation (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL for the API (useful for proxies or custom endpoints).
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl GeminiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

/// Builder for [`GeminiConfig`].
#[derive(Default)]
pub struct GeminiConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    base_url: Option<String>,
}

impl GeminiConfigBuilder {
    /// Set the model to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature (0.0 - 2.0).
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set a custom base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiConfig {
        GeminiConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }
}

/// Google Gemini AI provider.
///
/// Sends a single `generateContent` request per prompt and returns the text
/// of the first candidate.
///
/// # Example
///
/// ```rust,ignore
/// use datadash_cleaning::ai::{GeminiProvider, GeminiConfig};
///
/// // Simple usage with defaults
/// let provider = GeminiProvider::new("your-api-key")?;
///
/// // With custom configuration
/// let config = GeminiConfig::builder()
///     .model("gemini-1.5-flash")
///     .timeout_secs(10)
///     .build();
/// let provider = GeminiProvider::with_config("your-api-key", config)?;
/// ```
pub struct GeminiProvider {
    api_key: String,
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, GeminiConfig::default())
    }

    /// Create a new Gemini provider with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(api_key: impl Into<String>, config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            api_key: api_key.into(),
            config,
            client,
        })
    }

    fn build_request(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                role: "user".to_owned(),
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        }
    }

    // {base_url}{model}:generateContent?key={api_key}
    fn endpoint(&self) -> String {
        format!(
            "{}{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.api_key
        )
    }
}

impl AIProvider for GeminiProvider {
    fn generate(&self, prompt: &str) -> Result<String> {
        debug!(
            "Sending {} character prompt to Gemini model {}",
            prompt.len(),
            self.config.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&self.build_request(prompt))
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Gemini API error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        let result: GeminiResponse = response.json()?;
        result.into_text()
    }

    fn name(&self) -> &str {
        "Gemini"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // GeminiResponse parsing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_valid_response() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"issues\": []}"}]
                },
                "finishReason": "STOP"
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_text().unwrap(), "{\"issues\": []}");
    }

    #[test]
    fn test_safety_blocked_response_has_no_text() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "partial"}]},
                "finishReason": "SAFETY"
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_text().is_err());
    }

    #[test]
    fn test_empty_candidates() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(response.into_text().is_err());

        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_text().is_err());
    }

    #[test]
    fn test_candidate_without_parts() {
        let json = r#"{"candidates": [{"content": {}, "finishReason": "MAX_TOKENS"}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_text().is_err());
    }

    // -------------------------------------------------------------------------
    // Request and configuration tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_request_serialization() {
        let provider = GeminiProvider::new("test-key").unwrap();
        let request = provider.build_request("Analyze this dataset");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Analyze this dataset");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1000);
    }

    #[test]
    fn test_endpoint_format() {
        let config = GeminiConfig::builder()
            .base_url("http://localhost:8080/models/")
            .model("test-model")
            .build();
        let provider = GeminiProvider::with_config("abc", config).unwrap();
        assert_eq!(
            provider.endpoint(),
            "http://localhost:8080/models/test-model:generateContent?key=abc"
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_provider_metadata() {
        let provider = GeminiProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "Gemini");
        assert_eq!(provider.model(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn test_unreachable_endpoint_is_an_error() {
        let config = GeminiConfig::builder()
            .base_url("http://127.0.0.1:9/models/")
            .timeout_secs(2)
            .build();
        let provider = GeminiProvider::with_config("key", config).unwrap();
        assert!(provider.generate("hello").is_err());
    }
}
