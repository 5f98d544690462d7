//! AI provider trait for abstracting LLM interactions.
//!
//! This module defines the [`AIProvider`] trait that lets the advisory path
//! talk to any hosted text-generation model without changing the cleaning
//! logic.
//!
//! # Implementing a New Provider
//!
//! 1. Create a new file in `src/ai/` (e.g., `openai.rs`)
//! 2. Implement the [`AIProvider`] trait for your provider struct
//! 3. Export the provider in `src/ai/mod.rs`
//!
//! # Example
//!
//! ```rust,ignore
//! use datadash_cleaning::ai::{AIProvider, GeminiProvider};
//! use datadash_cleaning::get_ai_cleaning_suggestions;
//!
//! let provider = GeminiProvider::new("your-api-key")?;
//! let suggestion = get_ai_cleaning_suggestions(&rows, &columns, Some(&provider));
//! ```

use anyhow::Result;

/// Trait for AI providers that can answer a free-text prompt.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow usage across threads.
///
/// # Error Handling
///
/// Implementations should return meaningful errors via `anyhow::Result`.
/// Callers fall back to local heuristics whenever a provider fails.
pub trait AIProvider: Send + Sync {
    /// Send a prompt and return the model's text answer.
    ///
    /// Exactly one request is made per call; retries are up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API call fails or times out
    /// - The API answers with a non-success status
    /// - The response carries no text (e.g. blocked by a safety filter)
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the provider name for logging and debugging.
    fn name(&self) -> &str;

    /// Get the model being used by this provider.
    ///
    /// Returns `None` if the provider doesn't expose model information.
    fn model(&self) -> Option<&str> {
        None
    }
}
