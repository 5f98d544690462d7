//! AI module for LLM-backed cleaning suggestions.
//!
//! This module provides a trait-based abstraction for AI providers, so the
//! advisory path can work with any text-generation backend.
//!
//! # Feature Flag
//!
//! The [`AIProvider`] trait is always available for custom implementations.
//! The concrete Gemini provider requires the `ai` feature flag.
//!
//! ```toml
//! # Enable AI support (default)
//! datadash-cleaning = { version = "0.1", features = ["ai"] }
//!
//! # Disable AI support for smaller binary
//! datadash-cleaning = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use datadash_cleaning::ai::GeminiProvider;
//! use datadash_cleaning::Pipeline;
//! use std::sync::Arc;
//!
//! let provider = Arc::new(GeminiProvider::new("your-api-key")?);
//!
//! let pipeline = Pipeline::builder().ai_provider(provider).build()?;
//! let suggestion = pipeline.suggest(&rows, &columns);
//! ```

// Provider trait is always available (for custom implementations)
mod provider;
pub use provider::AIProvider;

// Concrete providers require the "ai" feature
#[cfg(feature = "ai")]
mod gemini;

#[cfg(feature = "ai")]
pub use gemini::{GeminiConfig, GeminiConfigBuilder, GeminiProvider};
