//! Google Gemini API client implementation.

mod client;

pub use client::GeminiClient;

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, msight_error::GeminiError>;
