//! Error types for the market report bot

use thiserror::Error;

/// Errors that can occur when fetching market data from a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Invalid response from provider (malformed payload or missing field)
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider API error
    #[error("Provider API error: {0}")]
    ApiError(String),

    /// Timeout waiting for response
    #[error("Request timeout")]
    Timeout,
}

/// Errors that can stop the bot at startup
///
/// Nothing past startup is fatal: provider failures degrade the affected
/// report section and handler errors become a single user-visible line.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReportError {
    /// Creates a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
