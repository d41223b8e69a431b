//! Error types for the rebang aggregator
//!
//! Fetch errors never cross the orchestrator boundary: the pipeline
//! recovers each of them into a per-source placeholder line.

use thiserror::Error;

/// Errors that can occur while fetching and normalizing one source
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Non-2xx response status
    #[error("Server error: {0}")]
    Status(u16),

    /// Malformed JSON body
    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Body parsed as JSON but did not match the expected schema
    #[error("Unexpected response shape: {0}")]
    Schema(&'static str),

    /// Configured URL could not be parsed or misses a required parameter
    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Http(err)
        }
    }
}

/// Errors that can occur while loading or persisting the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Filesystem error
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Config document is not valid JSON
    #[error("Config parse failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Config loaded but failed validation
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// No per-user config directory could be determined
    #[error("No config directory available")]
    NoConfigDir,
}
