//! Internal error types for backend HTTP operations.
//!
//! These errors are internal to `callsim-http` and are mapped to
//! `BackendError` at the port boundary.

use thiserror::Error;

/// Result type alias for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
