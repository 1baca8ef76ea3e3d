//! Error types for backend API calls.

use thiserror::Error;

/// Errors from the backend REST API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the server's message field when one
    /// was returned, otherwise the status line.
    #[error("API error: {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
