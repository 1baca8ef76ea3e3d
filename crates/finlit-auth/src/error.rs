//! Error types for session lifecycle operations.

use thiserror::Error;

/// Errors from auth and session operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The auth API rejected the request.
    #[error("Auth API error: {status} ({summary})")]
    Api {
        status: reqwest::StatusCode,
        summary: String,
    },

    /// IO error reading or writing the persisted session.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An operation that requires a signed-in session found none.
    #[error("No active session")]
    SessionMissing,
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;
