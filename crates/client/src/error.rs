//! Client Error Types
//!
//! Transport-level error taxonomy for the backend API. A not-yet-complete
//! generation stream is never an error; these variants cover failed
//! requests, failed streams, and malformed finalized payloads.

use thiserror::Error;

/// Errors surfaced by the backend API client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String, status: Option<u16> },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    /// The stream ended without ever yielding a valid roadmap document,
    /// or the backend refused the generation request outright.
    #[error("Generation failed: {message}")]
    GenerationFailed { message: String },

    #[error("{message}")]
    Other { message: String },
}

/// Result type alias for API errors
pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::NetworkError {
            message: err.to_string(),
        }
    }
}

/// Extract the human-readable message from a backend error body.
///
/// The backend wraps errors as `{"detail": "..."}`; fall back to the raw
/// body when it doesn't.
pub fn error_detail(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Detail {
        detail: String,
    }
    match serde_json::from_str::<Detail>(body) {
        Ok(d) => d.detail,
        Err(_) => body.to_string(),
    }
}

/// Map an HTTP error status to an [`ApiError`].
pub fn parse_http_error(status: u16, body: &str, context: &str) -> ApiError {
    let message = format!("{}: {}", context, error_detail(body));
    match status {
        401 => ApiError::AuthenticationFailed { message },
        403 => ApiError::AccessDenied { message },
        404 => ApiError::NotFound { message },
        400 => ApiError::InvalidRequest { message },
        429 => ApiError::RateLimited { message },
        500..=599 => ApiError::ServerError {
            message,
            status: Some(status),
        },
        _ => ApiError::Other {
            message: format!("HTTP {}: {}", status, message),
        },
    }
}
