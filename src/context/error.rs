//! Error types handlers and the gate report through the request context.

use std::error::Error;

use axum::http::StatusCode;

/// An error that knows which HTTP status it should produce.
///
/// [`Context::abort_with_error`](super::Context::abort_with_error) accepts any
/// of these and renders `{ "error": "<display>" }` with the mapped status.
pub trait StatusError: Error {
    fn status_code(&self) -> StatusCode;
}

/// Error type for resource handler operations.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Request body decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Business logic rejected the request (validation, invariant violation).
    #[error("rejected: {0}")]
    Rejected(String),
    /// Entity not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Missing or invalid authentication / authorization.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Other error.
    #[error("handler error: {0}")]
    Other(#[source] Box<dyn Error + Send + Sync>),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl StatusError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::DecodeFailed(_) => StatusCode::BAD_REQUEST,
            HandlerError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HandlerError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
