use axum::http::StatusCode;

use crate::context::StatusError;
use crate::lock::LockError;

/// Why the gate refused to run a handler.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The lock backend failed while acquiring.
    #[error("entity lock unavailable for {key}: {source}")]
    Backend {
        key: String,
        #[source]
        source: LockError,
    },
    /// Another request holds the entity lock.
    #[error("entity {key} is locked by another request")]
    Contended { key: String },
}

impl StatusError for GateError {
    fn status_code(&self) -> StatusCode {
        match self {
            GateError::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GateError::Contended { .. } => StatusCode::CONFLICT,
        }
    }
}
