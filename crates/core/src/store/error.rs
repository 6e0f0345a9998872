//! Store error types.

use attendo_shared::types::RequestId;
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Request id not present in the request collection.
    #[error("vacation request not found: {0}")]
    RequestNotFound(RequestId),

    /// A persisted collection could not be decoded.
    #[error("collection '{key}' is corrupt: {message}")]
    Corrupt {
        /// Collection key.
        key: String,
        /// Decoder message.
        message: String,
    },

    /// Backend read/write failure.
    #[error("storage operation failed: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a corrupt collection error.
    #[must_use]
    pub fn corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Returns the error code for operator-facing output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RequestNotFound(_) => "REQUEST_NOT_FOUND",
            Self::Corrupt { .. } => "STORE_CORRUPT",
            Self::Backend(_) => "STORE_BACKEND",
        }
    }
}

impl From<StoreError> for attendo_shared::AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RequestNotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Corrupt { .. } | StoreError::Backend(_) => Self::Storage(err.to_string()),
        }
    }
}
