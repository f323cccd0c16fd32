//! Error types for the title cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::storage::StoreError;

// == Cache Error Enum ==
/// Unified error type for the title cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Title does not match `<digits>. <name>: <difficulty>`
    #[error("Invalid title format: {0}")]
    InvalidFormat(String),

    /// A record with the same name is already stored
    #[error("Title already cached: {0}")]
    AlreadyExists(String),

    /// No partition holds a record with this name
    #[error("Title not found: {0}")]
    NotFound(String),

    /// Encoded record can never fit in a single partition
    #[error("Record of {size} bytes exceeds partition capacity of {capacity} bytes")]
    RecordTooLarge { size: usize, capacity: usize },

    /// Underlying store rejected the write for lack of space
    #[error("Storage full: {0}")]
    StorageFull(String),

    /// Any other failure of the underlying store
    #[error("Storage error: {0}")]
    Unknown(#[source] StoreError),
}

impl From<StoreError> for CacheError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::QuotaExceeded { .. } => CacheError::StorageFull(err.to_string()),
            other => CacheError::Unknown(other),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            CacheError::AlreadyExists(_) => StatusCode::CONFLICT,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::RecordTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            CacheError::StorageFull(_) => StatusCode::INSUFFICIENT_STORAGE,
            CacheError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the title cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_classified_as_storage_full() {
        let err: CacheError = StoreError::QuotaExceeded {
            required: 10,
            quota: 5,
        }
        .into();
        assert!(matches!(err, CacheError::StorageFull(_)));
    }

    #[test]
    fn test_io_error_propagated_as_unknown() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CacheError = StoreError::Io(io).into();
        match err {
            CacheError::Unknown(StoreError::Io(inner)) => {
                assert_eq!(inner.kind(), std::io::ErrorKind::PermissionDenied)
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (CacheError::InvalidFormat("x".into()), StatusCode::BAD_REQUEST),
            (CacheError::AlreadyExists("x".into()), StatusCode::CONFLICT),
            (CacheError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                CacheError::RecordTooLarge {
                    size: 3000,
                    capacity: 1900,
                },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                CacheError::StorageFull("x".into()),
                StatusCode::INSUFFICIENT_STORAGE,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
