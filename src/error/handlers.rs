//! Error handlers
//!
//! Maps storage errors onto HTTP status codes and client-facing messages.

use axum::http::StatusCode;

use crate::error::types::StorageError;
use crate::storage::Operation;

/// Convert error to HTTP status code
pub fn error_to_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::AccessDenied(_) => StatusCode::FORBIDDEN,
        StorageError::FileNotFound(_) => StatusCode::NOT_FOUND,
        StorageError::InvalidName(_) => StatusCode::BAD_REQUEST,
        StorageError::NotAFile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        StorageError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message sent to the client. Internal details (paths, OS errors) stay in the log.
pub fn error_to_message(err: &StorageError, operation: Operation) -> &'static str {
    match err {
        StorageError::AccessDenied(_) => "Access denied",
        StorageError::FileNotFound(_) => "File not found",
        StorageError::InvalidName(_) => "Invalid file name",
        StorageError::NotAFile(_) | StorageError::IoError(_) => operation.failure_message(),
    }
}
