//! HTTP response bodies

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::StorageError;
use crate::error::handlers::{error_to_message, error_to_status};
use crate::storage::{FileEntry, Operation};

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A storage error tagged with the request that produced it
#[derive(Debug)]
pub struct ApiError {
    pub operation: Operation,
    pub error: StorageError,
}

impl ApiError {
    pub fn new(operation: Operation, error: StorageError) -> Self {
        Self { operation, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = error_to_status(&self.error);
        let body = ErrorResponse {
            error: error_to_message(&self.error, self.operation).to_string(),
        };
        (status, Json(body)).into_response()
    }
}
