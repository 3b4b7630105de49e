//! Route handlers
//!
//! Filesystem calls block, so each one runs on the blocking thread pool.

use axum::Json;
use axum::extract::{Path, State};
use std::io;
use std::sync::Arc;
use tokio::task::{self, JoinError};

use crate::error::StorageError;
use crate::protocol::responses::{ApiError, DeleteResponse, FileListResponse};
use crate::storage::{Operation, SaveDirectory};

/// GET /files
pub async fn list_files(
    State(store): State<Arc<SaveDirectory>>,
) -> Result<Json<FileListResponse>, ApiError> {
    let files = task::spawn_blocking(move || store.list())
        .await
        .map_err(|e| ApiError::new(Operation::List, join_error(e)))?
        .map_err(|e| ApiError::new(Operation::List, e))?;

    Ok(Json(FileListResponse { files }))
}

/// DELETE /files/{filename}
pub async fn delete_file(
    State(store): State<Arc<SaveDirectory>>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let result = task::spawn_blocking(move || store.delete(&filename))
        .await
        .map_err(|e| ApiError::new(Operation::Delete, join_error(e)))?
        .map_err(|e| ApiError::new(Operation::Delete, e))?;

    Ok(Json(DeleteResponse {
        success: true,
        message: result.message(),
    }))
}

fn join_error(err: JoinError) -> StorageError {
    StorageError::IoError(io::Error::other(err))
}
