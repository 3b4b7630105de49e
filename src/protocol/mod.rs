//! HTTP protocol layer
//!
//! Request handlers and response bodies for the two plugin routes.

pub mod handlers;
pub mod responses;

use axum::Router;
use axum::routing::{delete, get};
use std::sync::Arc;

use crate::storage::SaveDirectory;

pub use responses::{ApiError, DeleteResponse, ErrorResponse, FileListResponse};

/// Build the plugin routes, relative to wherever the host mounts them
pub fn routes(store: Arc<SaveDirectory>) -> Router {
    Router::new()
        .route("/files", get(handlers::list_files))
        .route("/files/{filename}", delete(handlers::delete_file))
        .with_state(store)
}
