//! Save directory storage
//!
//! Handles listing, deletion, and path validation inside the configured root.

pub mod filesystem;
pub mod results;
pub mod validation;

pub use filesystem::SaveDirectory;
pub use results::{DeleteResult, FileEntry, Operation};
pub use validation::{is_within_root, normalize, resolve_within_root, sanitize_filename};
