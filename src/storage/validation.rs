//! Path validation
//!
//! Pure path-safety checks. Nothing in this module touches the filesystem, so
//! the traversal rules can be exercised against any root.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Reduce an untrusted name to its final path segment.
///
/// Any `..` segment is treated as a traversal attempt and rejected outright,
/// even when the base name alone would land inside the root.
pub fn sanitize_filename(raw: &str) -> Result<&str, StorageError> {
    if raw.contains('\0') {
        return Err(StorageError::InvalidName(raw.to_string()));
    }

    if raw.split(SEPARATORS).any(|segment| segment == "..") {
        return Err(StorageError::AccessDenied(raw.to_string()));
    }

    let trimmed = raw.trim_end_matches(SEPARATORS);
    let base = trimmed.rsplit(SEPARATORS).next().unwrap_or_default();

    match base {
        "" => Err(StorageError::InvalidName(raw.to_string())),
        "." => Err(StorageError::AccessDenied(raw.to_string())),
        name => Ok(name),
    }
}

/// Resolve an untrusted name to an absolute path strictly inside `root`
pub fn resolve_within_root(root: &Path, raw: &str) -> Result<PathBuf, StorageError> {
    let name = sanitize_filename(raw)?;
    let candidate = root.join(name);

    if !is_within_root(root, &normalize(&candidate)) {
        return Err(StorageError::AccessDenied(raw.to_string()));
    }

    Ok(candidate)
}

/// Component-wise prefix check. The root itself does not count as inside.
pub fn is_within_root(root: &Path, path: &Path) -> bool {
    path != root && path.starts_with(root)
}

/// Lexically resolve `.` and `..` without consulting the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
