//! Save directory operations
//!
//! Lists and deletes files directly inside the configured root.

use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::PluginConfig;
use crate::error::{PluginError, StorageError};
use crate::observer::StoreObserver;
use crate::storage::results::{DeleteResult, FileEntry, Operation};
use crate::storage::validation::{is_within_root, normalize, resolve_within_root, sanitize_filename};

const MAX_LINK_HOPS: usize = 40;

/// The configured root, validated once at startup
pub struct SaveDirectory {
    root: PathBuf,
    observer: Arc<dyn StoreObserver>,
}

impl SaveDirectory {
    /// Open the save directory, failing if it is unset, missing, or not a directory
    pub fn open(
        config: &PluginConfig,
        observer: Arc<dyn StoreObserver>,
    ) -> Result<Self, PluginError> {
        if config.save_dir.trim().is_empty() {
            return Err(PluginError::MissingSaveDirectory);
        }

        let root = match config.save_dir_path().canonicalize() {
            Ok(root) => root,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PluginError::SaveDirectoryNotFound(config.save_dir.clone()));
            }
            Err(e) => return Err(PluginError::Io(e)),
        };

        if !root.is_dir() {
            return Err(PluginError::NotADirectory(config.save_dir.clone()));
        }

        observer.directory_opened(&root);

        Ok(Self { root, observer })
    }

    /// Canonical path of the configured root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists the direct entries of the root in filesystem order.
    ///
    /// Entries that vanish between enumeration and stat, including dangling
    /// symlinks, are left out of the listing instead of failing it.
    pub fn list(&self) -> Result<Vec<FileEntry>, StorageError> {
        match self.read_entries() {
            Ok(entries) => {
                self.observer.files_listed(entries.len());
                Ok(entries)
            }
            Err(e) => {
                self.observer.operation_failed(Operation::List, &e);
                Err(e)
            }
        }
    }

    /// Deletes a single file named by untrusted input
    pub fn delete(&self, filename: &str) -> Result<DeleteResult, StorageError> {
        match self.remove(filename) {
            Ok(result) => {
                self.observer.file_deleted(&result.file_name);
                Ok(result)
            }
            Err(e @ StorageError::IoError(_)) | Err(e @ StorageError::NotAFile(_)) => {
                self.observer.operation_failed(Operation::Delete, &e);
                Err(e)
            }
            Err(e) => {
                self.observer.request_rejected(Operation::Delete, filename, &e);
                Err(e)
            }
        }
    }

    fn read_entries(&self) -> Result<Vec<FileEntry>, StorageError> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;

            // Follows symlinks; entries removed mid-listing or dangling links are skipped
            let metadata = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
                modified: DateTime::<Utc>::from(metadata.modified()?),
                is_directory: metadata.is_dir(),
            });
        }

        Ok(entries)
    }

    fn remove(&self, filename: &str) -> Result<DeleteResult, StorageError> {
        // No I/O happens until the name is proven to stay inside the root
        let file_path = resolve_within_root(&self.root, filename)?;
        let file_name = sanitize_filename(filename)?.to_string();

        let canonical = match file_path.canonicalize() {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(self.missing_target(&file_path, filename, file_name));
            }
            Err(e) => return Err(e.into()),
        };

        if !is_within_root(&self.root, &canonical) {
            return Err(StorageError::AccessDenied(filename.to_string()));
        }

        if !fs::metadata(&canonical)?.is_file() {
            return Err(StorageError::NotAFile(file_name));
        }

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(DeleteResult {
                file_name,
                file_path,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::FileNotFound(file_name))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Classify a target that failed to canonicalize.
    ///
    /// A dangling link chain that leaves the root is denied exactly like a live
    /// one, so the response never depends on what exists outside the root.
    fn missing_target(&self, file_path: &Path, filename: &str, file_name: String) -> StorageError {
        let mut current = file_path.to_path_buf();

        for _ in 0..MAX_LINK_HOPS {
            let is_link = fs::symlink_metadata(&current)
                .map(|metadata| metadata.file_type().is_symlink())
                .unwrap_or(false);
            if !is_link {
                return StorageError::FileNotFound(file_name);
            }

            let target = match fs::read_link(&current) {
                Ok(target) => target,
                Err(_) => return StorageError::FileNotFound(file_name),
            };
            let base = current.parent().unwrap_or(&self.root);
            let next = normalize(&base.join(target));

            if !is_within_root(&self.root, &next) {
                return StorageError::AccessDenied(filename.to_string());
            }
            current = next;
        }

        StorageError::FileNotFound(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use crate::observer::testing::RecordingObserver;
    use tempfile::TempDir;

    fn open(dir: &Path) -> SaveDirectory {
        let config = PluginConfig::new(dir.to_string_lossy());
        SaveDirectory::open(&config, Arc::new(NoopObserver)).unwrap()
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        let config = PluginConfig::new(missing.to_string_lossy());

        let err = SaveDirectory::open(&config, Arc::new(NoopObserver)).err().unwrap();
        assert!(matches!(err, PluginError::SaveDirectoryNotFound(_)));
    }

    #[test]
    fn test_open_empty_path_fails() {
        let err = SaveDirectory::open(&PluginConfig::new(""), Arc::new(NoopObserver))
            .err()
            .unwrap();
        assert!(matches!(err, PluginError::MissingSaveDirectory));
    }

    #[test]
    fn test_open_regular_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        let config = PluginConfig::new(file.to_string_lossy());
        let err = SaveDirectory::open(&config, Arc::new(NoopObserver)).err().unwrap();
        assert!(matches!(err, PluginError::NotADirectory(_)));
    }

    #[test]
    fn test_list_empty_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(temp_dir.path());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_reports_sizes_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), b"0123456789").unwrap();
        fs::create_dir(temp_dir.path().join("b")).unwrap();
        fs::write(temp_dir.path().join("b").join("nested.txt"), b"ignored").unwrap();

        let store = open(temp_dir.path());
        let mut entries = store.list().unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[0].size, 10);
        assert!(!entries[0].is_directory);
        assert_eq!(entries[1].name, "b");
        assert!(entries[1].is_directory);
    }

    #[test]
    fn test_list_fails_when_root_removed() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("saves");
        fs::create_dir(&root).unwrap();

        let recorder = Arc::new(RecordingObserver::default());
        let config = PluginConfig::new(root.to_string_lossy());
        let store = SaveDirectory::open(&config, recorder.clone()).unwrap();
        fs::remove_dir(&root).unwrap();

        assert!(matches!(store.list(), Err(StorageError::IoError(_))));
        assert_eq!(recorder.events(), vec!["opened", "failed:list"]);
    }

    #[test]
    fn test_delete_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), b"0123456789").unwrap();

        let recorder = Arc::new(RecordingObserver::default());
        let config = PluginConfig::new(temp_dir.path().to_string_lossy());
        let store = SaveDirectory::open(&config, recorder.clone()).unwrap();

        let result = store.delete("a.txt").unwrap();
        assert_eq!(result.file_name, "a.txt");
        assert!(!temp_dir.path().join("a.txt").exists());
        assert!(store.list().unwrap().is_empty());
        assert_eq!(recorder.events(), vec!["opened", "deleted:a.txt", "listed:0"]);
    }

    #[test]
    fn test_delete_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("keep.txt"), b"keep").unwrap();
        let store = open(temp_dir.path());

        match store.delete("nested/missing.txt") {
            Err(StorageError::FileNotFound(name)) => assert_eq!(name, "missing.txt"),
            other => panic!("expected not found, got {other:?}"),
        }
        assert!(temp_dir.path().join("keep.txt").exists());
    }

    #[test]
    fn test_delete_traversal_never_leaves_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("saves");
        fs::create_dir(&root).unwrap();
        fs::write(temp_dir.path().join("secret.txt"), b"secret").unwrap();
        fs::write(root.join("secret.txt"), b"inside").unwrap();

        let recorder = Arc::new(RecordingObserver::default());
        let config = PluginConfig::new(root.to_string_lossy());
        let store = SaveDirectory::open(&config, recorder.clone()).unwrap();

        for attempt in ["../secret.txt", "../../secret.txt", "x/../secret.txt", ".."] {
            assert!(
                matches!(store.delete(attempt), Err(StorageError::AccessDenied(_))),
                "{attempt}"
            );
        }

        assert!(temp_dir.path().join("secret.txt").exists());
        assert!(root.join("secret.txt").exists());
        assert!(recorder.events().contains(&"rejected:delete:../secret.txt".to_string()));
    }

    #[test]
    fn test_delete_directory_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("b")).unwrap();
        let store = open(temp_dir.path());

        assert!(matches!(store.delete("b"), Err(StorageError::NotAFile(_))));
        assert!(temp_dir.path().join("b").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_symlink_escaping_root_denied() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("saves");
        fs::create_dir(&root).unwrap();
        let outside = temp_dir.path().join("outside.txt");
        fs::write(&outside, b"outside").unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link.txt")).unwrap();

        let store = open(&root);
        assert!(matches!(
            store.delete("link.txt"),
            Err(StorageError::AccessDenied(_))
        ));
        assert!(outside.exists());
        assert!(root.join("link.txt").symlink_metadata().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_dangling_symlink_outcome_ignores_outside_paths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("saves");
        fs::create_dir(&root).unwrap();
        fs::write(temp_dir.path().join("exists.txt"), b"outside").unwrap();
        std::os::unix::fs::symlink("../exists.txt", root.join("live")).unwrap();
        std::os::unix::fs::symlink("../absent.txt", root.join("dangling")).unwrap();
        std::os::unix::fs::symlink("hop", root.join("chain")).unwrap();
        std::os::unix::fs::symlink("../absent.txt", root.join("hop")).unwrap();
        std::os::unix::fs::symlink("missing-inside.txt", root.join("stale")).unwrap();

        let store = open(&root);
        for name in ["live", "dangling", "chain"] {
            assert!(
                matches!(store.delete(name), Err(StorageError::AccessDenied(_))),
                "{name}"
            );
        }
        match store.delete("stale") {
            Err(StorageError::FileNotFound(name)) => assert_eq!(name, "stale"),
            other => panic!("expected not found, got {other:?}"),
        }

        assert!(temp_dir.path().join("exists.txt").exists());
        for name in ["live", "dangling", "chain", "hop", "stale"] {
            assert!(root.join(name).symlink_metadata().is_ok(), "{name}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_list_skips_dangling_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let dangling = temp_dir.path().join("dangling");
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), &dangling).unwrap();
        fs::write(temp_dir.path().join("a.txt"), b"a").unwrap();

        let store = open(temp_dir.path());
        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.txt");
    }
}
