//! Event observers
//!
//! Storage and plugin code report what they do through a `StoreObserver`
//! instead of writing log lines themselves.

use log::{error, info, warn};
use std::path::Path;

use crate::error::StorageError;
use crate::plugin::PluginInfo;
use crate::storage::Operation;

/// Log target shared by every record this crate emits
pub const LOG_TARGET: &str = "kv_cache_manager";

/// Receives events from the save directory and the plugin lifecycle
pub trait StoreObserver: Send + Sync {
    fn directory_opened(&self, _root: &Path) {}

    fn files_listed(&self, _count: usize) {}

    fn file_deleted(&self, _name: &str) {}

    /// A request was refused before touching the filesystem
    fn request_rejected(&self, _operation: Operation, _name: &str, _reason: &StorageError) {}

    fn operation_failed(&self, _operation: Operation, _error: &StorageError) {}

    fn plugin_loaded(&self, _info: &PluginInfo) {}

    fn plugin_exited(&self, _info: &PluginInfo) {}
}

/// Observer that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StoreObserver for NoopObserver {}

/// Observer that forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl StoreObserver for LogObserver {
    fn directory_opened(&self, root: &Path) {
        info!(target: LOG_TARGET, "Saves directory: {}", root.display());
    }

    fn files_listed(&self, count: usize) {
        info!(target: LOG_TARGET, "Listed {} entries", count);
    }

    fn file_deleted(&self, name: &str) {
        warn!(target: LOG_TARGET, "File deleted: {}", name);
    }

    fn request_rejected(&self, operation: Operation, name: &str, reason: &StorageError) {
        warn!(
            target: LOG_TARGET,
            "Rejected {} request for {:?}: {}", operation, name, reason
        );
    }

    fn operation_failed(&self, operation: Operation, err: &StorageError) {
        error!(target: LOG_TARGET, "{}: {}", operation.failure_message(), err);
    }

    fn plugin_loaded(&self, info: &PluginInfo) {
        info!(target: LOG_TARGET, "Plugin loaded: {} ({})", info.name, info.id);
    }

    fn plugin_exited(&self, info: &PluginInfo) {
        info!(target: LOG_TARGET, "Plugin exited: {}", info.id);
    }
}
