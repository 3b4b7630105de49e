//! KV Cache Manager
//!
//! A host-loaded plugin that lists and deletes files in one configured directory.

pub mod config;
pub mod error;
pub mod observer;
pub mod plugin;
pub mod protocol;
pub mod storage;

pub use crate::config::{HostConfig, PluginConfig};
pub use observer::{LogObserver, NoopObserver, StoreObserver};
pub use plugin::{INFO, KvCacheManager, Plugin, PluginInfo};
pub use storage::SaveDirectory;
