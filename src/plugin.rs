//! Plugin lifecycle
//!
//! The host hands over a router on load and calls `exit` on unload. Nothing
//! else about the host is assumed.

use axum::Router;
use serde::Serialize;
use std::sync::Arc;

use crate::config::PluginConfig;
use crate::error::PluginError;
use crate::observer::StoreObserver;
use crate::protocol;
use crate::storage::SaveDirectory;

/// Static description of a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const INFO: PluginInfo = PluginInfo {
    id: "kv-cache-manager",
    name: "KV Cache Manager",
    description: "Plugin for managing saved files: list and delete operations.",
};

/// Entry points a host drives a plugin through
pub trait Plugin {
    fn info(&self) -> &PluginInfo;

    /// Attach the plugin routes to `router`. Called once at load time.
    fn init(&mut self, router: Router) -> Result<Router, PluginError>;

    /// Called once at unload time
    fn exit(&mut self);
}

/// Lists and deletes files in a single save directory
pub struct KvCacheManager {
    config: PluginConfig,
    observer: Arc<dyn StoreObserver>,
    store: Option<Arc<SaveDirectory>>,
}

impl KvCacheManager {
    pub fn new(config: PluginConfig, observer: Arc<dyn StoreObserver>) -> Self {
        Self {
            config,
            observer,
            store: None,
        }
    }

    /// Build the plugin from `KV_SAVE_DIR`
    pub fn from_env(observer: Arc<dyn StoreObserver>) -> Result<Self, PluginError> {
        Ok(Self::new(PluginConfig::from_env()?, observer))
    }

    /// Build the plugin from an already assembled configuration
    pub fn from_settings(
        settings: config::Config,
        observer: Arc<dyn StoreObserver>,
    ) -> Result<Self, PluginError> {
        Ok(Self::new(PluginConfig::from_settings(settings)?, observer))
    }

    /// The opened save directory, if the plugin is initialized
    pub fn store(&self) -> Option<&Arc<SaveDirectory>> {
        self.store.as_ref()
    }
}

impl Plugin for KvCacheManager {
    fn info(&self) -> &PluginInfo {
        &INFO
    }

    fn init(&mut self, router: Router) -> Result<Router, PluginError> {
        if self.store.is_some() {
            return Err(PluginError::AlreadyInitialized);
        }

        let store = Arc::new(SaveDirectory::open(&self.config, Arc::clone(&self.observer))?);
        let router = router.merge(protocol::routes(Arc::clone(&store)));
        self.store = Some(store);

        self.observer.plugin_loaded(&INFO);
        Ok(router)
    }

    fn exit(&mut self) {
        if self.store.take().is_some() {
            self.observer.plugin_exited(&INFO);
        }
    }
}
