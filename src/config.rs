//! Configuration management for the KV cache manager
//!
//! The plugin itself only needs the save directory. The bundled host binary
//! additionally needs a bind address and the prefix the routes are mounted under.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_ROUTE_PREFIX: &str = "/api/plugins/kv-cache-manager";

/// Configuration handed to the plugin at construction time
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Directory whose files are listed and deleted
    /// Environment: KV_SAVE_DIR (required, no default)
    #[serde(default)]
    pub save_dir: String,
}

/// Configuration for the standalone host process
#[derive(Debug, Deserialize, Clone)]
pub struct HostConfig {
    /// Address the HTTP listener binds to
    /// Environment: KV_BIND_ADDRESS
    pub bind_address: String,

    /// Prefix the plugin routes are nested under
    /// Environment: KV_ROUTE_PREFIX
    pub route_prefix: String,

    #[serde(flatten)]
    pub plugin: PluginConfig,
}

impl PluginConfig {
    pub fn new(save_dir: impl Into<String>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    /// Load the plugin configuration from `KV_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(Environment::with_prefix("KV"))
            .build()?;
        Self::from_settings(settings)
    }

    /// Deserialize and validate an already assembled configuration
    pub fn from_settings(settings: Config) -> Result<Self, config::ConfigError> {
        let config: PluginConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the save directory as PathBuf
    pub fn save_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.save_dir)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.save_dir.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "KV_SAVE_DIR environment variable is required".into(),
            ));
        }
        Ok(())
    }
}

impl HostConfig {
    /// Load configuration from an optional config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Self::defaults()?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("KV"))
            .build()?;
        Self::from_settings(settings)
    }

    /// Deserialize and validate an already assembled configuration
    pub fn from_settings(settings: Config) -> Result<Self, config::ConfigError> {
        let config: HostConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Builder pre-populated with the host defaults
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("route_prefix", DEFAULT_ROUTE_PREFIX)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        self.plugin.validate()?;

        if !self.route_prefix.starts_with('/') {
            return Err(config::ConfigError::Message(format!(
                "route_prefix must start with '/': {}",
                self.route_prefix
            )));
        }

        if self.route_prefix.len() > 1 && self.route_prefix.ends_with('/') {
            return Err(config::ConfigError::Message(format!(
                "route_prefix must not end with '/': {}",
                self.route_prefix
            )));
        }

        if self.bind_address.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        Ok(())
    }
}
