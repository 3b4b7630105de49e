//! Error types
//!
//! Defines the per-request storage errors and the fatal plugin lifecycle errors.

use std::fmt;
use std::io;

/// Errors raised while serving a single list or delete request
#[derive(Debug)]
pub enum StorageError {
    AccessDenied(String),
    FileNotFound(String),
    InvalidName(String),
    NotAFile(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::AccessDenied(p) => write!(f, "Access denied: {}", p),
            StorageError::FileNotFound(p) => write!(f, "File not found: {}", p),
            StorageError::InvalidName(p) => write!(f, "Invalid file name: {:?}", p),
            StorageError::NotAFile(p) => write!(f, "Not a regular file: {}", p),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Errors that prevent the plugin from starting
#[derive(Debug)]
pub enum PluginError {
    Config(config::ConfigError),
    MissingSaveDirectory,
    SaveDirectoryNotFound(String),
    NotADirectory(String),
    AlreadyInitialized,
    Io(io::Error),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::Config(e) => write!(f, "Configuration error: {}", e),
            PluginError::MissingSaveDirectory => {
                write!(f, "KV_SAVE_DIR environment variable is required")
            }
            PluginError::SaveDirectoryNotFound(p) => {
                write!(f, "Saves directory does not exist: {}", p)
            }
            PluginError::NotADirectory(p) => write!(f, "Saves path is not a directory: {}", p),
            PluginError::AlreadyInitialized => write!(f, "Plugin is already initialized"),
            PluginError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PluginError::Config(e) => Some(e),
            PluginError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for PluginError {
    fn from(error: config::ConfigError) -> Self {
        PluginError::Config(error)
    }
}

impl From<io::Error> for PluginError {
    fn from(error: io::Error) -> Self {
        PluginError::Io(error)
    }
}
