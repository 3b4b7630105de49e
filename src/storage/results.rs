//! Storage result types
//!
//! Defines result structures returned by storage operations.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// Request kinds served by the save directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Delete,
}

impl Operation {
    /// Generic message reported to the client on unexpected failures
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to list files",
            Operation::Delete => "Failed to delete file",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List => write!(f, "list"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// A single entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    #[serde(serialize_with = "serialize_iso8601")]
    pub modified: DateTime<Utc>,
    pub is_directory: bool,
}

/// Result of a file deletion operation
#[derive(Debug, Clone)]
pub struct DeleteResult {
    pub file_name: String,
    pub file_path: PathBuf,
}

impl DeleteResult {
    pub fn message(&self) -> String {
        format!("File {} deleted successfully", self.file_name)
    }
}

// 2024-05-01T12:30:00.000Z
fn serialize_iso8601<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
}
