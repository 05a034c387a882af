//! Core types for the filesystem adapter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::path::filename;

/// Metadata for one filesystem entry.
///
/// Only `is_directory` is interpreted by this layer; the remaining
/// provider attributes ride along in `extra` untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    /// Full path of the entry
    pub path: String,

    /// Entry name (last path component)
    pub name: String,

    /// Is this a directory?
    pub is_directory: bool,

    /// Size in bytes (0 for directories)
    pub size: u64,

    /// Last modified timestamp (provider clock)
    pub modified_at: u64,

    /// Provider attributes this layer does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatRecord {
    /// Metadata for a directory at `path`.
    pub fn directory(path: &str) -> Self {
        Self {
            path: String::from(path),
            name: String::from(filename(path)),
            is_directory: true,
            size: 0,
            modified_at: 0,
            extra: Map::new(),
        }
    }

    /// Metadata for a file at `path`.
    pub fn file(path: &str, size: u64) -> Self {
        Self {
            path: String::from(path),
            name: String::from(filename(path)),
            is_directory: false,
            size,
            modified_at: 0,
            extra: Map::new(),
        }
    }
}

/// Directory entry returned by readdir.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Entry name
    pub name: String,

    /// Full path
    pub path: String,

    /// Is this a directory?
    pub is_directory: bool,

    /// File size (0 for directories)
    pub size: u64,

    /// Last modified timestamp
    pub modified_at: u64,
}

impl From<&StatRecord> for DirEntry {
    fn from(record: &StatRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            is_directory: record.is_directory,
            size: record.size,
            modified_at: record.modified_at,
        }
    }
}

/// Capabilities advertised by one adapter instance.
///
/// The flag set is fixed at construction and read-only afterwards, e.g.
/// `{"readdir.www": true}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    flags: BTreeMap<String, bool>,
}

impl Capabilities {
    /// Build from `(name, enabled)` pairs.
    pub fn from_flags<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self {
            flags: flags
                .into_iter()
                .map(|(name, enabled)| (name.into(), enabled))
                .collect(),
        }
    }

    /// Whether a named capability is advertised and enabled.
    pub fn supports(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Iterate over the advertised flags.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, enabled)| (name.as_str(), *enabled))
    }
}
