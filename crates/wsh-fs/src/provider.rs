//! Remote storage provider call surface.
//!
//! The provider is an external remote-storage API with its own semantics
//! and its own error vocabulary. This trait is the exact slice of that
//! API the adapter consumes; translation into the POSIX taxonomy happens
//! in the adapter, never here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{DirEntry, StatRecord};

/// Failure reported by the remote storage API.
///
/// The provider identifies failures by short string identifiers (e.g.
/// `item_with_same_name_exists`) plus a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{identifier}: {message}")]
pub struct ProviderError {
    /// Provider-specific failure identifier
    pub identifier: String,
    /// Human-readable message from the provider
    pub message: String,
}

impl ProviderError {
    /// Build a provider failure.
    pub fn new(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            message: message.into(),
        }
    }
}

/// The remote storage API's call surface.
///
/// All operations suspend at the network round-trip. Futures are not
/// `Send`: this layer runs in a single-threaded browser context.
///
/// Destination arguments of [`StorageProvider::move_item`] and
/// [`StorageProvider::copy_item`] always name the **containing
/// directory** to place the item under; renaming on the way is expressed
/// through the separate `new_name` argument.
#[async_trait(?Send)]
pub trait StorageProvider {
    /// List the entries of a directory.
    async fn readdir(&self, path: &str) -> Result<Vec<DirEntry>, ProviderError>;

    /// Get metadata for a path.
    async fn stat(&self, path: &str) -> Result<StatRecord, ProviderError>;

    /// Create a directory.
    async fn mkdir(&self, path: &str) -> Result<(), ProviderError>;

    /// Read a file's content.
    async fn read(&self, path: &str) -> Result<Vec<u8>, ProviderError>;

    /// Write a file (create or overwrite).
    async fn write(&self, path: &str, data: &[u8]) -> Result<(), ProviderError>;

    /// Delete a file or directory tree.
    async fn delete(&self, path: &str, recursive: bool) -> Result<(), ProviderError>;

    /// Move `source` under the directory `dest`, optionally renaming it.
    async fn move_item(
        &self,
        source: &str,
        dest: &str,
        new_name: Option<&str>,
    ) -> Result<(), ProviderError>;

    /// Copy `source` under the directory `dest`, optionally renaming it.
    async fn copy_item(
        &self,
        source: &str,
        dest: &str,
        new_name: Option<&str>,
    ) -> Result<(), ProviderError>;
}
