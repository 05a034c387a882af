//! POSIX-shaped operations over the remote storage provider.

use wsh_errors::TaggedError;

use crate::error::FsError;
use crate::path::split_parent;
use crate::provider::{ProviderError, StorageProvider};
use crate::types::{Capabilities, DirEntry, StatRecord};

/// Options for [`FilesystemAdapter::rm`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RmOptions {
    /// Delete directory contents recursively
    pub recursive: bool,
}

/// Filesystem adapter: POSIX-shaped operations over a remote storage
/// provider whose semantics and error vocabulary differ from POSIX.
///
/// Every provider call runs inside one scoped translation step: failures
/// with a known identifier become [`TaggedError`]s, everything else is
/// re-thrown unchanged. Operations suspend at the provider round-trip;
/// each session gets its own adapter instance.
pub struct FilesystemAdapter<P> {
    provider: P,
    capabilities: Capabilities,
}

impl<P: StorageProvider> FilesystemAdapter<P> {
    /// Wrap a provider with no advertised capabilities.
    pub fn new(provider: P) -> Self {
        Self::with_capabilities(provider, Capabilities::default())
    }

    /// Wrap a provider, advertising a fixed capability set.
    pub fn with_capabilities(provider: P, capabilities: Capabilities) -> Self {
        Self {
            provider,
            capabilities,
        }
    }

    /// The capability set advertised by this instance.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn translate<T>(&self, result: Result<T, ProviderError>) -> Result<T, FsError> {
        result.map_err(FsError::translate)
    }

    /// List the entries of a directory.
    pub async fn readdir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        self.translate(self.provider.readdir(path).await)
    }

    /// Get metadata for a path.
    pub async fn stat(&self, path: &str) -> Result<StatRecord, FsError> {
        self.translate(self.provider.stat(path).await)
    }

    /// Create a directory.
    pub async fn mkdir(&self, path: &str) -> Result<(), FsError> {
        self.translate(self.provider.mkdir(path).await)
    }

    /// Read a file's content.
    pub async fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        self.translate(self.provider.read(path).await)
    }

    /// Write a file (create or overwrite).
    pub async fn write(&self, path: &str, data: &[u8]) -> Result<(), FsError> {
        self.translate(self.provider.write(path, data).await)
    }

    /// Remove a file, or a directory when `recursive` is set.
    ///
    /// Refusing to delete a directory without `recursive` happens here,
    /// before any delete reaches the provider: the guard is
    /// side-effect-free.
    pub async fn rm(&self, path: &str, options: RmOptions) -> Result<(), FsError> {
        let record = self.stat(path).await?;
        if record.is_directory && !options.recursive {
            return Err(FsError::Posix(TaggedError::is_directory(path)));
        }
        self.translate(self.provider.delete(path, options.recursive).await)
    }

    /// Remove an empty directory.
    pub async fn rmdir(&self, path: &str) -> Result<(), FsError> {
        let record = self.stat(path).await?;
        if !record.is_directory {
            return Err(FsError::Posix(TaggedError::not_directory(path)));
        }
        self.translate(self.provider.delete(path, false).await)
    }

    /// Move an item, POSIX `mv`-style: `new_path` may name either an
    /// existing directory to move into or a destination including a new
    /// leaf name.
    ///
    /// The provider's destination argument always means "the containing
    /// directory", so the two shapes are reconciled by a stat probe:
    /// - `stat(new_path)` succeeds: `new_path` is forwarded unchanged as
    ///   the destination, with no rename. A successful stat of a file is
    ///   forwarded the same way; the provider reports its own failure.
    /// - `stat(new_path)` fails as not-found: `new_path` splits into
    ///   `(parent, leaf)` and the leaf becomes an explicit rename.
    /// - any other stat failure propagates unchanged.
    pub async fn mv(&self, old_path: &str, new_path: &str) -> Result<(), FsError> {
        match self.stat(new_path).await {
            Ok(_) => self.translate(self.provider.move_item(old_path, new_path, None).await),
            Err(err) if err.is_not_found() => {
                let (parent, leaf) = split_parent(new_path);
                self.translate(
                    self.provider
                        .move_item(old_path, &parent, Some(&leaf))
                        .await,
                )
            }
            Err(err) => Err(err),
        }
    }

    /// Copy an item; destination semantics match [`FilesystemAdapter::mv`].
    pub async fn copy(&self, old_path: &str, new_path: &str) -> Result<(), FsError> {
        match self.stat(new_path).await {
            Ok(_) => self.translate(self.provider.copy_item(old_path, new_path, None).await),
            Err(err) if err.is_not_found() => {
                let (parent, leaf) = split_parent(new_path);
                self.translate(
                    self.provider
                        .copy_item(old_path, &parent, Some(&leaf))
                        .await,
                )
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use wsh_errors::ErrorKind;

    use super::*;
    use crate::testing::{MemoryProvider, ProviderCall};

    fn adapter_with(provider: &MemoryProvider) -> FilesystemAdapter<MemoryProvider> {
        FilesystemAdapter::new(provider.clone())
    }

    #[test]
    fn test_rm_directory_without_recursive_never_reaches_delete() {
        let provider = MemoryProvider::new();
        provider.add_dir("/dir");
        let fs = adapter_with(&provider);

        let err = block_on(fs.rm("/dir", RmOptions { recursive: false })).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::IsDirectory));
        assert_eq!(
            provider.calls(),
            vec![ProviderCall::Stat {
                path: String::from("/dir")
            }]
        );
    }

    #[test]
    fn test_rm_directory_recursive_issues_recursive_delete() {
        let provider = MemoryProvider::new();
        provider.add_dir("/dir");
        provider.add_file("/dir/a.txt", b"a");
        let fs = adapter_with(&provider);

        block_on(fs.rm("/dir", RmOptions { recursive: true })).unwrap();
        assert!(provider.calls().contains(&ProviderCall::Delete {
            path: String::from("/dir"),
            recursive: true,
        }));
        assert!(block_on(fs.stat("/dir")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_rm_resolves_iff_underlying_delete_resolves() {
        let provider = MemoryProvider::new();
        provider.add_dir("/dir");
        provider.fail_next("delete", "internal_error", "backend exploded");
        let fs = adapter_with(&provider);

        let err = block_on(fs.rm("/dir", RmOptions { recursive: true })).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::IoError));
    }

    #[test]
    fn test_rm_file_issues_plain_delete() {
        let provider = MemoryProvider::new();
        provider.add_file("/notes.txt", b"hi");
        let fs = adapter_with(&provider);

        block_on(fs.rm("/notes.txt", RmOptions::default())).unwrap();
        assert!(provider.calls().contains(&ProviderCall::Delete {
            path: String::from("/notes.txt"),
            recursive: false,
        }));
    }

    #[test]
    fn test_rmdir_of_file_fails_before_delete() {
        let provider = MemoryProvider::new();
        provider.add_file("/notes.txt", b"hi");
        let fs = adapter_with(&provider);

        let err = block_on(fs.rmdir("/notes.txt")).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotDirectory));
        assert_eq!(
            provider.calls(),
            vec![ProviderCall::Stat {
                path: String::from("/notes.txt")
            }]
        );
    }

    #[test]
    fn test_rmdir_of_non_empty_directory_translates_to_not_empty() {
        let provider = MemoryProvider::new();
        provider.add_file("/dir/a.txt", b"a");
        let fs = adapter_with(&provider);

        let err = block_on(fs.rmdir("/dir")).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotEmpty));
    }

    #[test]
    fn test_rmdir_of_empty_directory_succeeds() {
        let provider = MemoryProvider::new();
        provider.add_dir("/empty");
        let fs = adapter_with(&provider);

        block_on(fs.rmdir("/empty")).unwrap();
        assert!(provider.calls().contains(&ProviderCall::Delete {
            path: String::from("/empty"),
            recursive: false,
        }));
    }

    #[test]
    fn test_mv_to_existing_directory_forwards_destination_unchanged() {
        let provider = MemoryProvider::new();
        provider.add_file("/a/b.txt", b"data");
        provider.add_dir("/x/y");
        let fs = adapter_with(&provider);

        block_on(fs.mv("/a/b.txt", "/x/y")).unwrap();
        assert!(provider.calls().contains(&ProviderCall::Move {
            source: String::from("/a/b.txt"),
            dest: String::from("/x/y"),
            new_name: None,
        }));
        assert!(block_on(fs.stat("/x/y/b.txt")).is_ok());
    }

    #[test]
    fn test_mv_to_missing_leaf_splits_into_parent_and_rename() {
        let provider = MemoryProvider::new();
        provider.add_file("/a/b.txt", b"data");
        provider.add_dir("/x");
        let fs = adapter_with(&provider);

        block_on(fs.mv("/a/b.txt", "/x/new.txt")).unwrap();
        assert!(provider.calls().contains(&ProviderCall::Move {
            source: String::from("/a/b.txt"),
            dest: String::from("/x"),
            new_name: Some(String::from("new.txt")),
        }));
        assert!(block_on(fs.stat("/x/new.txt")).is_ok());
        assert!(block_on(fs.stat("/a/b.txt")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_mv_propagates_other_stat_failures_unchanged() {
        let provider = MemoryProvider::new();
        provider.add_file("/a/b.txt", b"data");
        provider.fail_next("stat", "mystery_identifier", "??");
        let fs = adapter_with(&provider);

        let err = block_on(fs.mv("/a/b.txt", "/x/new.txt")).unwrap_err();
        match err {
            FsError::Provider(inner) => {
                assert_eq!(inner.identifier, "mystery_identifier");
                assert_eq!(inner.message, "??");
            }
            other => panic!("Expected untranslated pass-through, got {other:?}"),
        }
        // The stat probe is the only provider call that happened
        assert_eq!(
            provider.calls(),
            vec![ProviderCall::Stat {
                path: String::from("/x/new.txt")
            }]
        );
    }

    #[test]
    fn test_copy_mirrors_mv_destination_handling() {
        let provider = MemoryProvider::new();
        provider.add_file("/a/b.txt", b"data");
        provider.add_dir("/x/y");
        let fs = adapter_with(&provider);

        block_on(fs.copy("/a/b.txt", "/x/y")).unwrap();
        assert!(provider.calls().contains(&ProviderCall::Copy {
            source: String::from("/a/b.txt"),
            dest: String::from("/x/y"),
            new_name: None,
        }));
        // Source survives a copy
        assert!(block_on(fs.stat("/a/b.txt")).is_ok());

        block_on(fs.copy("/a/b.txt", "/x/renamed.txt")).unwrap();
        assert!(provider.calls().contains(&ProviderCall::Copy {
            source: String::from("/a/b.txt"),
            dest: String::from("/x"),
            new_name: Some(String::from("renamed.txt")),
        }));
    }

    #[test]
    fn test_read_of_directory_translates_to_is_directory() {
        let provider = MemoryProvider::new();
        provider.add_dir("/dir");
        let fs = adapter_with(&provider);

        let err = block_on(fs.read("/dir")).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::IsDirectory));
    }

    #[test]
    fn test_write_quota_failure_translates_to_no_space() {
        let provider = MemoryProvider::new();
        provider.add_dir("/home");
        provider.fail_next("write", "storage_limit_reached", "Storage limit reached.");
        let fs = adapter_with(&provider);

        let err = block_on(fs.write("/home/big.bin", b"xxxx")).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NoSpace));
        assert_eq!(format!("{err}"), "Storage limit reached.");
    }

    #[test]
    fn test_readdir_and_mkdir_round_trip() {
        let provider = MemoryProvider::new();
        provider.add_file("/home/a.txt", b"a");
        let fs = adapter_with(&provider);

        block_on(fs.mkdir("/home/sub")).unwrap();
        let mut names: Vec<String> = block_on(fs.readdir("/home"))
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.txt", "sub"]);
    }

    #[test]
    fn test_capabilities_are_fixed_at_construction() {
        let provider = MemoryProvider::new();
        let fs = FilesystemAdapter::with_capabilities(
            provider,
            Capabilities::from_flags([("readdir.www", true)]),
        );
        assert!(fs.capabilities().supports("readdir.www"));
        assert!(!fs.capabilities().supports("symlink"));
    }
}
