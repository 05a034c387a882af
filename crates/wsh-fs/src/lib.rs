//! Filesystem adapter for the wsh platform layer.
//!
//! Presents POSIX-shaped operations (`readdir`, `stat`, `mkdir`,
//! `read`, `write`, `rm`, `rmdir`, `mv`, `copy`) over a remote storage
//! API whose semantics and error vocabulary differ from POSIX:
//!
//! - **Provider**: the exact slice of the remote API this layer consumes
//! - **Translate**: the fixed table mapping provider failure identifiers
//!   onto the closed POSIX kind set
//! - **Adapter**: the operations, including the stat-first guards for
//!   `rm`/`rmdir` and the destination/rename reconciliation for
//!   `mv`/`copy`
//! - **Testing**: an in-memory provider double with a recorded call log
//!
//! # Error discipline
//!
//! Every provider failure is offered to the translation table; matches
//! become `TaggedError`s, unmapped identifiers are re-thrown unchanged.
//! Translation never swallows an error and never invents a kind.

mod adapter;
mod error;
mod provider;
mod translate;

pub mod path;
pub mod testing;
pub mod types;

pub use adapter::{FilesystemAdapter, RmOptions};
pub use error::FsError;
pub use provider::{ProviderError, StorageProvider};
pub use translate::kind_for_identifier;
pub use types::{Capabilities, DirEntry, StatRecord};
