//! The adapter's failure channel.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wsh_errors::{ErrorKind, TaggedError};

use crate::provider::ProviderError;
use crate::translate::kind_for_identifier;

/// Failure surfaced by a filesystem adapter operation.
///
/// Every provider failure is offered to the translation table. A match
/// yields [`FsError::Posix`]; an unmapped identifier is re-thrown
/// unchanged as [`FsError::Provider`]. Nothing is ever swallowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum FsError {
    /// Provider failure translated into the closed POSIX vocabulary
    #[error(transparent)]
    Posix(#[from] TaggedError),

    /// Provider failure whose identifier is outside the translation
    /// table, surfaced unchanged
    #[error(transparent)]
    Provider(ProviderError),
}

impl FsError {
    /// Translate a provider failure.
    ///
    /// The provider's own message is kept on translated errors when it
    /// has one; otherwise the kind's default description applies.
    pub fn translate(error: ProviderError) -> FsError {
        match kind_for_identifier(&error.identifier) {
            Some(kind) if error.message.is_empty() => FsError::Posix(TaggedError::new(kind)),
            Some(kind) => FsError::Posix(TaggedError::with_message(kind, error.message)),
            None => FsError::Provider(error),
        }
    }

    /// The POSIX kind, if this failure was translated.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            FsError::Posix(err) => Some(err.kind),
            FsError::Provider(_) => None,
        }
    }

    /// Check if this is a translated "not found" failure.
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::NotFound)
    }
}
