//! Structured errors carrying a canonical kind and a message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kind::ErrorKind;

/// A structured error: one member of the closed kind set plus a
/// human-readable message.
///
/// Callers branch on [`TaggedError::kind`] for programmatic handling and
/// render [`TaggedError::message`] directly. When no explicit message is
/// supplied, the kind's default description is used, optionally
/// interpolated with a path or address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct TaggedError {
    /// Canonical error kind
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
}

impl TaggedError {
    /// Construct with the kind's default description as the message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: String::from(kind.description()),
        }
    }

    /// Construct with an explicit message.
    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Construct with a message synthesized around a path.
    pub fn with_path(kind: ErrorKind, path: &str) -> Self {
        let message = match kind {
            ErrorKind::NotFound => format!("Path not found: '{path}'"),
            ErrorKind::AlreadyExists => format!("Path already exists: '{path}'"),
            ErrorKind::IsDirectory => format!("Is a directory: '{path}'"),
            ErrorKind::NotDirectory => format!("Not a directory: '{path}'"),
            ErrorKind::NotEmpty => format!("Directory not empty: '{path}'"),
            ErrorKind::AccessDenied => format!("Permission denied: '{path}'"),
            ErrorKind::NotPermitted => format!("Operation not permitted on '{path}'"),
            _ => format!("{}: '{}'", kind.description(), path),
        };
        Self { kind, message }
    }

    /// Construct with a message synthesized around a network address.
    pub fn with_address(kind: ErrorKind, address: &str) -> Self {
        let message = match kind {
            ErrorKind::AddressInUse => format!("Address '{address}' in use"),
            ErrorKind::ConnectionRefused => format!("Connection to '{address}' refused"),
            ErrorKind::ConnectionReset => format!("Connection to '{address}' reset"),
            ErrorKind::TimedOut => format!("Connection to '{address}' timed out"),
            _ => format!("{}: '{}'", kind.description(), address),
        };
        Self { kind, message }
    }

    /// Construct from a string key instead of a typed handle.
    ///
    /// The key is normalized to a canonical handle before anything else
    /// happens.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a member of the closed kind set. This is a
    /// programmer error, never a recoverable runtime condition.
    pub fn named(name: &str) -> Self {
        let kind = ErrorKind::from_name(name)
            .unwrap_or_else(|| panic!("'{name}' is not a member of the error taxonomy"));
        Self::new(kind)
    }
}

// One factory per kind. Path-shaped kinds interpolate a path, the
// network-shaped kinds an address, the rest take no argument.
impl TaggedError {
    /// Permission denied on `path`.
    pub fn access_denied(path: &str) -> Self {
        Self::with_path(ErrorKind::AccessDenied, path)
    }

    /// `address` is already bound.
    pub fn address_in_use(address: &str) -> Self {
        Self::with_address(ErrorKind::AddressInUse, address)
    }

    /// Connection to `address` refused.
    pub fn connection_refused(address: &str) -> Self {
        Self::with_address(ErrorKind::ConnectionRefused, address)
    }

    /// Connection to `address` reset.
    pub fn connection_reset(address: &str) -> Self {
        Self::with_address(ErrorKind::ConnectionReset, address)
    }

    /// `path` already exists.
    pub fn already_exists(path: &str) -> Self {
        Self::with_path(ErrorKind::AlreadyExists, path)
    }

    /// `path` exceeds a size limit.
    pub fn too_large(path: &str) -> Self {
        Self::with_path(ErrorKind::TooLarge, path)
    }

    /// Malformed or unacceptable argument.
    pub fn invalid_argument() -> Self {
        Self::new(ErrorKind::InvalidArgument)
    }

    /// Underlying input/output failure.
    pub fn io_error() -> Self {
        Self::new(ErrorKind::IoError)
    }

    /// `path` is a directory.
    pub fn is_directory(path: &str) -> Self {
        Self::with_path(ErrorKind::IsDirectory, path)
    }

    /// Too many open handles.
    pub fn too_many_open() -> Self {
        Self::new(ErrorKind::TooManyOpen)
    }

    /// `path` does not exist.
    pub fn not_found(path: &str) -> Self {
        Self::with_path(ErrorKind::NotFound, path)
    }

    /// No storage space left.
    pub fn no_space() -> Self {
        Self::new(ErrorKind::NoSpace)
    }

    /// `path` is not a directory.
    pub fn not_directory(path: &str) -> Self {
        Self::with_path(ErrorKind::NotDirectory, path)
    }

    /// `path` is a non-empty directory.
    pub fn not_empty(path: &str) -> Self {
        Self::with_path(ErrorKind::NotEmpty, path)
    }

    /// Operation not permitted on `path`.
    pub fn not_permitted(path: &str) -> Self {
        Self::with_path(ErrorKind::NotPermitted, path)
    }

    /// Peer closed the stream mid-write.
    pub fn broken_pipe() -> Self {
        Self::new(ErrorKind::BrokenPipe)
    }

    /// Connection to `address` timed out.
    pub fn timed_out(address: &str) -> Self {
        Self::with_address(ErrorKind::TimedOut, address)
    }
}
