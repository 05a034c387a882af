//! The closed error-kind vocabulary and its canonical metadata.
//!
//! Every error surfaced above the adapter boundary carries exactly one of
//! these kinds. Numeric codes and default descriptions are fixed for
//! downstream compatibility and are reached only through accessor
//! functions; there is no mutable backing table to expose.

use serde::{Deserialize, Serialize};

/// POSIX-style error kinds.
///
/// The set is closed and immutable at runtime. Kinds are `Copy` handles;
/// metadata lives in [`ErrorKind::code`], [`ErrorKind::description`] and
/// [`ErrorKind::name`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Permission denied
    AccessDenied,
    /// Address already bound
    AddressInUse,
    /// Remote end refused the connection
    ConnectionRefused,
    /// Remote end reset the connection
    ConnectionReset,
    /// Path already exists
    AlreadyExists,
    /// File exceeds a size limit
    TooLarge,
    /// Malformed or unacceptable argument
    InvalidArgument,
    /// Underlying input/output failure
    IoError,
    /// Target is a directory
    IsDirectory,
    /// Too many open handles
    TooManyOpen,
    /// Path not found
    NotFound,
    /// No storage space left
    NoSpace,
    /// Target is not a directory
    NotDirectory,
    /// Directory not empty
    NotEmpty,
    /// Operation not permitted
    NotPermitted,
    /// Peer closed the stream mid-write
    BrokenPipe,
    /// Operation timed out
    TimedOut,
}

/// Metadata record for one error kind: the `describe` lookup result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    /// The kind this record describes
    pub kind: ErrorKind,
    /// Canonical numeric code
    pub code: u32,
    /// Default human-readable description
    pub description: &'static str,
}

impl ErrorKind {
    /// Every member of the closed set, for iteration and reverse lookups.
    pub const ALL: [ErrorKind; 17] = [
        ErrorKind::AccessDenied,
        ErrorKind::AddressInUse,
        ErrorKind::ConnectionRefused,
        ErrorKind::ConnectionReset,
        ErrorKind::AlreadyExists,
        ErrorKind::TooLarge,
        ErrorKind::InvalidArgument,
        ErrorKind::IoError,
        ErrorKind::IsDirectory,
        ErrorKind::TooManyOpen,
        ErrorKind::NotFound,
        ErrorKind::NoSpace,
        ErrorKind::NotDirectory,
        ErrorKind::NotEmpty,
        ErrorKind::NotPermitted,
        ErrorKind::BrokenPipe,
        ErrorKind::TimedOut,
    ];

    /// Canonical numeric code.
    ///
    /// These values are fixed for downstream compatibility (shell exit
    /// statuses, `errno`-style display) and must not change.
    pub fn code(self) -> u32 {
        match self {
            ErrorKind::NotPermitted => 1,
            ErrorKind::NotFound => 2,
            ErrorKind::IoError => 5,
            ErrorKind::AccessDenied => 13,
            ErrorKind::AlreadyExists => 17,
            ErrorKind::NotDirectory => 20,
            ErrorKind::IsDirectory => 21,
            ErrorKind::InvalidArgument => 22,
            ErrorKind::TooManyOpen => 24,
            ErrorKind::TooLarge => 27,
            ErrorKind::NoSpace => 28,
            ErrorKind::BrokenPipe => 32,
            ErrorKind::NotEmpty => 39,
            ErrorKind::AddressInUse => 98,
            ErrorKind::ConnectionReset => 104,
            ErrorKind::TimedOut => 110,
            ErrorKind::ConnectionRefused => 111,
        }
    }

    /// Default human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::AccessDenied => "Permission denied",
            ErrorKind::AddressInUse => "Address already in use",
            ErrorKind::ConnectionRefused => "Connection refused",
            ErrorKind::ConnectionReset => "Connection reset by peer",
            ErrorKind::AlreadyExists => "File exists",
            ErrorKind::TooLarge => "File too large",
            ErrorKind::InvalidArgument => "Invalid argument",
            ErrorKind::IoError => "Input/output error",
            ErrorKind::IsDirectory => "Is a directory",
            ErrorKind::TooManyOpen => "Too many open files",
            ErrorKind::NotFound => "No such file or directory",
            ErrorKind::NoSpace => "No space left on device",
            ErrorKind::NotDirectory => "Not a directory",
            ErrorKind::NotEmpty => "Directory not empty",
            ErrorKind::NotPermitted => "Operation not permitted",
            ErrorKind::BrokenPipe => "Broken pipe",
            ErrorKind::TimedOut => "Connection timed out",
        }
    }

    /// Canonical string key, the inverse of [`ErrorKind::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::AccessDenied => "ACCESS_DENIED",
            ErrorKind::AddressInUse => "ADDRESS_IN_USE",
            ErrorKind::ConnectionRefused => "CONNECTION_REFUSED",
            ErrorKind::ConnectionReset => "CONNECTION_RESET",
            ErrorKind::AlreadyExists => "ALREADY_EXISTS",
            ErrorKind::TooLarge => "TOO_LARGE",
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::IoError => "IO_ERROR",
            ErrorKind::IsDirectory => "IS_DIRECTORY",
            ErrorKind::TooManyOpen => "TOO_MANY_OPEN",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::NoSpace => "NO_SPACE",
            ErrorKind::NotDirectory => "NOT_DIRECTORY",
            ErrorKind::NotEmpty => "NOT_EMPTY",
            ErrorKind::NotPermitted => "NOT_PERMITTED",
            ErrorKind::BrokenPipe => "BROKEN_PIPE",
            ErrorKind::TimedOut => "TIMED_OUT",
        }
    }

    /// Full metadata record for this kind.
    pub fn record(self) -> ErrorRecord {
        ErrorRecord {
            kind: self,
            code: self.code(),
            description: self.description(),
        }
    }

    /// Reverse lookup from a numeric code.
    ///
    /// Unmapped integers return [`ErrorKind::NotFound`] as the sentinel;
    /// this lookup never fails.
    pub fn from_code(code: u32) -> ErrorKind {
        ErrorKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .unwrap_or(ErrorKind::NotFound)
    }

    /// Normalize a human-typed string key to the canonical handle.
    ///
    /// Returns `None` for keys outside the closed set.
    pub fn from_name(name: &str) -> Option<ErrorKind> {
        ErrorKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}
