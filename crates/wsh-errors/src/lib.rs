//! Error taxonomy for the wsh platform layer.
//!
//! A closed, POSIX-flavored error vocabulary shared by every component
//! above the storage-provider boundary:
//!
//! - **ErrorKind**: the fixed set of kinds, with canonical numeric codes
//!   and default descriptions
//! - **ErrorRecord**: metadata lookup result (`describe`)
//! - **TaggedError**: a kind plus a human-readable message, built through
//!   per-kind factories
//!
//! The kind set is closed: constructing from a string key outside the set
//! fails immediately and loudly at construction time, because it can only
//! be a programming mistake. Reverse numeric lookup, by contrast, is
//! total and falls back to the `NotFound` sentinel.

mod kind;
mod tagged;

pub use kind::{ErrorKind, ErrorRecord};
pub use tagged::TaggedError;
