//! Test doubles for the filesystem adapter.

mod memory;

pub use memory::{MemoryProvider, ProviderCall};
