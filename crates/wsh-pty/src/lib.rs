//! Pseudo-terminal transport for the wsh platform layer.
//!
//! Bridges a hosted shell process's byte-stream I/O and terminal-control
//! events to the host window through discriminated messages:
//!
//! - **Stream**: the inbound stdin FIFO; reads suspend until bytes arrive
//! - **Events**: the push-only listener registry for out-of-band control
//!   events (`ioctl.set`, `close`)
//! - **Pty**: the transport itself, tying inbound dispatch, outbound
//!   `stdout` messages, and the `ready` handshake together
//! - **Web**: `postMessage` bindings for the worker-hosted case
//!
//! Everything here is single-threaded and event-driven; one transport
//! instance lives exactly as long as its host connection.

mod connection;
mod events;
mod pty;
mod stream;

pub mod testing;
pub mod util;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use connection::HostConnection;
pub use events::ListenerRegistry;
pub use pty::PseudoTerminal;
pub use stream::ByteStream;

// The protocol vocabulary, re-exported for consumers of the transport
pub use wsh_proto::{events as event_names, HostMessage, RunConfig};
