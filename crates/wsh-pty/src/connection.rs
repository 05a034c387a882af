//! Host connection abstraction.

use wsh_proto::HostMessage;

/// Outbound channel to the window that owns the real terminal UI.
///
/// Sends are fire-and-forget: no acknowledgement or backpressure signal
/// is solicited from the host. Inbound messages travel the other way:
/// the owner of the connection feeds them to
/// [`PseudoTerminal::handle_message`](crate::PseudoTerminal::handle_message)
/// as they arrive.
pub trait HostConnection {
    /// Forward one message to the host.
    fn send(&self, message: &HostMessage);
}
