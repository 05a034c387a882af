//! The pseudo-terminal transport.

use std::rc::Rc;

use serde_json::Value;
use wsh_proto::{events, HostMessage};

use crate::connection::HostConnection;
use crate::events::ListenerRegistry;
use crate::stream::ByteStream;
use crate::util;

/// Pseudo-terminal transport: byte-stream I/O plus an out-of-band
/// control-event channel for a hosted process, carried over one host
/// connection.
///
/// Lives exactly as long as the connection it was built on; teardown is
/// the owning shell runtime's responsibility. One instance per session,
/// nothing shared across instances.
pub struct PseudoTerminal {
    conn: Rc<dyn HostConnection>,
    stdin: ByteStream,
    listeners: ListenerRegistry,
}

impl PseudoTerminal {
    /// Build a transport over an established host connection.
    pub fn new(conn: Rc<dyn HostConnection>) -> Self {
        Self {
            conn,
            stdin: ByteStream::new(),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Signal the host that this process is ready to receive `config`.
    pub fn announce_ready(&self) {
        self.conn.send(&HostMessage::Ready);
    }

    /// A handle onto the standard-input stream.
    pub fn stdin(&self) -> ByteStream {
        self.stdin.clone()
    }

    /// Read from standard input, suspending until bytes are available.
    pub async fn read(&self, buf: &mut [u8]) -> usize {
        self.stdin.read(buf).await
    }

    /// Write bytes to standard output: one outbound `stdout` message per
    /// call, fire-and-forget.
    pub fn write(&self, bytes: &[u8]) {
        self.conn.send(&HostMessage::Stdout {
            data: bytes.to_vec(),
        });
    }

    /// Write a string to standard output, transcoded to UTF-8 bytes; the
    /// host channel only carries binary payloads.
    pub fn write_str(&self, text: &str) {
        self.write(text.as_bytes());
    }

    /// Register a control-event listener (additive, in arrival order).
    pub fn on(&self, event: &str, callback: impl Fn(&Value) + 'static) {
        self.listeners.on(event, callback);
    }

    /// Dispatch one inbound host message, in arrival order.
    ///
    /// `stdin` payloads append to the byte buffer; `ioctl.set` dispatches
    /// synchronously to its listeners, bypassing the buffer; `close` is a
    /// notification: it reaches listeners under [`events::CLOSE`] and
    /// never fails pending reads. `config` belongs to the owning shell
    /// runtime and is handed back untouched. Anything else arriving
    /// inbound is logged and dropped.
    pub fn handle_message(&self, message: HostMessage) -> Option<HostMessage> {
        match message {
            HostMessage::Stdin { data } => {
                self.stdin.push(&data);
                None
            }
            HostMessage::Ioctl { data } => {
                self.listeners.emit(events::IOCTL_SET, &data);
                None
            }
            HostMessage::Close => {
                self.listeners.emit(events::CLOSE, &Value::Null);
                None
            }
            HostMessage::Config { .. } => Some(message),
            other => {
                util::log(&format!(
                    "[pty] unexpected inbound '{}' message",
                    other.discriminator()
                ));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::future::Future;
    use std::task::{Context, Poll};

    use futures::executor::block_on;
    use futures::task::noop_waker;
    use serde_json::json;
    use wsh_proto::RunConfig;

    use super::*;
    use crate::testing::RecordingConnection;

    fn terminal() -> (PseudoTerminal, RecordingConnection) {
        let conn = RecordingConnection::new();
        let pty = PseudoTerminal::new(Rc::new(conn.clone()));
        (pty, conn)
    }

    #[test]
    fn test_write_str_produces_one_stdout_message() {
        let (pty, conn) = terminal();
        pty.write_str("hello");

        let sent = conn.sent();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            HostMessage::Stdout { data } => {
                assert_eq!(String::from_utf8(data.clone()).unwrap(), "hello");
            }
            other => panic!("Expected stdout, got {other:?}"),
        }
    }

    #[test]
    fn test_announce_ready() {
        let (pty, conn) = terminal();
        pty.announce_ready();
        assert_eq!(conn.sent(), vec![HostMessage::Ready]);
    }

    #[test]
    fn test_stdin_messages_read_back_in_order() {
        let (pty, _conn) = terminal();
        pty.handle_message(HostMessage::Stdin {
            data: b"hello".to_vec(),
        });
        pty.handle_message(HostMessage::Stdin {
            data: b"world".to_vec(),
        });

        let mut out = Vec::new();
        block_on(async {
            let mut buf = [0u8; 4];
            while out.len() < 10 {
                let count = pty.read(&mut buf).await;
                out.extend_from_slice(&buf[..count]);
            }
        });
        assert_eq!(out, b"helloworld");
    }

    #[test]
    fn test_ioctl_dispatches_to_listeners_in_order() {
        let (pty, _conn) = terminal();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        pty.on(events::IOCTL_SET, move |payload| {
            first.borrow_mut().push(format!("first:{payload}"));
        });
        let second = Rc::clone(&seen);
        pty.on(events::IOCTL_SET, move |payload| {
            second.borrow_mut().push(format!("second:{payload}"));
        });

        pty.handle_message(HostMessage::Ioctl {
            data: json!({"rows": 24}),
        });

        assert_eq!(
            *seen.borrow(),
            vec![
                String::from("first:{\"rows\":24}"),
                String::from("second:{\"rows\":24}"),
            ]
        );
    }

    #[test]
    fn test_ioctl_bypasses_the_byte_buffer() {
        let (pty, _conn) = terminal();
        pty.handle_message(HostMessage::Ioctl {
            data: json!({"rows": 24}),
        });
        assert!(pty.stdin().is_empty());
    }

    #[test]
    fn test_ioctl_without_listeners_is_noop() {
        let (pty, _conn) = terminal();
        pty.handle_message(HostMessage::Ioctl { data: Value::Null });
    }

    #[test]
    fn test_close_notifies_but_leaves_pending_reads_suspended() {
        let (pty, _conn) = terminal();
        let closed = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&closed);
        pty.on(events::CLOSE, move |_| *flag.borrow_mut() = true);

        let stdin = pty.stdin();
        let mut buf = [0u8; 4];
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        let mut read = Box::pin(stdin.read(&mut buf));
        assert!(read.as_mut().poll(&mut cx).is_pending());

        pty.handle_message(HostMessage::Close);
        assert!(*closed.borrow());
        // Close is a notification, not a failure: the read stays pending
        assert!(matches!(read.as_mut().poll(&mut cx), Poll::Pending));
    }

    #[test]
    fn test_config_is_handed_back_to_the_runtime() {
        let (pty, _conn) = terminal();
        let mut values = RunConfig::new();
        values.insert("auth_token", json!("tok-1"));

        match pty.handle_message(HostMessage::Config { values }) {
            Some(HostMessage::Config { values }) => {
                assert_eq!(values.auth_token(), Some("tok-1"));
            }
            other => panic!("Expected config back, got {other:?}"),
        }
    }

    #[test]
    fn test_outbound_discriminators_arriving_inbound_are_dropped() {
        let (pty, conn) = terminal();
        assert!(pty.handle_message(HostMessage::Ready).is_none());
        assert!(pty
            .handle_message(HostMessage::Stdout { data: Vec::new() })
            .is_none());
        assert!(conn.sent().is_empty());
    }
}
