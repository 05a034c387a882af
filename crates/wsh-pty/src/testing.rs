//! Test doubles for the transport.

use std::cell::RefCell;
use std::rc::Rc;

use wsh_proto::HostMessage;

use crate::connection::HostConnection;

/// Host connection that records every outbound message.
///
/// Clones share the record, so a test can keep one handle for
/// assertions while the transport owns another.
#[derive(Clone, Default)]
pub struct RecordingConnection {
    sent: Rc<RefCell<Vec<HostMessage>>>,
}

impl RecordingConnection {
    /// Create an empty recording connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message sent so far, in order.
    pub fn sent(&self) -> Vec<HostMessage> {
        self.sent.borrow().clone()
    }
}

impl HostConnection for RecordingConnection {
    fn send(&self, message: &HostMessage) {
        self.sent.borrow_mut().push(message.clone());
    }
}
