//! Browser bindings for the host connection.
//!
//! The hosted process runs in a Web Worker; the host window is reached
//! through the worker's `postMessage` channel. Messages cross the
//! boundary as JSON strings and are re-parsed on each side.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DedicatedWorkerGlobalScope, MessageEvent};

use wsh_proto::HostMessage;

use crate::connection::HostConnection;
use crate::util;

/// Host connection over the current worker's `postMessage` channel.
pub struct WorkerScopeConnection {
    scope: DedicatedWorkerGlobalScope,
}

impl WorkerScopeConnection {
    /// Bind to the global scope of the worker this process runs in.
    pub fn from_global() -> Result<Self, JsValue> {
        let scope = js_sys::global().dyn_into::<DedicatedWorkerGlobalScope>()?;
        Ok(Self { scope })
    }
}

impl HostConnection for WorkerScopeConnection {
    fn send(&self, message: &HostMessage) {
        match message.to_json() {
            Ok(json) => {
                if let Err(err) = self.scope.post_message(&JsValue::from_str(&json)) {
                    util::log(&format!("[pty] postMessage failed: {err:?}"));
                }
            }
            Err(err) => util::log(&format!(
                "[pty] failed to encode '{}' message: {err}",
                message.discriminator()
            )),
        }
    }
}

/// Decode an inbound `MessageEvent` into a host message.
///
/// Accepts both string payloads and structured objects (stringified
/// before parsing). Returns `None` for events this layer does not
/// understand; those are logged, never raised.
pub fn decode_message_event(event: &MessageEvent) -> Option<HostMessage> {
    let data = event.data();
    let json = match data.as_string() {
        Some(text) => text,
        None => String::from(js_sys::JSON::stringify(&data).ok()?),
    };
    match HostMessage::from_json(&json) {
        Ok(message) => Some(message),
        Err(err) => {
            util::log(&format!("[pty] undecodable host message: {err}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;

    #[wasm_bindgen_test]
    fn test_json_survives_the_js_boundary() {
        let msg = HostMessage::Stdin {
            data: b"ls\n".to_vec(),
        };
        let js = JsValue::from_str(&msg.to_json().unwrap());
        let back = HostMessage::from_json(&js.as_string().unwrap()).unwrap();
        assert_eq!(back, msg);
    }
}
