//! Host Message Protocol for wsh
//!
//! This crate is the **single source of truth** for the discriminated
//! messages exchanged between a hosted shell process and the window that
//! owns the real terminal UI. Messages carry their discriminator in the
//! `$` field on the wire.
//!
//! # Message Table
//!
//! | Discriminator | Direction      | Payload         | Meaning                          |
//! |---------------|----------------|-----------------|----------------------------------|
//! | `config`      | host → process | key/value map   | one-time run configuration       |
//! | `ready`       | process → host | none            | process ready to receive config  |
//! | `stdout`      | process → host | `data: bytes`   | terminal output                  |
//! | `stdin`       | host → process | `data: bytes`   | terminal input                   |
//! | `ioctl.set`   | host → process | control payload | out-of-band control (resize etc.)|
//! | `close`       | host → process | none            | host-initiated teardown          |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event names for the out-of-band control channel.
///
/// The transport's listener registry and its dispatch switch both key on
/// these constants so the two cannot drift apart.
pub mod events {
    /// Terminal control event (e.g. resize)
    pub const IOCTL_SET: &str = "ioctl.set";
    /// Host connection closed
    pub const CLOSE: &str = "close";
}

/// One-time run configuration delivered by the host.
///
/// The payload is an open key/value map; `auth_token` and `username` are
/// the conventional keys and get typed accessors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(flatten)]
    values: BTreeMap<String, Value>,
}

impl RunConfig {
    /// Empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a raw configuration value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Insert a configuration value (host side, tests).
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// The authentication token handed to the hosted process, if any.
    pub fn auth_token(&self) -> Option<&str> {
        self.get("auth_token").and_then(Value::as_str)
    }

    /// The username the process runs under, if any.
    pub fn username(&self) -> Option<&str> {
        self.get("username").and_then(Value::as_str)
    }
}

/// A discriminated message on the host connection.
///
/// Serialized with the discriminator in the `$` field; payload fields sit
/// beside it in the same object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$")]
pub enum HostMessage {
    /// One-time run configuration (host → process).
    #[serde(rename = "config")]
    Config {
        /// Arbitrary key/value configuration
        #[serde(flatten)]
        values: RunConfig,
    },

    /// Process signals it is ready to receive `config` (process → host).
    #[serde(rename = "ready")]
    Ready,

    /// Terminal output bytes (process → host).
    #[serde(rename = "stdout")]
    Stdout {
        /// Output payload
        data: Vec<u8>,
    },

    /// Terminal input bytes (host → process).
    #[serde(rename = "stdin")]
    Stdin {
        /// Input payload
        data: Vec<u8>,
    },

    /// Out-of-band terminal control event (host → process).
    #[serde(rename = "ioctl.set")]
    Ioctl {
        /// Control payload, opaque to the transport (e.g. `{rows, cols}`)
        data: Value,
    },

    /// Host-initiated teardown notification (host → process).
    ///
    /// This is a notification, not an error; the transport never raises
    /// it as a failure.
    #[serde(rename = "close")]
    Close,
}

impl HostMessage {
    /// The wire discriminator for this message.
    pub fn discriminator(&self) -> &'static str {
        match self {
            HostMessage::Config { .. } => "config",
            HostMessage::Ready => "ready",
            HostMessage::Stdout { .. } => "stdout",
            HostMessage::Stdin { .. } => "stdin",
            HostMessage::Ioctl { .. } => events::IOCTL_SET,
            HostMessage::Close => events::CLOSE,
        }
    }

    /// Encode for the host channel.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a message arriving from the host channel.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discriminator_on_the_wire() {
        let json = HostMessage::Ready.to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["$"], "ready");

        let json = HostMessage::Ioctl { data: json!({"rows": 24}) }
            .to_json()
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["$"], "ioctl.set");
    }

    #[test]
    fn test_stdin_round_trip() {
        let msg = HostMessage::Stdin {
            data: b"ls -la\n".to_vec(),
        };
        let back = HostMessage::from_json(&msg.to_json().unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_ioctl_payload_is_opaque() {
        let payload = json!({"rows": 50, "cols": 132});
        let msg = HostMessage::Ioctl {
            data: payload.clone(),
        };
        match HostMessage::from_json(&msg.to_json().unwrap()).unwrap() {
            HostMessage::Ioctl { data } => assert_eq!(data, payload),
            other => panic!("Expected ioctl, got {other:?}"),
        }
    }

    #[test]
    fn test_config_values_flatten() {
        let wire = r#"{"$":"config","auth_token":"tok-123","username":"alice"}"#;
        match HostMessage::from_json(wire).unwrap() {
            HostMessage::Config { values } => {
                assert_eq!(values.auth_token(), Some("tok-123"));
                assert_eq!(values.username(), Some("alice"));
                assert_eq!(values.get("missing"), None);
            }
            other => panic!("Expected config, got {other:?}"),
        }
    }

    #[test]
    fn test_close_and_ready_have_no_payload() {
        assert_eq!(HostMessage::Close.to_json().unwrap(), r#"{"$":"close"}"#);
        assert_eq!(HostMessage::Ready.to_json().unwrap(), r#"{"$":"ready"}"#);
    }

    #[test]
    fn test_discriminator_accessor_matches_wire() {
        let messages = [
            HostMessage::Config {
                values: RunConfig::new(),
            },
            HostMessage::Ready,
            HostMessage::Stdout { data: Vec::new() },
            HostMessage::Stdin { data: Vec::new() },
            HostMessage::Ioctl { data: Value::Null },
            HostMessage::Close,
        ];
        for msg in messages {
            let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
            assert_eq!(value["$"], msg.discriminator());
        }
    }
}
