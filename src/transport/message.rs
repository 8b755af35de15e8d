//! Wire format.
//!
//! Clients send JSON objects tagged by `type`. The relay only reads the few
//! fields it routes on; everything else in a published envelope is passed
//! through untouched, so the object is kept as an open JSON map rather than a
//! closed struct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::RelayError;

/// Operation selector carried in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Subscribe,
    Unsubscribe,
    Publish,
    Ping,
    Pong,
}

impl MessageKind {
    pub fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "subscribe" => Some(Self::Subscribe),
            "unsubscribe" => Some(Self::Unsubscribe),
            "publish" => Some(Self::Publish),
            "ping" => Some(Self::Ping),
            "pong" => Some(Self::Pong),
            _ => None,
        }
    }
}

/// A client envelope: any JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// Parses one frame. Anything that is not a JSON object is rejected.
    pub fn parse(raw: &[u8]) -> Result<Self, RelayError> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// `None` for a missing, non-string or unknown `type`.
    pub fn kind(&self) -> Option<MessageKind> {
        self.0
            .get("type")
            .and_then(Value::as_str)
            .and_then(MessageKind::from_type)
    }

    /// The string entries of `topics`; other entries are skipped, and a
    /// missing or non-array field yields nothing.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.0
            .get("topics")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// The publish target, if it is a non-empty string.
    pub fn topic(&self) -> Option<&str> {
        self.0
            .get("topic")
            .and_then(Value::as_str)
            .filter(|topic| !topic.is_empty())
    }

    pub fn clients(&self) -> Option<u64> {
        self.0.get("clients").and_then(Value::as_u64)
    }

    /// Overwrites `clients` with the observed subscriber count.
    pub fn set_clients(&mut self, count: usize) {
        self.0.insert("clients".to_string(), Value::from(count));
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn to_text(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

/// Messages the relay originates itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    Pong,
}

impl ServerMessage {
    pub fn to_text(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }
}
