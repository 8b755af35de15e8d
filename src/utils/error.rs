//! Error type shared by the relay.
//!
//! Errors never cross a connection boundary: whatever goes wrong while serving
//! one client is logged and ends (at most) that client's session. Only bind and
//! configuration failures reach the binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The payload was not a JSON object.
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("websocket error: {0}")]
    WebSocket(#[from] axum::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A setting parsed fine but holds a value the relay cannot run with.
    #[error("invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}
