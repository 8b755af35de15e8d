//! The `transport` module carries the relay over the network: the JSON
//! envelope format, the WebSocket server that drives one routing session per
//! client, and the plain `okay` answer for non-upgrade HTTP requests on the
//! same port.

pub mod message;
pub mod websocket;

pub use message::{Envelope, MessageKind, ServerMessage};
pub use websocket::{RelayState, app, serve, start_websocket_server};

#[cfg(test)]
mod tests;
