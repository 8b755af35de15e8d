//! The `connection` module defines the handle the rest of the relay uses to
//! talk to one connected client.
//!
//! A [`Connection`] owns nothing of the socket itself: it feeds an outbound
//! queue drained by the transport's writer task, tracks whether the session is
//! still open and records keepalive pongs.

pub mod handle;

pub use handle::{Connection, ConnectionId, ReadyState};
