//! # sigrelay
//!
//! `sigrelay` is a signaling relay for WebRTC peers. Clients connect over
//! WebSocket, subscribe to arbitrary topic names and publish small JSON
//! envelopes (session descriptions, ICE candidates) that the relay fans out
//! to every current subscriber of the topic without looking inside them.
//! Nothing is stored: topics exist only while somebody is subscribed.
//!
//! ## Core Modules
//!
//! - `connection`: the handle for one client session (send, close, ping/pong).
//! - `liveness`: per-connection keepalive that closes unresponsive clients.
//! - `registry`: the shared topic → subscribers table.
//! - `router`: interprets client envelopes and performs publish fan-out.
//! - `transport`: wire format, WebSocket server and the plain HTTP `okay` answer.
//! - `config`: settings from defaults, file, environment and command line.
//! - `utils`: error type and logging setup.

pub mod config;
pub mod connection;
pub mod liveness;
pub mod registry;
pub mod router;
pub mod transport;
pub mod utils;

pub use connection::Connection;
pub use liveness::LivenessMonitor;
pub use registry::Registry;
pub use router::Router;
pub use utils::RelayError;
