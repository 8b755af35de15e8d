//! Keepalive for connections: ping on a fixed interval, close whoever fails
//! to answer before the next tick.

pub mod monitor;

pub use monitor::{LivenessMonitor, Tick};
