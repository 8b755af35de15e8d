//! The topic registry: which connections are subscribed to which topic names.
//!
//! Topics are created on first subscribe and dropped the moment their last
//! subscriber leaves, so the registry never holds more entries than there are
//! live subscriptions.

pub mod engine;
pub mod topic;

pub use engine::Registry;
pub use topic::Topic;
