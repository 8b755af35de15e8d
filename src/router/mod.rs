//! Message routing.
//!
//! The [`Router`] is shared by every connection and holds the topic registry.
//! Each connection gets its own [`Session`], which interprets that client's
//! envelopes, remembers the topics it joined and deregisters it from all of
//! them when the session ends.

pub mod session;

use std::sync::Arc;

use crate::connection::Connection;
use crate::registry::Registry;

pub use session::Session;

#[derive(Debug, Clone, Default)]
pub struct Router {
    registry: Arc<Registry>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Opens the routing session for a freshly accepted connection.
    pub fn session(&self, conn: Connection) -> Session {
        Session::new(conn, self.registry.clone())
    }
}
