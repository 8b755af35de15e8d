use std::collections::HashMap;

use crate::connection::{Connection, ConnectionId};

/// A named topic and the connections currently subscribed to it.
#[derive(Debug)]
pub struct Topic {
    pub name: String,
    subscribers: HashMap<ConnectionId, Connection>,
}

impl Topic {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscribers: HashMap::new(),
        }
    }

    /// Adds `conn`; returns `false` if it was already subscribed.
    pub fn subscribe(&mut self, conn: Connection) -> bool {
        self.subscribers.insert(conn.id(), conn).is_none()
    }

    /// Removes the subscriber; returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: &ConnectionId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.subscribers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn subscribers(&self) -> impl Iterator<Item = &Connection> {
        self.subscribers.values()
    }
}
