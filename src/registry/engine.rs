use dashmap::DashMap;

use crate::connection::{Connection, ConnectionId};
use crate::registry::topic::Topic;

/// Concurrent topic name → subscribers table.
///
/// Each operation locks only the shard holding the topic, so connections
/// working on different topics do not contend. All mutation goes through the
/// methods below; an empty topic is never left behind.
#[derive(Debug, Default)]
pub struct Registry {
    topics: DashMap<String, Topic>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `conn` to `name`, creating the topic if needed.
    ///
    /// Returns `false` when `conn` was already a subscriber.
    pub fn join_or_create(&self, name: &str, conn: &Connection) -> bool {
        self.topics
            .entry(name.to_string())
            .or_insert_with(|| Topic::new(name))
            .subscribe(conn.clone())
    }

    /// Removes `id` from `name` and drops the topic if it is now empty.
    ///
    /// Unknown topics and non-members are ignored. Returns whether a
    /// subscription was removed.
    pub fn leave(&self, name: &str, id: &ConnectionId) -> bool {
        let removed = {
            let Some(mut topic) = self.topics.get_mut(name) else {
                return false;
            };
            topic.unsubscribe(id)
        };
        // the shard guard must be released before remove_if takes it again;
        // a concurrent join in between leaves the topic non-empty and kept
        self.topics.remove_if(name, |_, topic| topic.is_empty());
        removed
    }

    /// Snapshot of the subscribers of `name`, or `None` if nobody is
    /// subscribed.
    pub fn lookup(&self, name: &str) -> Option<Vec<Connection>> {
        self.topics
            .get(name)
            .map(|topic| topic.subscribers().cloned().collect())
    }

    pub fn contains_topic(&self, name: &str) -> bool {
        self.topics.contains_key(name)
    }

    pub fn is_subscribed(&self, name: &str, id: &ConnectionId) -> bool {
        self.topics
            .get(name)
            .is_some_and(|topic| topic.contains(id))
    }

    pub fn subscriber_count(&self, name: &str) -> usize {
        self.topics.get(name).map_or(0, |topic| topic.len())
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn topic_names(&self) -> Vec<String> {
        self.topics.iter().map(|entry| entry.key().clone()).collect()
    }
}
