use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::ws::Message as WsMessage;
use tracing::{debug, trace, warn};

use crate::connection::Connection;
use crate::registry::Registry;
use crate::transport::message::{Envelope, MessageKind, ServerMessage};

/// Per-connection routing state.
///
/// The joined set mirrors the registry: a topic is in it exactly when the
/// registry lists this connection under that topic.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
    registry: Arc<Registry>,
    joined: HashSet<String>,
}

impl Session {
    pub(crate) fn new(conn: Connection, registry: Arc<Registry>) -> Self {
        Self {
            conn,
            registry,
            joined: HashSet::new(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn joined_topics(&self) -> &HashSet<String> {
        &self.joined
    }

    /// Handles one raw frame from the client.
    ///
    /// A frame that does not parse is logged and dropped; the connection
    /// stays open.
    pub fn handle_frame(&mut self, raw: &[u8]) {
        if self.conn.is_closed() {
            return;
        }
        match Envelope::parse(raw) {
            Ok(envelope) => self.dispatch(envelope),
            Err(err) => {
                warn!(
                    conn = %self.conn.id(),
                    "dropping malformed message: {err} | {}",
                    String::from_utf8_lossy(raw).chars().take(100).collect::<String>()
                );
            }
        }
    }

    pub fn dispatch(&mut self, envelope: Envelope) {
        if self.conn.is_closed() {
            return;
        }
        match envelope.kind() {
            Some(MessageKind::Subscribe) => self.subscribe(&envelope),
            Some(MessageKind::Unsubscribe) => self.unsubscribe(&envelope),
            Some(MessageKind::Publish) => self.publish(envelope),
            Some(MessageKind::Ping) => self.pong(),
            Some(MessageKind::Pong) | None => {
                trace!(conn = %self.conn.id(), "ignoring envelope without a handled type");
            }
        }
    }

    fn subscribe(&mut self, envelope: &Envelope) {
        for name in envelope.topics() {
            self.registry.join_or_create(name, &self.conn);
            self.joined.insert(name.to_string());
            debug!(conn = %self.conn.id(), topic = %name, "subscribed");
        }
    }

    fn unsubscribe(&mut self, envelope: &Envelope) {
        for name in envelope.topics() {
            self.registry.leave(name, &self.conn.id());
            self.joined.remove(name);
            debug!(conn = %self.conn.id(), topic = %name, "unsubscribed");
        }
    }

    /// Fans the envelope out to every current subscriber of its topic,
    /// the sender included when it is one of them.
    fn publish(&self, mut envelope: Envelope) {
        let Some(topic) = envelope.topic().map(str::to_string) else {
            trace!(conn = %self.conn.id(), "publish without topic");
            return;
        };
        let Some(receivers) = self.registry.lookup(&topic) else {
            trace!(conn = %self.conn.id(), topic = %topic, "publish to topic without subscribers");
            return;
        };

        envelope.set_clients(receivers.len());
        let text = match envelope.to_text() {
            Ok(text) => text,
            Err(err) => {
                warn!(conn = %self.conn.id(), "failed to serialize envelope: {err}");
                return;
            }
        };

        let message = WsMessage::Text(text.into());
        for receiver in &receivers {
            receiver.send(message.clone());
        }
        debug!(
            conn = %self.conn.id(),
            topic = %topic,
            clients = receivers.len(),
            "published"
        );
    }

    fn pong(&self) {
        match ServerMessage::Pong.to_text() {
            Ok(text) => {
                self.conn.send_text(text);
            }
            Err(err) => warn!("failed to serialize pong: {err}"),
        }
    }

    /// Deregisters the connection from every topic it joined.
    ///
    /// Safe to call more than once; later calls find nothing to do.
    pub fn teardown(&mut self) {
        if self.joined.is_empty() {
            return;
        }
        let id = self.conn.id();
        for name in self.joined.drain() {
            self.registry.leave(&name, &id);
        }
        debug!(conn = %id, "left all topics");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}
