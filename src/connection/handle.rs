use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::ws::Message as WsMessage;
use tokio::sync::{mpsc::UnboundedSender, watch};
use uuid::Uuid;

pub type ConnectionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Open,
    Closed,
}

/// Handle to one client session.
///
/// Clones share the same session; the registry stores clones so a publish can
/// reach the client from any other connection's task.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<Inner>,
}

struct Inner {
    id: ConnectionId,
    sender: UnboundedSender<WsMessage>,
    closed: watch::Sender<bool>,
    pong_received: AtomicBool,
}

impl Connection {
    /// Create an open connection whose outbound messages go to `sender`.
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                sender,
                closed,
                pong_received: AtomicBool::new(true),
            }),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.inner.id
    }

    pub fn ready_state(&self) -> ReadyState {
        if *self.inner.closed.borrow() {
            ReadyState::Closed
        } else {
            ReadyState::Open
        }
    }

    pub fn is_closed(&self) -> bool {
        self.ready_state() == ReadyState::Closed
    }

    /// Queue `message` for delivery.
    ///
    /// Sending on a connection that is no longer open, or whose writer has gone
    /// away, closes it instead. Returns whether the message was queued.
    pub fn send(&self, message: WsMessage) -> bool {
        if self.is_closed() {
            self.close();
            return false;
        }
        if self.inner.sender.send(message).is_err() {
            tracing::debug!(conn = %self.id(), "outbound queue gone, closing");
            self.close();
            return false;
        }
        true
    }

    pub fn send_text(&self, text: impl Into<String>) -> bool {
        let text: String = text.into();
        self.send(WsMessage::Text(text.into()))
    }

    /// Queue a transport-level ping. A failure closes the connection.
    pub fn ping(&self) -> bool {
        self.send(WsMessage::Ping(Default::default()))
    }

    /// Close the session. Only the first call has any effect; it returns `true`.
    pub fn close(&self) -> bool {
        let first = self.inner.closed.send_if_modified(|closed| {
            if *closed {
                false
            } else {
                *closed = true;
                true
            }
        });
        if first {
            tracing::debug!(conn = %self.id(), "connection closed");
        }
        first
    }

    /// Resolves once the connection is closed, immediately if it already is.
    pub async fn closed(&self) {
        let mut rx = self.inner.closed.subscribe();
        // the sender lives in `inner`, so this only returns once closed
        let _ = rx.wait_for(|closed| *closed).await;
    }

    pub fn record_pong(&self) {
        self.inner.pong_received.store(true, Ordering::Release);
    }

    /// Clear the pong flag, returning whether a pong had arrived since the
    /// last call.
    pub(crate) fn take_pong(&self) -> bool {
        self.inner.pong_received.swap(false, Ordering::AcqRel)
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Connection {}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.inner.id)
            .field("state", &self.ready_state())
            .finish()
    }
}
