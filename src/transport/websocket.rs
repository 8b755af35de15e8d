//! WebSocket transport
//!
//! One axum router serves the relay port. Every request lands on the same
//! handler: a WebSocket upgrade becomes a relay session, anything else is
//! answered with a plain `okay` for load balancers and uptime checks.
//!
//! Each upgraded client gets:
//! - a [`Connection`] handle fed by an unbounded outbound queue
//! - a writer task draining that queue into the socket
//! - a liveness task pinging it on a fixed interval
//! - a routing [`Session`](crate::router::Session) driven by the reader loop
//!
//! Whatever ends the session (client close, socket error, failed write,
//! missed pong) the reader loop tears the session down exactly once.

use std::fmt::Display;
use std::net::SocketAddr;

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::connection::Connection;
use crate::liveness::LivenessMonitor;
use crate::router::Router;
use crate::utils::RelayError;

/// What every request handler needs.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub router: Router,
    pub liveness: LivenessMonitor,
}

/// Builds the HTTP application. Any method and path is accepted.
pub fn app(router: Router, liveness: LivenessMonitor) -> axum::Router {
    axum::Router::new()
        .fallback(relay_handler)
        .with_state(RelayState { router, liveness })
}

/// Binds `addr` and serves until the listener fails.
pub async fn start_websocket_server(
    addr: &str,
    router: Router,
    liveness: LivenessMonitor,
) -> Result<(), RelayError> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, router, liveness).await
}

/// Serves the relay on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    liveness: LivenessMonitor,
) -> Result<(), RelayError> {
    info!("signaling relay listening on ws://{}", listener.local_addr()?);

    let app = app(router, liveness);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

async fn relay_handler(
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<RelayState>,
) -> Response {
    match upgrade {
        Ok(ws) => ws
            .on_failed_upgrade(move |e| debug!("upgrade from {peer} failed: {e}"))
            .on_upgrade(move |socket| handle_socket(socket, peer, state)),
        Err(_) => {
            debug!("answering plain http request from {peer}");
            ([(header::CONTENT_TYPE, "text/plain")], "okay").into_response()
        }
    }
}

/// Drains the outbound queue into `sink` until the connection closes, then
/// flushes whatever was still queued and sends the close frame.
pub(crate) async fn write_loop<S>(
    mut sink: S,
    mut rx: mpsc::UnboundedReceiver<WsMessage>,
    conn: Connection,
) where
    S: Sink<WsMessage> + Unpin,
    S::Error: Display,
{
    let mut writable = true;
    loop {
        tokio::select! {
            msg = rx.recv() => {
                let Some(msg) = msg else { break };
                if let Err(e) = sink.send(msg).await {
                    debug!(conn = %conn.id(), "failed to write: {e}");
                    writable = false;
                    break;
                }
            }
            _ = conn.closed() => break,
        }
    }
    conn.close();
    // a closed handle refuses new sends, so this only flushes what was queued
    // before the close
    while writable {
        let Ok(msg) = rx.try_recv() else { break };
        writable = sink.send(msg).await.is_ok();
    }
    let _ = sink.close().await;
}

async fn handle_socket(socket: WebSocket, peer: SocketAddr, state: RelayState) {
    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let conn = Connection::new(tx);
    debug!(conn = %conn.id(), "accepted {peer}");

    let monitor = state.liveness.spawn(conn.clone());

    // relay → client
    let writer = tokio::spawn(write_loop(ws_sender, rx, conn.clone()));

    // client → relay
    let mut session = state.router.session(conn.clone());
    let result = loop {
        tokio::select! {
            frame = ws_receiver.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => session.handle_frame(text.as_bytes()),
                Some(Ok(WsMessage::Binary(data))) => session.handle_frame(&data),
                Some(Ok(WsMessage::Pong(_))) => conn.record_pong(),
                Some(Ok(WsMessage::Close(_))) | None => break Ok(()),
                // pings are answered by the websocket layer itself
                Some(Ok(WsMessage::Ping(_))) => {}
                Some(Err(e)) => break Err(RelayError::WebSocket(e)),
            },
            _ = conn.closed() => break Ok(()),
        }
    };

    conn.close();
    session.teardown();
    monitor.abort();
    let _ = writer.await;

    match result {
        Ok(()) => debug!(conn = %conn.id(), "session finished"),
        Err(e) => debug!(conn = %conn.id(), "session ended: {e}"),
    }
}
