use axum::extract::ws::Message as WsMessage;
use serde_json::json;
use tokio::sync::mpsc;

use super::message::{Envelope, MessageKind, ServerMessage};
use super::websocket::write_loop;
use crate::connection::Connection;
use crate::utils::RelayError;

fn envelope(value: serde_json::Value) -> Envelope {
    Envelope::parse(value.to_string().as_bytes()).unwrap()
}

#[test]
fn test_kind_selector() {
    assert_eq!(
        envelope(json!({ "type": "subscribe" })).kind(),
        Some(MessageKind::Subscribe)
    );
    assert_eq!(
        envelope(json!({ "type": "unsubscribe" })).kind(),
        Some(MessageKind::Unsubscribe)
    );
    assert_eq!(
        envelope(json!({ "type": "publish" })).kind(),
        Some(MessageKind::Publish)
    );
    assert_eq!(envelope(json!({ "type": "ping" })).kind(), Some(MessageKind::Ping));
    assert_eq!(envelope(json!({ "type": "pong" })).kind(), Some(MessageKind::Pong));
    assert_eq!(envelope(json!({ "type": "shout" })).kind(), None);
    assert_eq!(envelope(json!({ "type": 1 })).kind(), None);
    assert_eq!(envelope(json!({})).kind(), None);
}

#[test]
fn test_parse_rejects_non_objects() {
    assert!(matches!(
        Envelope::parse(b"not json"),
        Err(RelayError::Malformed(_))
    ));
    assert!(Envelope::parse(b"[1,2,3]").is_err());
    assert!(Envelope::parse(b"\"subscribe\"").is_err());
    assert!(Envelope::parse(b"null").is_err());
}

#[test]
fn test_topics_skips_non_strings() {
    let env = envelope(json!({
        "type": "subscribe",
        "topics": ["a", 1, null, "b", { "c": true }]
    }));
    assert_eq!(env.topics().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_topics_missing_or_not_array() {
    assert_eq!(envelope(json!({ "type": "subscribe" })).topics().count(), 0);
    assert_eq!(
        envelope(json!({ "type": "subscribe", "topics": "a" }))
            .topics()
            .count(),
        0
    );
}

#[test]
fn test_topic_requires_non_empty_string() {
    assert_eq!(envelope(json!({ "topic": "room" })).topic(), Some("room"));
    assert_eq!(envelope(json!({ "topic": "" })).topic(), None);
    assert_eq!(envelope(json!({ "topic": 7 })).topic(), None);
    assert_eq!(envelope(json!({})).topic(), None);
}

#[test]
fn test_set_clients_overwrites_and_keeps_other_fields() {
    let mut env = envelope(json!({
        "type": "publish",
        "topic": "room",
        "clients": 999,
        "data": { "sdp": "v=0" }
    }));
    env.set_clients(2);

    let relayed: serde_json::Value = serde_json::from_str(&env.to_text().unwrap()).unwrap();
    assert_eq!(
        relayed,
        json!({
            "type": "publish",
            "topic": "room",
            "clients": 2,
            "data": { "sdp": "v=0" }
        })
    );
    assert_eq!(env.clients(), Some(2));
}

#[test]
fn test_pong_wire_format() {
    assert_eq!(ServerMessage::Pong.to_text().unwrap(), r#"{"type":"pong"}"#);
}

fn texts(sent: &[WsMessage]) -> Vec<&str> {
    sent.iter()
        .map(|msg| match msg {
            WsMessage::Text(text) => text.as_str(),
            other => panic!("Expected a text message, got {other:?}"),
        })
        .collect()
}

#[tokio::test]
async fn test_writer_flushes_messages_queued_before_close() {
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let conn = Connection::new(tx);
    assert!(conn.send_text("one"));
    assert!(conn.send_text("two"));
    assert!(conn.send_text("three"));
    conn.close();
    assert!(!conn.send_text("late"));

    let mut sent: Vec<WsMessage> = Vec::new();
    write_loop(&mut sent, rx, conn).await;

    assert_eq!(texts(&sent), vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_writer_stops_when_closed_while_running() {
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let conn = Connection::new(tx);

    let writer = tokio::spawn({
        let conn = conn.clone();
        async move {
            let mut sent: Vec<WsMessage> = Vec::new();
            write_loop(&mut sent, rx, conn).await;
            sent
        }
    });

    assert!(conn.send_text("hello"));
    conn.close();

    let sent = writer.await.unwrap();
    assert_eq!(texts(&sent), vec!["hello"]);
}
