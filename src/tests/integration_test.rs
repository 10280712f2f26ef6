//! End-to-end tests over real sockets: a hub, the WebSocket server, and
//! plain `tokio-tungstenite` clients talking to it.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::connect_async;
use tungstenite::protocol::Message as WsMessage;

use crate::config::Settings;
use crate::hub::Hub;
use crate::transport::websocket::start_websocket_server;

async fn start_relay(port: u16, static_dir: Option<&str>) {
    let mut settings = Settings::default();
    settings.server.port = port;
    if let Some(dir) = static_dir {
        settings.server.static_dir = dir.to_string();
    }

    let (hub, handle) = Hub::new(settings.hub.event_buffer);
    tokio::spawn(hub.run());

    let addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        let _ = start_websocket_server(&addr, handle, settings).await;
    });

    sleep(Duration::from_millis(300)).await;
}

async fn next_json<S>(ws: &mut S) -> serde_json::Value
where
    S: StreamExt<Item = Result<WsMessage, tungstenite::Error>> + Unpin,
{
    loop {
        let frame = timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("connection closed early")
            .expect("websocket error");
        if let WsMessage::Text(text) = frame {
            return serde_json::from_str(&text).expect("frame is not valid JSON");
        }
    }
}

#[tokio::test]
async fn integration_broadcast_reaches_sender_and_peer() {
    start_relay(9001, None).await;

    let (mut ws_alice, _) = connect_async("ws://127.0.0.1:9001/ws?username=alice")
        .await
        .expect("alice connects");
    let (mut ws_bob, _) = connect_async("ws://127.0.0.1:9001/ws?username=bob")
        .await
        .expect("bob connects");

    // Let both registrations reach the hub before the first broadcast.
    sleep(Duration::from_millis(100)).await;

    ws_alice
        .send(WsMessage::text(json!({ "text": "hi" }).to_string()))
        .await
        .unwrap();

    for ws in [&mut ws_alice, &mut ws_bob] {
        let received = next_json(ws).await;
        assert_eq!(received["username"], "alice");
        assert_eq!(received["text"], "hi");
        assert_ne!(received["time"], "");
    }
}

#[tokio::test]
async fn integration_missing_identity_defaults_to_anonymous() {
    start_relay(9002, None).await;

    let (mut ws, _) = connect_async("ws://127.0.0.1:9002/ws")
        .await
        .expect("client connects");

    ws.send(WsMessage::text(
        json!({ "username": "", "text": "yo" }).to_string(),
    ))
    .await
    .unwrap();

    let received = next_json(&mut ws).await;
    assert_eq!(received["username"], "Anonymous");
    assert_eq!(received["text"], "yo");
    assert_ne!(received["time"], "");
}

#[tokio::test]
async fn integration_non_upgrade_requests_get_static_files() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("index.html"), "<h1>chathub</h1>")
        .await
        .unwrap();
    start_relay(9003, dir.path().to_str()).await;

    let mut stream = TcpStream::connect("127.0.0.1:9003").await.unwrap();
    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let mut response = Vec::new();
    timeout(Duration::from_secs(2), stream.read_to_end(&mut response))
        .await
        .expect("timed out reading response")
        .unwrap();
    let response = String::from_utf8_lossy(&response);

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("text/html"));
    assert!(response.ends_with("<h1>chathub</h1>"));
}

#[tokio::test]
async fn integration_upgrade_on_unknown_path_is_rejected() {
    start_relay(9004, None).await;

    let result = connect_async("ws://127.0.0.1:9004/nope").await;
    assert!(result.is_err());
}
