//! WebSocket transport
//!
//! This file implements the server side of the relay. Responsibilities:
//! - Accept TCP connections and route them: WebSocket upgrades on the
//!   `/ws` path become chat sessions, everything else goes to the static
//!   content handler
//! - Resolve a display identity from the `username` query parameter
//! - Run the two per-session pumps: inbound (socket -> hub) and outbound
//!   (session queue -> socket)
//!
//! Origin note: the handshake accepts any origin. That is a deliberate
//! development-mode relaxation, not a production posture.

use std::path::Path;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{WebSocketStream, accept_hdr_async};
use tracing::{debug, error, info, warn};
use tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tungstenite::http::StatusCode;
use tungstenite::protocol::Message as WsMessage;

use crate::config::Settings;
use crate::hub::{HubHandle, Message};
use crate::session::{SessionHandle, SessionId};
use crate::transport::static_files;
use crate::utils::RelayError;

/// Display identity used when a client connects without a `username`
/// query parameter (or with an empty one).
pub const DEFAULT_USERNAME: &str = "Anonymous";

/// The single upgrade endpoint path.
pub const WS_PATH: &str = "/ws";

/// How much of the request head is peeked to decide between an upgrade and
/// a static request. Browser upgrade requests fit well within this.
const PEEK_WINDOW: usize = 2048;

/// Binds `addr` and serves connections until the listener fails.
///
/// Each accepted connection gets its own task; a connection failing in any
/// way never affects the listener or other sessions.
pub async fn start_websocket_server(
    addr: &str,
    hub: HubHandle,
    settings: Settings,
) -> Result<(), RelayError> {
    let listener = TcpListener::bind(addr).await?;

    info!("listening on http://{addr} (chat endpoint at ws://{addr}{WS_PATH})");

    while let Ok((stream, peer)) = listener.accept().await {
        let hub = hub.clone();
        let settings = settings.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, hub, settings).await {
                warn!("connection from {peer} closed with error: {e}");
            }
        });
    }

    Ok(())
}

/// Routes one freshly-accepted connection.
///
/// The request head is peeked (not consumed) so that a WebSocket upgrade
/// can still be handed to the handshake intact; anything that is not an
/// upgrade is answered by the static content handler.
async fn handle_connection(
    stream: TcpStream,
    hub: HubHandle,
    settings: Settings,
) -> Result<(), RelayError> {
    let mut head = [0u8; PEEK_WINDOW];
    let n = stream.peek(&mut head).await?;
    if !is_upgrade_request(&head[..n]) {
        return static_files::serve(stream, Path::new(&settings.server.static_dir))
            .await
            .map_err(RelayError::from);
    }

    let mut username = DEFAULT_USERNAME.to_string();
    let ws_stream = accept_hdr_async(stream, |req: &Request, resp: Response| {
        if req.uri().path() != WS_PATH {
            let mut not_found = ErrorResponse::new(Some("not found".to_string()));
            *not_found.status_mut() = StatusCode::NOT_FOUND;
            return Err(not_found);
        }
        if let Some(name) = username_from_query(req.uri().query()) {
            username = name;
        }
        Ok(resp)
    })
    .await?;

    let (ws_sender, mut ws_receiver) = ws_stream.split();

    // The hub keeps the only sender; the write pump owns the receiver.
    let (tx, rx) = mpsc::channel::<Message>(settings.hub.session_buffer);
    let session = SessionHandle::new(username.clone(), tx);
    let session_id = session.id.clone();
    hub.register(session).await;

    // Outbound first, then inbound on this task, as in the accept order of
    // the original pumps. No correctness dependency either way.
    tokio::spawn(write_pump(rx, ws_sender, session_id.clone()));

    while let Some(Ok(frame)) = ws_receiver.next().await {
        match frame {
            WsMessage::Text(text) => {
                let mut message: Message = match serde_json::from_str(&text) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("undecodable frame from {username}: {e}");
                        break;
                    }
                };
                message.stamp(&username);
                debug!("message from {}: {}", message.username, message.text);
                hub.broadcast(message).await;
            }
            // The relay speaks JSON text frames only; a binary frame is as
            // terminal as a malformed one.
            WsMessage::Binary(_) => {
                warn!("binary frame from {username}, disconnecting");
                break;
            }
            WsMessage::Close(_) => break,
            // Ping/pong are answered by tungstenite itself.
            _ => {}
        }
    }

    // Unconditional: late or duplicate unregistration is a hub no-op.
    hub.unregister(session_id).await;
    Ok(())
}

/// Drains one session's outbound queue onto the socket, in FIFO order.
///
/// Terminates when the hub closes the queue (a Close frame is flushed to
/// the peer first) or when a write fails. A failed write does NOT
/// unregister the session here; the read pump's termination or the next
/// broadcast against the closed queue heals the membership set.
async fn write_pump(
    mut rx: mpsc::Receiver<Message>,
    mut ws_sender: SplitSink<WebSocketStream<TcpStream>, WsMessage>,
    session_id: SessionId,
) {
    while let Some(message) = rx.recv().await {
        let text = match serde_json::to_string(&message) {
            Ok(json) => json,
            Err(e) => {
                error!("failed to serialize message: {e}");
                continue;
            }
        };
        if let Err(e) = ws_sender.send(WsMessage::text(text)).await {
            debug!("write to {session_id} failed: {e}");
            return;
        }
    }

    // Queue closed by the hub: notify the peer before releasing the socket.
    let _ = ws_sender.send(WsMessage::Close(None)).await;
    debug!("send loop closed for {session_id}");
}

/// Whether the peeked request head is a WebSocket upgrade.
pub(crate) fn is_upgrade_request(head: &[u8]) -> bool {
    String::from_utf8_lossy(head)
        .to_ascii_lowercase()
        .contains("upgrade: websocket")
}

/// Extracts a non-empty, percent-decoded `username` query value.
pub(crate) fn username_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "username")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
