use tokio::sync::mpsc;
use uuid::Uuid;

use crate::hub::message::Message;

/// Connection-unique identifier for a session.
///
/// Distinct from the display name: two clients both named "alice" are two
/// sessions with two ids.
pub type SessionId = String;

/// The hub-side view of one connected client.
///
/// Holds the *only* sender for the session's bounded outbound queue, so
/// dropping the handle (by removing it from the hub's membership map)
/// closes the queue and tells the write pump to shut down.
#[derive(Debug)]
pub struct SessionHandle {
    /// Unique identifier for the session.
    pub id: SessionId,

    /// Display name resolved at handshake time.
    pub username: String,

    /// Bounded queue of messages awaiting delivery to this client.
    pub sender: mpsc::Sender<Message>,
}

impl SessionHandle {
    pub fn new(username: impl Into<String>, sender: mpsc::Sender<Message>) -> Self {
        Self {
            id: format!("session-{}", Uuid::new_v4()),
            username: username.into(),
            sender,
        }
    }
}
