use chrono::Local;
use serde::{Deserialize, Serialize};

/// Represents one chat message relayed through the hub.
///
/// A message carries the sender's display name, the text body, and a
/// wall-clock timestamp assigned when the relay received it. All fields are
/// defaulted on deserialization, so a client may send `{"text": "hi"}` and
/// let the session fill in the rest.
///
/// This structure is used for serialization to and from JSON for
/// communication over WebSocket: one message per text frame.
///
/// # Fields
///
/// - `username` - Display name of the sender. Stamped with the session's
///   bound identity when the client leaves it empty.
/// - `text` - The message body.
/// - `time` - Receipt time in `HH:MM:SS` local time. Never client-supplied;
///   overwritten by [`Message::stamp`] before broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub time: String,
}

impl Message {
    /// Assigns the receipt timestamp and fills in a missing sender identity.
    ///
    /// Called by the inbound pump exactly once, after decoding and before
    /// the message is handed to the hub. Whatever the client put in `time`
    /// is discarded.
    pub fn stamp(&mut self, fallback_username: &str) {
        self.time = Local::now().format("%H:%M:%S").to_string();
        if self.username.is_empty() {
            self.username = fallback_username.to_string();
        }
    }
}
