//! The `session` module defines the representation of one connected client.
//!
//! It provides the `SessionHandle` struct, which pairs a connection-unique
//! identifier and display name with the sending half of that client's
//! bounded outbound queue.

pub mod handle;
pub use handle::{SessionHandle, SessionId};
