//! The `hub` module is the heart of the relay.
//!
//! It owns the set of connected sessions and serializes every membership
//! change and broadcast through a single event loop, so the membership set
//! never needs a lock.

pub mod engine;
pub mod message;

pub use engine::{Hub, HubEvent, HubHandle};
pub use message::Message;
