//! The `transport` module is responsible for handling network communication
//! with clients.
//!
//! It implements the WebSocket server (handshake, identity resolution, and
//! the per-connection read/write pumps that bridge the socket to the hub)
//! and the directory-backed static content handler that answers every
//! non-upgrade request.

pub mod static_files;
pub mod websocket;

#[cfg(test)]
mod tests;
