//! # Chathub
//!
//! `chathub` is a minimalist, in-memory broadcast chat relay built with Rust.
//! Clients connect over WebSockets, submit text messages, and receive every
//! message submitted by any connected client, in the order the hub processes
//! them.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `hub`: The central component that owns the membership set and fans messages out to sessions.
//! - `session`: Represents one connected client's identity and outbound queue.
//! - `config`: Handles loading and managing server configuration.
//! - `transport`: Manages the WebSocket server, per-connection pumps, and static content.
//! - `utils`: Contains shared utilities, such as error handling and logging setup.

pub mod config;
pub mod hub;
pub mod session;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;
