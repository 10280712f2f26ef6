//! Crate-wide error type.
//!
//! Individual session failures never surface here: a dead or slow client is
//! handled (and logged) where it is detected. `RelayError` covers the
//! failures that abort an operation outright, such as an unusable
//! configuration or a socket that cannot be bound.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("websocket error: {0}")]
    Ws(#[from] tungstenite::Error),
}
