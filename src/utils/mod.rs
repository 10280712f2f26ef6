//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `chathub` application.
//!
//! This module centralizes reusable components, such as the crate-wide error
//! type and tracing setup, to promote code consistency and reduce duplication.

pub mod error;
pub mod logging;

pub use error::RelayError;

#[cfg(test)]
mod tests {
    use super::logging;

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic
        logging::init("info");
        logging::init("debug");
        logging::init("warn");
    }
}
