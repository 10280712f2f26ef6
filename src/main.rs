//! Binary entry point for the relay.
//!
//! Wires the pieces together: configuration, logging, the hub event loop,
//! and the WebSocket server, then runs until the listener fails or a
//! shutdown signal arrives.

use chathub::config::load_config;
use chathub::hub::Hub;
use chathub::transport::websocket::start_websocket_server;
use chathub::utils::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("info");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {e}");
            return;
        }
    };
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let (hub, handle) = Hub::new(config.hub.event_buffer);
    tokio::spawn(hub.run());

    tokio::select! {
        result = start_websocket_server(&addr, handle, config.clone()) => {
            match result {
                Ok(()) => error!("server exited unexpectedly"),
                Err(e) => error!("server failed: {e}"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, exiting");
        }
    }
}
