use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for both the server and the hub.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub hub: HubSettings,
}

/// Configuration settings for the server.
///
/// Defines the bind address and where static assets are served from.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

/// Configuration settings for the hub.
///
/// `session_buffer` bounds each session's outbound queue; a session that
/// lets it fill up is evicted. `event_buffer` bounds the hub's shared event
/// channel.
#[derive(Debug, Deserialize, Clone)]
pub struct HubSettings {
    pub session_buffer: usize,
    pub event_buffer: usize,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub hub: Option<PartialHubSettings>,
}

/// Partial server settings.
///
/// Used when loading server configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<String>,
}

/// Partial hub settings.
///
/// Used for hub configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialHubSettings {
    pub session_buffer: Option<usize>,
    pub event_buffer: Option<usize>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                static_dir: "./static".to_string(),
            },
            hub: HubSettings {
                session_buffer: 256,
                event_buffer: 64,
            },
        }
    }
}
