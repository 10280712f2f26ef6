/// Initialize tracing for the relay.
///
/// The level comes from the `CHATHUB_LOG` environment variable when set,
/// falling back to `default_level` otherwise.
pub fn init(default_level: &str) {
    let level = std::env::var("CHATHUB_LOG").unwrap_or_else(|_| default_level.to_string());
    let level = match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" | "warning" => tracing::Level::WARN,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    };

    // try_init so tests can call this repeatedly without panicking
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
