/// Installs the relay's stdout log subscriber at `level` (`logging.level` in
/// the settings, or `--log-level`).
///
/// Per-connection events carry the connection id as a `conn` field, so the
/// target column is left out. A second call keeps the first subscriber.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .try_init();
}

/// Unknown names log at `info` rather than failing startup.
pub(crate) fn parse_level(level: &str) -> tracing::Level {
    match level.trim().to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" | "warning" => tracing::Level::WARN,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    }
}
