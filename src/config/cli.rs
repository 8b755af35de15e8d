use std::path::PathBuf;

use clap::Parser;

use super::settings::Settings;

/// Command-line flags. Anything given here wins over file and environment.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sigrelay")]
#[command(about = "Signaling server for WebRTC communication")]
#[command(version)]
pub struct Args {
    /// Configuration file to load instead of `config/default`.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Host to listen on (e.g. localhost, 0.0.0.0).
    #[arg(long)]
    pub host: Option<String>,
    /// Port number to listen on.
    #[arg(long)]
    pub port: Option<u16>,
    /// Milliseconds between keepalive pings.
    #[arg(long)]
    pub ping_interval_ms: Option<u64>,
    /// Log level: error, warn, info, debug or trace.
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(interval) = self.ping_interval_ms {
            settings.liveness.ping_interval_ms = interval;
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
        settings
    }
}
