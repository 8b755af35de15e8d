//! Command-line entry point for the signaling relay.

use std::time::Duration;

use clap::Parser;
use sigrelay::config::{Args, Settings, resolve};
use sigrelay::transport::start_websocket_server;
use sigrelay::utils::logging;
use sigrelay::{LivenessMonitor, RelayError, Router};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let settings = match resolve(&args) {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("{e}");
            std::process::exit(2);
        }
    };

    logging::init(&settings.logging.level);
    info!("running with {settings:?}");

    if let Err(e) = run_server(settings).await {
        error!("server failed: {e}");
        std::process::exit(1);
    }
}

async fn run_server(settings: Settings) -> Result<(), RelayError> {
    let addr = settings.listen_addr();
    let router = Router::new();
    let liveness = LivenessMonitor::new(Duration::from_millis(
        settings.liveness.ping_interval_ms,
    ));

    tokio::select! {
        result = start_websocket_server(&addr, router, liveness) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, exiting");
            Ok(())
        }
    }
}
