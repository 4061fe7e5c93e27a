//! dynlog server.
//!
//! Serves the log level endpoint and keeps the level in sync with the
//! configuration file.
//!
//! ```text
//!   operator ── PUT /loglevel ──▶ admin server ──▶ AtomicLevel ◀── config watcher
//!                                                     │
//!                               ┌─────────────────────┼─────────────────────┐
//!                               ▼                     ▼                     ▼
//!                        structured Logger    tracing diagnostics     global forwarders
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use dynlog::config::watcher::{apply_level_updates, ConfigWatcher};
use dynlog::config::{load_config, ServerConfig};
use dynlog::lifecycle::signals::shutdown_on_signal;
use dynlog::logger::{field, LoggerBuilder};
use dynlog::observability::{logging, metrics};
use dynlog::{AdminServer, Shutdown};

#[derive(Parser)]
#[command(name = "dynlog")]
#[command(about = "Structured logging with an HTTP-controlled log level", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    let logger = LoggerBuilder::from_config(config.logging.clone()).build_global()?;
    let level = logger.level().clone();

    logging::init_tracing(&level)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "dynlog starting");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }
    metrics::sync_level_gauge(&level);

    // The watcher handle must outlive the server or events stop.
    let _watcher = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            tokio::spawn(apply_level_updates(updates, level.clone()));
            Some(watcher.run()?)
        }
        None => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    logger.info(
        "level endpoint ready",
        &[
            field("address", listener.local_addr()?.to_string()),
            field("path", config.level_endpoint.path.clone()),
            field("level", level.get().as_str()),
        ],
    );

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let server = AdminServer::new(config, level);
    server.run(listener, shutdown.subscribe()).await?;

    logger.sync()?;
    tracing::info!("Shutdown complete");
    Ok(())
}
