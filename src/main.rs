//! api-relay
//!
//! A small HTTP relay built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                  API RELAY                    │
//!                     │                                               │
//!    Client Request   │  ┌────────┐   ┌────────┐   ┌──────────────┐  │
//!    ─────────────────┼─▶│  http  │──▶│ relay  │──▶│  forwarder   │──┼──▶ Backend
//!                     │  │ server │   │ routes │   │ (one call)   │  │
//!                     │  └────────┘   └────────┘   └──────┬───────┘  │
//!                     │                                    │          │
//!    Client Response  │  ┌──────────┐                      │          │
//!    ◀────────────────┼──│ response │◀─────────────────────┘          │
//!                     │  │ + CORS   │                                 │
//!                     │  └──────────┘                                 │
//!                     │                                               │
//!                     │  ┌─────────────────────────────────────────┐  │
//!                     │  │  config   observability   lifecycle     │  │
//!                     │  └─────────────────────────────────────────┘  │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_relay::config;
use api_relay::lifecycle::{signals, Shutdown};
use api_relay::observability::{logging, metrics};
use api_relay::HttpServer;

#[derive(Parser)]
#[command(name = "api-relay")]
#[command(about = "HTTP relay forwarding requests to a configured backend", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::default_config()?,
    };
    if let Some(listen) = cli.listen {
        config.listener.bind_address = listen;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!("api-relay v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin_mode = ?config.backend.origin_mode,
        origin_configured = config.backend.origin.is_some(),
        routes = config.routes.len(),
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(&config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
