//! API relay middle tier.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                    API RELAY                     │
//!   POST /api/proxy      │  ┌────────┐   ┌────────────┐   ┌──────────────┐  │
//!   ─────────────────────┼─▶│  http  │──▶│   relay    │──▶│   backend    │──┼──▶ Backend
//!                        │  │ server │   │ validate + │   │ client (one  │  │    service
//!                        │  └────────┘   │ build body │   │ POST, auth)  │  │
//!                        │       ▲       └────────────┘   └──────┬───────┘  │
//!   Envelope             │  ┌────┴─────┐  ┌─────────────┐        │          │
//!   ◀────────────────────┼──│ envelope │◀─│  normalize  │◀───────┘          │
//!   {data|error, code}   │  └──────────┘  └─────────────┘                   │
//!                        │                                                  │
//!                        │   config · observability · lifecycle             │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_relay::config::load_config;
use api_relay::lifecycle::{signals, Shutdown};
use api_relay::observability::{logging, metrics};
use api_relay::HttpServer;

#[derive(Parser)]
#[command(name = "api-relay")]
#[command(about = "Relay that forwards normalized requests to a single backend", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("api-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.backend.base_url,
        api_prefix = %config.backend.api_prefix,
        request_timeout_secs = config.timeouts.request_secs,
        backend_timeout_secs = config.timeouts.backend_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address already validated by the loader.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
