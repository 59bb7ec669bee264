//! route-dispatch server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌──────────┐    ┌────────────┐    ┌──────────┐    ┌─────────┐
//!     ──────────────────▶│   http   │───▶│  dispatch  │───▶│ routing  │───▶│ handler │
//!                        │  server  │    │ dispatcher │    │ matcher  │    │         │
//!     Client Response    └──────────┘    └─────┬──────┘    └──────────┘    └────┬────┘
//!     ◀──────────────────────────────────────────┘ value normalizer/codec ◀─────┘
//! ```
//!
//! Startup: config → logging/metrics → route registration → table → listener.

mod demo;

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_dispatch::config::{load_config, DispatchConfig};
use route_dispatch::dispatch::{Dispatcher, TagFilter};
use route_dispatch::lifecycle::signals;
use route_dispatch::observability::{logging, metrics};
use route_dispatch::routing::RouteRegistry;
use route_dispatch::HttpServer;

#[derive(Parser)]
#[command(name = "route-dispatch")]
#[command(about = "Serve a registered route table over HTTP", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory served by the sample file route.
    #[arg(long, default_value = ".")]
    files_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DispatchConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;
    tracing::info!("route-dispatch v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        excluded_routes = config.routes.excluded.len(),
        filter_enabled = config.filter.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Route table
    let mut registry = RouteRegistry::new();
    demo::register(&mut registry, cli.files_dir);
    registry.symbols(config.routes.symbols.iter().cloned());
    let table = registry.build(&config.routes.excluded)?;
    let symbols = registry.symbol_table();

    let mut dispatcher = Dispatcher::new(table, symbols);
    if let Some(filter) = TagFilter::from_config(&config.filter) {
        dispatcher = dispatcher.with_filter(filter);
    }

    // Listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(&config, dispatcher);
    server.run(listener, signals::wait_for_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
