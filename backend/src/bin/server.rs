//! GAS Relay HTTP Server Binary
//!
//! Entry point for the relay. It loads configuration, builds the upstream
//! client, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! GAS_API_URL=https://script.google.com/macros/s/<id>/exec \
//!   cargo run --bin gas-relay-server
//! ```
//!
//! # Environment Variables
//!
//! - `GAS_API_URL`: upstream base URL (requests fail with 500 while unset)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RELAY_LOCALE`: `ja` or `en` (default: ja)
//! - `RELAY_CONFIG`: optional path to a `relay.toml`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use gas_relay::config::{RelayConfig, UPSTREAM_URL_ENV};
use gas_relay::http::{create_router, AppState, CHART_PATH, RELAY_PATH};
use gas_relay::relay::HttpUpstream;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting GAS relay");

    let config = RelayConfig::load()?;
    if config.upstream_url().is_none() {
        // Not fatal: each request reports the missing variable instead.
        warn!(variable = UPSTREAM_URL_ENV, "Upstream URL is not configured");
    }

    let upstream = Arc::new(HttpUpstream::new()?);
    let addr: SocketAddr = config.bind_address().parse()?;
    let state = AppState::new(config, upstream);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Relay: http://{}{}  Chart: http://{}{}", addr, RELAY_PATH, addr, CHART_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
