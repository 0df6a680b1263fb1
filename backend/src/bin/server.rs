//! ETL Monitor HTTP Server Binary
//!
//! Entry point for the monitoring REST API. It initializes the store
//! backend, builds the HTTP router and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory store (default)
//! cargo run --bin etlmon-server --features "local-repo,http-server"
//!
//! # Run against an on-disk delta-table layout
//! STORE_TYPE=delta ETL_TABLES_DIR=/srv/etl/delta_tables \
//!   cargo run --bin etlmon-server --features "delta-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (overrides monitor.toml, default 0.0.0.0)
//! - `PORT`: Server port (overrides monitor.toml, default 8080)
//! - `STORE_TYPE`: `local` or `delta`
//! - `ETL_TABLES_DIR` / `ETL_RAW_DATA_DIR`: delta store directories
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use etlmon_rust::db::{self, MonitorConfig};
use etlmon_rust::http::{create_router, AppState};
use etlmon_rust::services::summary::SummaryOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting ETL monitor server");

    let config = MonitorConfig::from_default_location().unwrap_or_default();

    // Initialize the global store singleton once and share it with the app.
    db::init_store()?;
    let store = std::sync::Arc::clone(db::get_store()?);
    info!(store_type = %config.store.store_type, "Store initialized");

    let summary = SummaryOptions {
        total_users: config.settings.total_users,
        silver_fanout: config.pipeline.silver_fanout,
    };
    let state = AppState::new(store).with_summary_options(summary);

    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| config.server.host.clone());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
