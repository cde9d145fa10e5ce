//! Estate API Server
//!
//! Run with: cargo run --bin estate-api
//!
//! # Configuration
//!
//! Reads `$CONFIG_DIR/estate/config.toml` or `./estate.toml`, or the file
//! named by `--config`. Environment variables override the file:
//! - `ESTATE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `ESTATE_PORT`: Port to listen on (default: 8080)
//! - `ESTATE_DATABASE`: SQLite database file
//! - `ESTATE_LOG_LEVEL`, `ESTATE_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Log filter, wins over `ESTATE_LOG_LEVEL`

use anyhow::Context;
use clap::Parser;
use estate::api::{serve, ApiConfig, AppState};
use estate::config::Config;
use estate::logging::init_logging;
use estate::store::Store;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "estate-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "REST backend for the Estate property manager")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file (overrides config)
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(database) = args.database {
        config.server.database = database.to_string_lossy().to_string();
    }

    init_logging(&config.logging)?;

    tracing::info!("Starting Estate API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.server.database);

    let store = Store::open(&config.server.database)
        .with_context(|| format!("Failed to open database {}", config.server.database))?;
    let store = Arc::new(store);

    let api_config = ApiConfig::from(&config.server);
    let state = AppState::new(Arc::clone(&store), api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Estate API server stopped");

    Ok(())
}
