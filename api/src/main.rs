//! Third Eye API Server – tenant, environment and camera registry.
//!
//! This binary:
//! 1. Reads configuration from `thirdeye.conf` (plus environment overrides)
//! 2. Creates the SQLite schema if needed
//! 3. Runs an axum HTTP server used by the worker, operators'
//!    provisioning scripts and logged-in reviewers labelling events.

mod auth;
mod db;
mod error;
mod server;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── load config ──────────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| thirdeye_common::config::Config::default_path().to_string());
    let config = thirdeye_common::config::load_or_default(&PathBuf::from(&config_path));

    info!(
        "Third Eye API starting (listen={}, db={})",
        config.api_listen_addr,
        config.db_path.display()
    );

    // ── initialize database ──────────────────────────────────────────
    db::initialize(&config.db_path).context("Database initialisation failed")?;

    // ── ctrl-c ───────────────────────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_flag.store(true, Ordering::Relaxed);
        info!("Shutdown signal received");
    })
    .context("Cannot set Ctrl-C handler")?;

    // ── start HTTP server ────────────────────────────────────────────
    if config.jwt_secret == thirdeye_common::config::DEFAULT_JWT_SECRET {
        warn!("JWT_SECRET is not set; tokens are signed with the built-in default");
    }
    let tokens = auth::TokenSigner::new(config.jwt_secret.as_bytes(), config.token_ttl());
    let state = server::AppState::new(config.db_path.clone(), tokens);
    if let Err(e) = server::run(state, &config.api_listen_addr, shutdown).await {
        tracing::error!("HTTP server error: {e:#}");
    }

    info!("Third Eye API stopped");
    Ok(())
}
