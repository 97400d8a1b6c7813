//! Third Eye Worker – polls the API server and reports which cameras are
//! enabled for monitoring.

mod client;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing::info;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

fn main() -> Result<()> {
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
        "Third Eye Worker starting (api={}, poll={}s)",
        config.api_base_url, config.worker_poll_secs
    );

    // ── ctrl-c ───────────────────────────────────────────────────────
    ctrlc::set_handler(move || {
        SHUTDOWN.store(true, Ordering::Relaxed);
        info!("Shutdown signal received");
    })
    .context("Cannot set Ctrl-C handler")?;

    // ── poll API ─────────────────────────────────────────────────────
    if let Err(e) = client::poll(&config, &SHUTDOWN) {
        tracing::error!("Polling loop error: {e:#}");
    }

    info!("Third Eye Worker stopped");
    Ok(())
}
