//! HTTP client that polls the API server.
//!
//! Each cycle checks `/health` and, when the API is up, walks
//! orgs → environments → cameras to report how many cameras are
//! enabled for monitoring.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use thirdeye_common::config::Config;
use thirdeye_common::protocol::{Camera, Environment, HealthResponse, Organization};

/// Granularity of the shutdown check while sleeping between polls.
const SLEEP_SLICE: Duration = Duration::from_secs(1);

/// Totals gathered by one sweep over the API.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepSummary {
    pub orgs: usize,
    pub environments: usize,
    pub cameras: usize,
    pub enabled_cameras: usize,
}

impl SweepSummary {
    fn add_cameras(&mut self, cameras: &[Camera]) {
        self.cameras += cameras.len();
        self.enabled_cameras += cameras.iter().filter(|c| c.enabled).count();
    }
}

/// Thin blocking client over the API's JSON routes.
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Cannot create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn health(&self) -> Result<HealthResponse> {
        self.get_json("/health", &[])
    }

    pub fn orgs(&self) -> Result<Vec<Organization>> {
        self.get_json("/orgs", &[])
    }

    pub fn environments(&self, org_id: &str) -> Result<Vec<Environment>> {
        self.get_json("/envs", &[("org_id", org_id)])
    }

    pub fn cameras(&self, env_id: &str) -> Result<Vec<Camera>> {
        self.get_json("/cameras", &[("env_id", env_id)])
    }

    /// Walk every org and environment, counting cameras.
    pub fn sweep(&self) -> Result<SweepSummary> {
        let mut summary = SweepSummary::default();
        for org in self.orgs()? {
            summary.orgs += 1;
            for env in self.environments(&org.id)? {
                summary.environments += 1;
                let cameras = self.cameras(&env.id)?;
                debug!(
                    "{} / {}: {} camera(s)",
                    org.name,
                    env.name,
                    cameras.len()
                );
                summary.add_cameras(&cameras);
            }
        }
        Ok(summary)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .with_context(|| format!("GET {path}"))?;

        if !resp.status().is_success() {
            anyhow::bail!("GET {path} returned {}", resp.status());
        }

        resp.json().with_context(|| format!("Parse {path} JSON"))
    }
}

/// Poll the API until `shutdown` is set.
pub fn poll(config: &Config, shutdown: &AtomicBool) -> Result<()> {
    let api = ApiClient::new(&config.api_base_url, config.http_timeout())?;
    let interval = config.poll_interval();

    info!(
        "Polling API at {} every {}s",
        config.api_base_url, config.worker_poll_secs
    );

    while !shutdown.load(Ordering::Relaxed) {
        match api.health() {
            Ok(h) => {
                info!("API health: {} (uptime {}s)", h.status, h.uptime_secs);
                match api.sweep() {
                    Ok(s) => info!(
                        "Sweep: {} org(s), {} environment(s), {}/{} camera(s) enabled",
                        s.orgs, s.environments, s.enabled_cameras, s.cameras
                    ),
                    Err(e) => warn!("Camera sweep failed: {e:#}"),
                }
            }
            Err(e) => warn!("Cannot reach API: {e:#}"),
        }

        sleep_interruptible(interval, shutdown);
    }

    info!("Polling loop stopped");
    Ok(())
}

/// Sleep for `total`, returning early once `shutdown` is set.
fn sleep_interruptible(total: Duration, shutdown: &AtomicBool) {
    let deadline = Instant::now() + total;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        std::thread::sleep(SLEEP_SLICE.min(deadline - now));
    }
}

// ─── tests ───────────────────────────────────────────────────────────────────
