//! Configuration parsing – reads a KEY=VALUE file (`thirdeye.conf`).
//!
//! Every binary loads the same file and ignores the fields it does not
//! need.  Process environment variables with the same key names take
//! precedence over the file, so container deployments can skip the file
//! entirely.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Keys that may be overridden from the process environment.
const ENV_KEYS: &[&str] = &[
    "DB_PATH",
    "API_LISTEN_ADDR",
    "API_BASE_URL",
    "WORKER_POLL_SECONDS",
    "HTTP_TIMEOUT_SECONDS",
    "JWT_SECRET",
    "TOKEN_TTL_SECONDS",
];

/// Signing secret used when none is configured.  Fine for a laptop,
/// never for a deployment; the API warns at startup.
pub const DEFAULT_JWT_SECRET: &str = "change_me";

/// Application configuration, shared between the API, worker and console.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // ── storage (api, console) ───────────────────────────────────────
    pub db_path: PathBuf,

    // ── network (api ↔ worker) ───────────────────────────────────────
    /// Address the API HTTP server listens on.
    pub api_listen_addr: String,
    /// URL the worker uses to reach the API, without a trailing slash.
    pub api_base_url: String,

    // ── worker ───────────────────────────────────────────────────────
    /// Polling interval for the worker (seconds).
    pub worker_poll_secs: u64,
    /// Per-request timeout for outbound HTTP calls (seconds).
    pub http_timeout_secs: u64,

    // ── auth (api) ───────────────────────────────────────────────────
    /// HS256 secret for login tokens.
    pub jwt_secret: String,
    /// Lifetime of issued tokens (seconds).
    pub token_ttl_secs: u64,
}

impl Config {
    /// Default config path.
    pub fn default_path() -> &'static str {
        "/etc/thirdeye/thirdeye.conf"
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.worker_poll_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Override fields from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override fields with any values `lookup` returns for the known keys.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let map: HashMap<String, String> = ENV_KEYS
            .iter()
            .filter_map(|key| lookup(key).map(|v| (key.to_string(), v)))
            .collect();

        if let Some(v) = get(&map, "DB_PATH") {
            self.db_path = PathBuf::from(v);
        }
        if let Some(v) = get(&map, "API_LISTEN_ADDR") {
            self.api_listen_addr = v;
        }
        if let Some(v) = get(&map, "API_BASE_URL") {
            self.api_base_url = v.trim_end_matches('/').to_string();
        }
        self.worker_poll_secs = get_u64(&map, "WORKER_POLL_SECONDS", self.worker_poll_secs);
        self.http_timeout_secs = get_u64(&map, "HTTP_TIMEOUT_SECONDS", self.http_timeout_secs);
        if let Some(v) = get(&map, "JWT_SECRET") {
            self.jwt_secret = v;
        }
        self.token_ttl_secs = get_u64(&map, "TOKEN_TTL_SECONDS", self.token_ttl_secs);
    }
}

impl Default for Config {
    fn default() -> Self {
        from_map(&HashMap::new())
    }
}

/// Parse a `KEY=VALUE` configuration file.
///
/// Lines starting with `#` are comments.  Values may be optionally
/// double-quoted.  Unknown keys are silently ignored.
pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config: {}", path.display()))?;

    let map = parse_conf(&text);
    info!("Loaded config from {}", path.display());
    Ok(from_map(&map))
}

/// Load the config file if it exists, otherwise fall back to defaults.
/// Environment overrides are applied in both cases.
pub fn load_or_default(path: &Path) -> Config {
    let mut config = match load(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("{e:#} – using built-in defaults");
            Config::default()
        }
    };
    config.apply_env();
    config
}

fn from_map(map: &HashMap<String, String>) -> Config {
    let api_base_url = get(map, "API_BASE_URL").unwrap_or_else(|| "http://localhost:8001".into());

    Config {
        db_path: PathBuf::from(get(map, "DB_PATH").unwrap_or_else(|| "/data/thirdeye.db".into())),
        api_listen_addr: get(map, "API_LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8001".into()),
        api_base_url: api_base_url.trim_end_matches('/').to_string(),
        worker_poll_secs: get_u64(map, "WORKER_POLL_SECONDS", 10),
        http_timeout_secs: get_u64(map, "HTTP_TIMEOUT_SECONDS", 5),
        jwt_secret: get(map, "JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.into()),
        token_ttl_secs: get_u64(map, "TOKEN_TTL_SECONDS", 12 * 60 * 60),
    }
}

/// Non-empty value for `key`.
fn get(map: &HashMap<String, String>, key: &str) -> Option<String> {
    map.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Positive integer value for `key`, or `default`.
fn get_u64(map: &HashMap<String, String>, key: &str, default: u64) -> u64 {
    get(map, key)
        .and_then(|v| v.parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
fn parse_conf(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            map.insert(key.to_string(), val.to_string());
        }
    }
    map
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conf() {
        let text = r#"
# comment
DB_PATH=/var/lib/thirdeye/app.db
API_BASE_URL="http://api:8001/"
WORKER_POLL_SECONDS=30
"#;
        let map = parse_conf(text);
        assert_eq!(map["DB_PATH"], "/var/lib/thirdeye/app.db");
        assert_eq!(map["API_BASE_URL"], "http://api:8001/");
        assert_eq!(map["WORKER_POLL_SECONDS"], "30");
        assert!(!map.contains_key("# comment"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.db_path, PathBuf::from("/data/thirdeye.db"));
        assert_eq!(config.api_listen_addr, "0.0.0.0:8001");
        assert_eq!(config.api_base_url, "http://localhost:8001");
        assert_eq!(config.worker_poll_secs, 10);
        assert_eq!(config.http_timeout_secs, 5);
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
        assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
        assert_eq!(config.token_ttl(), Duration::from_secs(43_200));
    }

    #[test]
    fn test_load_file() {
        let tmp = tempfile(
            "load",
            "API_BASE_URL=\"http://api:8001/\"\nWORKER_POLL_SECONDS=30\nHTTP_TIMEOUT_SECONDS=abc\n",
        );
        let config = load(tmp.as_path()).unwrap();
        assert_eq!(config.api_base_url, "http://api:8001");
        assert_eq!(config.worker_poll_secs, 30);
        // Unparseable values fall back to the default.
        assert_eq!(config.http_timeout_secs, 5);
        assert_eq!(config.api_listen_addr, "0.0.0.0:8001");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let path = std::env::temp_dir().join("thirdeye_test_missing/none.conf");
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let tmp = tempfile("overrides", "DB_PATH=/from/file.db\nWORKER_POLL_SECONDS=30\n");
        let mut config = load(tmp.as_path()).unwrap();
        config.apply_overrides(|key| match key {
            "WORKER_POLL_SECONDS" => Some("3".into()),
            "API_BASE_URL" => Some("http://override:9000///".into()),
            "JWT_SECRET" => Some("s3cret".into()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/from/file.db"));
        assert_eq!(config.worker_poll_secs, 3);
        assert_eq!(config.api_base_url, "http://override:9000");
        assert_eq!(config.jwt_secret, "s3cret");
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "WORKER_POLL_SECONDS").then(|| "0".into()));
        assert_eq!(config.worker_poll_secs, 10);
    }

    fn tempfile(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("thirdeye_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.conf"));
        std::fs::write(&path, content).unwrap();
        path
    }
}
