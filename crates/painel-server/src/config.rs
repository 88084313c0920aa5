//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use painel_shared::constants::{DEFAULT_COOKIE_MAX_AGE_SECS, DEFAULT_HTTP_PORT};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:3050`
    pub http_addr: SocketAddr,

    /// Landing document served at `/`.
    /// Env: `PAGE_PATH`
    /// Default: `./page/index.html`
    pub page_path: PathBuf,

    /// Root directory for `/static/*`.
    /// Env: `STATIC_DIR`
    /// Default: `./static`
    pub static_dir: PathBuf,

    /// Lifetime of the identity cookie. `None` makes it a session cookie.
    /// Env: `COOKIE_MAX_AGE_SECS` (0 = session cookie)
    /// Default: one year
    pub cookie_max_age: Option<Duration>,

    /// Whether the identity cookie carries the `Secure` attribute.
    /// Enable when served over HTTPS.
    /// Env: `COOKIE_SECURE` (true/false)
    /// Default: `false`
    pub cookie_secure: bool,

    /// Sustained requests per second allowed per client IP.
    /// Env: `RATE_LIMIT_PER_SEC`
    /// Default: `20`
    pub rate_limit_per_sec: f64,

    /// Burst size per client IP.
    /// Env: `RATE_LIMIT_BURST`
    /// Default: `60`
    pub rate_limit_burst: f64,

    /// Take the client IP from `X-Forwarded-For` / `X-Real-IP`.
    /// Only enable behind a reverse proxy that overwrites these headers.
    /// Env: `TRUST_PROXY_HEADERS` (true/false)
    /// Default: `false`
    pub trust_proxy_headers: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            page_path: PathBuf::from("./page/index.html"),
            static_dir: PathBuf::from("./static"),
            cookie_max_age: Some(Duration::from_secs(DEFAULT_COOKIE_MAX_AGE_SECS)),
            cookie_secure: false,
            rate_limit_per_sec: 20.0,
            rate_limit_burst: 60.0,
            trust_proxy_headers: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = var("HTTP_ADDR") {
            match addr.parse::<SocketAddr>() {
                Ok(parsed) => config.http_addr = parsed,
                Err(_) => tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default"),
            }
        }

        if let Some(path) = var("PAGE_PATH") {
            config.page_path = PathBuf::from(path);
        }

        if let Some(path) = var("STATIC_DIR") {
            config.static_dir = PathBuf::from(path);
        }

        if let Some(val) = var("COOKIE_MAX_AGE_SECS") {
            match val.parse::<u64>() {
                Ok(0) => config.cookie_max_age = None,
                Ok(secs) => config.cookie_max_age = Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid COOKIE_MAX_AGE_SECS, using default")
                }
            }
        }

        if let Some(val) = var("COOKIE_SECURE") {
            config.cookie_secure = parse_flag(&val);
        }

        if let Some(val) = var("RATE_LIMIT_PER_SEC") {
            match parse_positive(&val) {
                Some(rate) => config.rate_limit_per_sec = rate,
                None => tracing::warn!(value = %val, "Invalid RATE_LIMIT_PER_SEC, using default"),
            }
        }

        if let Some(val) = var("RATE_LIMIT_BURST") {
            match parse_positive(&val) {
                Some(burst) => config.rate_limit_burst = burst,
                None => tracing::warn!(value = %val, "Invalid RATE_LIMIT_BURST, using default"),
            }
        }

        if let Some(val) = var("TRUST_PROXY_HEADERS") {
            config.trust_proxy_headers = parse_flag(&val);
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

fn parse_flag(val: &str) -> bool {
    val != "false" && val != "0" && !val.is_empty()
}

fn parse_positive(val: &str) -> Option<f64> {
    val.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}
