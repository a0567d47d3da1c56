//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default upstream API root (Ergast-compatible).
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://ergast.com/api/f1";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the cache persistence file
    pub cache_dir: PathBuf,
    /// Whether the cache is mirrored to disk
    pub cache_persist: bool,
    /// Serve bundled mock tables instead of calling the upstream API
    pub use_mock_data: bool,
    /// Upstream API root
    pub upstream_base_url: String,
    /// Upstream request timeout
    pub http_timeout: Duration,
    /// CORS allowed origin, `*` for any
    pub frontend_origin: String,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Persistence directory (default: /tmp/f1_cache)
    /// - `CACHE_PERSIST` - Enable persistence (default: true)
    /// - `USE_MOCK_DATA` - Serve mock data (default: true)
    /// - `UPSTREAM_BASE_URL` - Upstream API root (default: https://ergast.com/api/f1)
    /// - `HTTP_TIMEOUT` - Upstream timeout in seconds (default: 20)
    /// - `FRONTEND_ORIGIN` - CORS origin (default: *)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            cache_persist: env::var("CACHE_PERSIST")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.cache_persist),
            use_mock_data: env::var("USE_MOCK_DATA")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.use_mock_data),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.upstream_base_url),
            http_timeout: env::var("HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .unwrap_or(defaults.http_timeout),
            frontend_origin: env::var("FRONTEND_ORIGIN").unwrap_or(defaults.frontend_origin),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("/tmp/f1_cache"),
            cache_persist: true,
            use_mock_data: true,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(20),
            frontend_origin: "*".to_string(),
            server_port: 8000,
        }
    }
}

/// Interprets `1`, `true`, `yes` and `on` (any case) as enabled.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
