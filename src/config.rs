//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Store Connection
//!
//! ### Method 1: Full URL
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! ### Method 2: Individual components
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! If neither is set, the service connects to `redis://127.0.0.1:6379/0`.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SLUG_MAX_ATTEMPTS` - Slugs tried per creation before giving up (default: 10, max: 100)
//! - `SHUTDOWN_TIMEOUT_SECONDS` - Grace period for in-flight requests (default: 30)

use anyhow::{Context, Result};
use std::env;

use crate::application::services::registry_service::DEFAULT_SLUG_MAX_ATTEMPTS;

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/0";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Number of fresh slugs tried when a generated one is already taken.
    pub slug_max_attempts: usize,
    /// Seconds in-flight requests get to finish after a shutdown signal.
    pub shutdown_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let slug_max_attempts = parse_var("SLUG_MAX_ATTEMPTS", DEFAULT_SLUG_MAX_ATTEMPTS)?;
        let shutdown_timeout_seconds = parse_var("SHUTDOWN_TIMEOUT_SECONDS", 30)?;

        Ok(Self {
            redis_url,
            listen_addr,
            log_level,
            log_format,
            slug_max_attempts,
            shutdown_timeout_seconds,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    /// 3. `redis://127.0.0.1:6379/0`
    fn load_redis_url() -> String {
        if let Ok(url) = env::var("REDIS_URL") {
            return url;
        }

        let Ok(host) = env::var("REDIS_HOST") else {
            return DEFAULT_REDIS_URL.to_string();
        };
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        match password {
            // Empty password means no authentication
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `redis_url` has an unsupported scheme
    /// - `slug_max_attempts` is outside `1..=100`
    /// - `shutdown_timeout_seconds` is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.redis_url.starts_with("redis://") && !self.redis_url.starts_with("rediss://") {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(&self.redis_url)
            );
        }

        if self.slug_max_attempts == 0 || self.slug_max_attempts > 100 {
            anyhow::bail!(
                "SLUG_MAX_ATTEMPTS must be between 1 and 100, got {}",
                self.slug_max_attempts
            );
        }

        if self.shutdown_timeout_seconds == 0 {
            anyhow::bail!("SHUTDOWN_TIMEOUT_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Redis: {}", mask_connection_string(&self.redis_url));
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Slug attempts: {}", self.slug_max_attempts);
        tracing::info!("  Shutdown timeout: {}s", self.shutdown_timeout_seconds);
    }
}

/// Parses an optional numeric variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
