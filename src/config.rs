//! Configuration Module
//!
//! Handles loading proxy configuration from environment variables. Values are
//! read once at startup; a malformed value is an error rather than a silent
//! fallback to the default.

use std::env;
use std::time::Duration;

/// Errors raised while reading configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// How the binary serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// HTTP server (`APP_MODE` unset, empty or `1`)
    #[default]
    Http,
    /// Interactive console reading `GET <key>` lines from stdin (`APP_MODE=2`)
    Console,
}

/// Proxy configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backing store address, `host:port` or a `redis://` URL
    pub redis_url: String,
    /// Expiry applied to keys written to the backing store
    pub redis_ttl: Option<Duration>,
    /// Upper bound on each backing-store call, None = no bound
    pub redis_timeout: Option<Duration>,
    /// HTTP listen port
    pub port: u16,
    /// Local cache max entries, None or 0 = unbounded
    pub cache_key_capacity: Option<usize>,
    /// Local cache entry lifetime, None = never expires
    pub cache_ttl: Option<Duration>,
    /// Maximum concurrently processed requests, None = unbounded
    pub proxy_client_limit: Option<usize>,
    /// HTTP server or console
    pub mode: AppMode,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Backing store address (default: localhost:6379)
    /// - `REDIS_TTL` - Backing store key TTL in seconds (default: none)
    /// - `REDIS_TIMEOUT` - Backing store call timeout in seconds, 0 disables (default: 5)
    /// - `PORT` - HTTP listen port (default: 8080)
    /// - `CACHE_KEY_CAPACITY` - Local cache max entries (default: unbounded)
    /// - `CACHE_TTL` - Local cache entry TTL in seconds (default: never expires)
    /// - `PROXY_CLIENT_LIMIT` - Max concurrent requests, > 0 (default: unbounded)
    /// - `APP_MODE` - `1` for HTTP, `2` for console (default: HTTP)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let redis_url = var("REDIS_URL").unwrap_or(defaults.redis_url);
        let redis_ttl = parse_secs("REDIS_TTL", var("REDIS_TTL"))?;
        let redis_timeout = match parse_secs("REDIS_TIMEOUT", var("REDIS_TIMEOUT"))? {
            Some(timeout) if timeout.is_zero() => None,
            Some(timeout) => Some(timeout),
            None => defaults.redis_timeout,
        };
        let port = parse("PORT", var("PORT"))?.unwrap_or(defaults.port);
        let cache_key_capacity = parse("CACHE_KEY_CAPACITY", var("CACHE_KEY_CAPACITY"))?;
        let cache_ttl = parse_secs("CACHE_TTL", var("CACHE_TTL"))?.filter(|ttl| !ttl.is_zero());

        let proxy_client_limit = parse::<usize>("PROXY_CLIENT_LIMIT", var("PROXY_CLIENT_LIMIT"))?;
        if proxy_client_limit == Some(0) {
            return Err(ConfigError::InvalidValue {
                name: "PROXY_CLIENT_LIMIT",
                value: "0".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        let mode = match var("APP_MODE").as_deref().map(str::trim) {
            None | Some("1") => AppMode::Http,
            Some("2") => AppMode::Console,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "APP_MODE",
                    value: other.to_string(),
                    reason: "expected 1 (HTTP) or 2 (console)".to_string(),
                })
            }
        };

        Ok(Self {
            redis_url,
            redis_ttl,
            redis_timeout,
            port,
            cache_key_capacity,
            cache_ttl,
            proxy_client_limit,
            mode,
        })
    }

    /// Local cache capacity with 0 meaning unbounded.
    pub fn cache_capacity(&self) -> usize {
        self.cache_key_capacity.unwrap_or(0)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "localhost:6379".to_string(),
            redis_ttl: None,
            redis_timeout: Some(Duration::from_secs(5)),
            port: 8080,
            cache_key_capacity: None,
            cache_ttl: None,
            proxy_client_limit: None,
            mode: AppMode::Http,
        }
    }
}

fn parse<T>(name: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                name,
                value: value.clone(),
                reason: e.to_string(),
            })
    })
    .transpose()
}

/// Parses a duration in seconds, fractions allowed (`1.5` = 1500 ms).
fn parse_secs(name: &'static str, raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    let secs = parse::<f64>(name, Some(value.clone()))?.unwrap_or_default();
    Duration::try_from_secs_f64(secs)
        .map(Some)
        .map_err(|e| ConfigError::InvalidValue {
            name,
            value,
            reason: e.to_string(),
        })
}
