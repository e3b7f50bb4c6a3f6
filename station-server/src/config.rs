//! Server configuration.
//!
//! Everything is read from environment variables with sensible defaults,
//! so a bare `cargo run` serves the shipped catalogs against the public
//! foot-routing service.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::nearest::DEFAULT_NEAREST_COUNT;
use crate::routing::RoutingConfig;

/// Default directory holding `{city}.json` station catalogs.
const DEFAULT_DATA_DIR: &str = "data/stations";

/// Upper bound on the number of stations a single query may ask for.
pub const MAX_NEAREST_COUNT: usize = 50;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable present but unparseable
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory containing per-city station catalogs.
    pub data_dir: PathBuf,

    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Number of stations returned when a query gives no `k`.
    pub default_count: usize,

    /// Routing client settings.
    pub routing: RoutingConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `STATION_DATA_DIR` | `data/stations` |
    /// | `BIND_ADDR` | `127.0.0.1:3000` |
    /// | `NEAREST_COUNT` | `5` |
    /// | `ROUTING_BASE_URL` | public OSM foot-routing service |
    /// | `ROUTING_TIMEOUT_SECS` | `30` |
    /// | `ROUTING_MAX_CONCURRENT` | `5` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup("STATION_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = parse_var(&lookup, "BIND_ADDR")? {
            config.bind_addr = addr;
        }
        if let Some(count) = parse_var::<usize>(&lookup, "NEAREST_COUNT")? {
            config.default_count = count.min(MAX_NEAREST_COUNT);
        }
        if let Some(url) = lookup("ROUTING_BASE_URL") {
            config.routing = config.routing.with_base_url(url);
        }
        if let Some(secs) = parse_var(&lookup, "ROUTING_TIMEOUT_SECS")? {
            config.routing = config.routing.with_timeout(secs);
        }
        if let Some(n) = parse_var(&lookup, "ROUTING_MAX_CONCURRENT")? {
            config.routing = config.routing.with_max_concurrent(n);
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            default_count: DEFAULT_NEAREST_COUNT,
            routing: RoutingConfig::default(),
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(v) => Ok(Some(v)),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
