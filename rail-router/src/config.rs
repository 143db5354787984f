//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::loader::DataPaths;
use crate::network::{NetworkConfig, TransferMatch};
use crate::planner::PlanOptions;

const STATIONS_CSV: &str = "RAIL_STATIONS_CSV";
const JOINS_CSV: &str = "RAIL_JOINS_CSV";
const LINES_CSV: &str = "RAIL_LINES_CSV";
const BIND_ADDR: &str = "RAIL_BIND_ADDR";
const TRANSFER_MATCH: &str = "RAIL_TRANSFER_MATCH";
const CACHE_TTL_SECS: &str = "RAIL_ROUTE_CACHE_TTL_SECS";
const CACHE_CAPACITY: &str = "RAIL_ROUTE_CACHE_CAPACITY";
const ALLOW_SAME_STATION: &str = "RAIL_ALLOW_SAME_STATION";
const ROUTE_OUTPUT: &str = "RAIL_ROUTE_OUTPUT";

/// Errors while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    /// The environment variable at fault.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigError::Invalid { key, .. } => key,
        }
    }
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data: DataPaths,
    pub bind_addr: SocketAddr,
    pub network: NetworkConfig,
    pub plan: PlanOptions,
    pub cache: CacheConfig,

    /// File that receives the station names of every route found
    pub route_output: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataPaths::new("station.csv", "join.csv"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            network: NetworkConfig::default(),
            plan: PlanOptions::default(),
            cache: CacheConfig::default(),
            route_output: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults; set keys must parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(STATIONS_CSV) {
            config.data.stations = path.into();
        }
        if let Some(path) = lookup(JOINS_CSV) {
            config.data.joins = path.into();
        }
        if let Some(path) = lookup(LINES_CSV).filter(|p| !p.is_empty()) {
            config.data.lines = Some(path.into());
        }
        if let Some(path) = lookup(ROUTE_OUTPUT).filter(|p| !p.is_empty()) {
            config.route_output = Some(path.into());
        }
        if let Some(value) = lookup(BIND_ADDR) {
            config.bind_addr = parse(BIND_ADDR, value, "a socket address like 127.0.0.1:3000")?;
        }
        if let Some(value) = lookup(TRANSFER_MATCH) {
            config.network.transfer = parse_transfer_match(value)?;
        }
        if let Some(value) = lookup(CACHE_TTL_SECS) {
            let secs: u64 = parse(CACHE_TTL_SECS, value, "a whole number of seconds")?;
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(value) = lookup(CACHE_CAPACITY) {
            config.cache.max_capacity = parse(CACHE_CAPACITY, value, "a whole number")?;
        }
        if let Some(value) = lookup(ALLOW_SAME_STATION) {
            config.plan.allow_same_station = parse(ALLOW_SAME_STATION, value, "true or false")?;
        }

        Ok(config)
    }
}

fn parse<T: FromStr>(
    key: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value,
        expected,
    })
}

fn parse_transfer_match(value: String) -> Result<TransferMatch, ConfigError> {
    match value.trim() {
        "name" => Ok(TransferMatch::SameName),
        "name-and-coordinates" => Ok(TransferMatch::SameNameAndCoordinates),
        _ => Err(ConfigError::Invalid {
            key: TRANSFER_MATCH,
            value,
            expected: "name or name-and-coordinates",
        }),
    }
}
