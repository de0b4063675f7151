//! Server configuration from the environment.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::time::Duration;

use crate::matching::MatchConfig;
use crate::store::CacheConfig;

pub const ADDR_VAR: &str = "MATCH_SERVER_ADDR";
pub const SEED_FILE_VAR: &str = "MATCH_SEED_FILE";
pub const CACHE_TTL_VAR: &str = "MATCH_USER_CACHE_TTL_SECS";

const DEFAULT_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

/// Error reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MATCH_SERVER_ADDR={value:?} is not a socket address: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("MATCH_USER_CACHE_TTL_SECS={value:?} is not a number of seconds: {source}")]
    InvalidCacheTtl {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,

    /// JSON file to load users, journeys and requests from at startup.
    pub seed_file: Option<PathBuf>,

    pub cache: CacheConfig,

    pub matching: MatchConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = match lookup(ADDR_VAR) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidAddr { value, source })?,
            None => DEFAULT_ADDR,
        };

        let seed_file = lookup(SEED_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let mut cache = CacheConfig::default();
        if let Some(value) = lookup(CACHE_TTL_VAR) {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidCacheTtl { value, source })?;
            cache.ttl = Duration::from_secs(secs);
        }

        Ok(Self {
            addr,
            seed_file,
            cache,
            matching: MatchConfig::default(),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR,
            seed_file: None,
            cache: CacheConfig::default(),
            matching: MatchConfig::default(),
        }
    }
}
