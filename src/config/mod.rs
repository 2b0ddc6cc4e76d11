// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the ethinfo service
//!
//! Settings come from the environment (a `.env` file is honoured by the
//! binary) and are read once at startup. Tests and embedders can build a
//! [`ServiceConfig`] directly with [`ServiceConfigBuilder`].
//!
//! # Example: from the environment
//!
//! ```rust,no_run
//! use ethinfo::ServiceConfig;
//!
//! let config = ServiceConfig::from_env()?;
//! println!("listening on port {}", config.port);
//! # Ok::<(), ethinfo::ConfigError>(())
//! ```
//!
//! # Example: explicit
//!
//! ```rust
//! use ethinfo::{ServiceConfigBuilder, StoreBackend};
//! use std::time::Duration;
//!
//! let config = ServiceConfigBuilder::new("http://localhost:8545")
//!     .store(StoreBackend::Memory)
//!     .request_timeout(Duration::from_secs(2))
//!     .build();
//! assert_eq!(config.port, 5000);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

pub mod constants;

use constants::{
    DEFAULT_MONGO_DATABASE, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RPC_MAX_RETRIES,
};

/// Which record store backs account snapshots.
///
/// Chosen once at startup; requests never branch on it.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB document store
    Mongo {
        /// Connection URI
        uri: String,
        /// Database name
        database: String,
    },
    /// Postgres relational store
    Postgres {
        /// Connection string
        uri: String,
    },
    /// In-process map, lost on restart
    Memory,
}

impl StoreBackend {
    /// Backend name as accepted by `STORE_BACKEND`.
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Mongo { .. } => "mongo",
            StoreBackend::Postgres { .. } => "postgres",
            StoreBackend::Memory => "memory",
        }
    }
}

// Connection strings carry credentials; keep them out of logs.
impl fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Mongo { database, .. } => f
                .debug_struct("Mongo")
                .field("uri", &"<redacted>")
                .field("database", database)
                .finish(),
            StoreBackend::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("uri", &"<redacted>")
                .finish(),
            StoreBackend::Memory => f.write_str("Memory"),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected \"pretty\" or \"json\", got {other:?}")),
        }
    }
}

/// Settings for one ethinfo process
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upstream JSON-RPC endpoint
    pub rpc_url: String,

    /// Redis URL; `None` selects the in-memory cache
    pub redis_url: Option<String>,

    /// Record store backend
    pub store: StoreBackend,

    /// HTTP listening port
    /// Default: 5000
    pub port: u16,

    /// Deadline for all outbound calls made by one request
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// Retries for transient upstream failures (not counting the first attempt)
    /// Default: 3
    pub rpc_max_retries: u32,

    /// Log full RPC payloads at trace level
    pub rpc_log_payloads: bool,

    /// Log output format
    pub log_format: LogFormat,
}

impl ServiceConfig {
    /// Read the configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `RPC_URL` (or `INFURA_URL`) | required |
    /// | `REDIS_URL` | unset, in-memory cache |
    /// | `STORE_BACKEND` | `mongo` |
    /// | `MONGO_URI` / `MONGO_DATABASE` | required for mongo / `ethinfo` |
    /// | `POSTGRES_URI` (or `DATABASE_URL`) | required for postgres |
    /// | `PORT` | `5000` |
    /// | `REQUEST_TIMEOUT_MS` | `10000`, must be positive |
    /// | `RPC_MAX_RETRIES` | `3` |
    /// | `RPC_LOG_REQUESTS` | `false` |
    /// | `LOG_FORMAT` | `pretty` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let rpc_url = get("RPC_URL")
            .or_else(|| get("INFURA_URL"))
            .ok_or(ConfigError::Missing { name: "RPC_URL" })?;

        let store = match get("STORE_BACKEND").as_deref().map(str::to_ascii_lowercase) {
            None => mongo_backend(&get)?,
            Some(name) => match name.as_str() {
                "mongo" | "mongodb" => mongo_backend(&get)?,
                "postgres" | "postgresql" => StoreBackend::Postgres {
                    uri: get("POSTGRES_URI")
                        .or_else(|| get("DATABASE_URL"))
                        .ok_or(ConfigError::Missing {
                            name: "POSTGRES_URI",
                        })?,
                },
                "memory" => StoreBackend::Memory,
                _ => {
                    return Err(ConfigError::invalid(
                        "STORE_BACKEND",
                        name.clone(),
                        "expected mongo, postgres or memory",
                    ))
                }
            },
        };

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let request_timeout = match get("REQUEST_TIMEOUT_MS") {
            None => DEFAULT_REQUEST_TIMEOUT,
            Some(value) => match parse_or::<u64>("REQUEST_TIMEOUT_MS", Some(value), 0)? {
                0 => {
                    return Err(ConfigError::invalid(
                        "REQUEST_TIMEOUT_MS",
                        "0",
                        "must be greater than zero",
                    ))
                }
                millis => Duration::from_millis(millis),
            },
        };

        Ok(Self {
            rpc_url,
            redis_url: get("REDIS_URL"),
            store,
            port,
            request_timeout,
            rpc_max_retries: parse_or("RPC_MAX_RETRIES", get("RPC_MAX_RETRIES"), DEFAULT_RPC_MAX_RETRIES)?,
            rpc_log_payloads: parse_or("RPC_LOG_REQUESTS", get("RPC_LOG_REQUESTS"), false)?,
            log_format: parse_or("LOG_FORMAT", get("LOG_FORMAT"), LogFormat::default())?,
        })
    }
}

fn mongo_backend<G>(get: &G) -> Result<StoreBackend, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    Ok(StoreBackend::Mongo {
        uri: get("MONGO_URI").ok_or(ConfigError::Missing { name: "MONGO_URI" })?,
        database: get("MONGO_DATABASE").unwrap_or_else(|| DEFAULT_MONGO_DATABASE.to_string()),
    })
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(name, raw.clone(), e)),
    }
}

/// Builder for [`ServiceConfig`]
///
/// Starts from the same defaults as the environment loader with the in-memory
/// cache and store.
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    /// Create a builder for the given upstream endpoint
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            config: ServiceConfig {
                rpc_url: rpc_url.into(),
                redis_url: None,
                store: StoreBackend::Memory,
                port: DEFAULT_PORT,
                request_timeout: DEFAULT_REQUEST_TIMEOUT,
                rpc_max_retries: DEFAULT_RPC_MAX_RETRIES,
                rpc_log_payloads: false,
                log_format: LogFormat::Pretty,
            },
        }
    }

    /// Use Redis at `url` for the shared cache
    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.config.redis_url = Some(url.into());
        self
    }

    /// Set the record store backend
    pub fn store(mut self, store: StoreBackend) -> Self {
        self.config.store = store;
        self
    }

    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the per-request deadline
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the upstream retry count
    pub fn rpc_max_retries(mut self, retries: u32) -> Self {
        self.config.rpc_max_retries = retries;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ServiceConfig {
        self.config
    }
}
