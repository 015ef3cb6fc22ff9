//! Storage configuration loaded from the environment.
//!
//! # Environment Variables
//!
//! - `TASKBOARD_DATABASE_URL`: `PostgreSQL` connection string (required)
//! - `TASKBOARD_DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//! - `TASKBOARD_DATABASE_CONNECT_TIMEOUT_SECS`: seconds to wait for a pooled
//!   connection (default: 5)
//!
//! A `.env` file in the working directory is loaded first when present.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// `PostgreSQL` connection pool shared by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const DATABASE_URL: &str = "TASKBOARD_DATABASE_URL";
const MAX_CONNECTIONS: &str = "TASKBOARD_DATABASE_MAX_CONNECTIONS";
const CONNECT_TIMEOUT: &str = "TASKBOARD_DATABASE_CONNECT_TIMEOUT_SECS";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    /// A variable is set to a value that cannot be used.
    #[error("invalid value '{value}' for {key}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Connection settings for the `PostgreSQL` store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database_url: String,
    max_connections: u32,
    connect_timeout: Duration,
}

impl StoreConfig {
    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Sets how long to wait for a pooled connection.
    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Loads configuration from the process environment, reading `.env`
    /// first when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the database URL is not set and
    /// [`ConfigError::Invalid`] when a numeric setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            debug!(error = %err, "no .env file loaded");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL))?;

        let mut config = Self::new(database_url);
        if let Some(raw) = lookup(MAX_CONNECTIONS) {
            let max_connections = parse_positive(MAX_CONNECTIONS, &raw)?;
            config = config.with_max_connections(
                u32::try_from(max_connections).map_err(|_| ConfigError::Invalid {
                    key: MAX_CONNECTIONS,
                    value: raw.clone(),
                })?,
            );
        }
        if let Some(raw) = lookup(CONNECT_TIMEOUT) {
            let seconds = parse_positive(CONNECT_TIMEOUT, &raw)?;
            config = config.with_connect_timeout(Duration::from_secs(seconds));
        }
        Ok(config)
    }

    /// Returns the connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Returns the pooled-connection timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Builds the Diesel r2d2 pool.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the initial connections cannot be
    /// established.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        // r2d2 panics on a zero pool size or timeout.
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: MAX_CONNECTIONS,
                value: self.max_connections.to_string(),
            });
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: CONNECT_TIMEOUT,
                value: self.connect_timeout.as_secs().to_string(),
            });
        }
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        let pool = Pool::builder()
            .max_size(self.max_connections)
            .connection_timeout(self.connect_timeout)
            .build(manager)?;
        Ok(pool)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ConfigError::Invalid {
            key,
            value: raw.to_owned(),
        })
}
