//! Configuration for the Relationship Store
//!
//! Defaults suit local development; every field can be overridden through
//! environment variables (see `StoreConfig::from_env`).

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Storage backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local state, lost on exit.
    Memory,
    /// SQLite database through `sqlx`.
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => f.write_str("memory"),
            StoreBackend::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Store configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown store backend: {0} (expected memory or sqlite)")]
    UnknownBackend(String),

    #[error("Database URL is required for the sqlite backend")]
    MissingDatabaseUrl,

    #[error("Max connections must be greater than 0")]
    ZeroConnections,
}

/// Relationship Store configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which adapter backs the service
    pub backend: StoreBackend,
    /// sqlx connection URL (sqlite backend only)
    pub database_url: String,
    /// Connection pool size
    pub max_connections: u32,
    /// How long a writer waits on a locked database before failing
    pub busy_timeout_ms: u64,
    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            database_url: "sqlite://social-graph.db".to_string(),
            max_connections: 8,
            busy_timeout_ms: 5_000,
            run_migrations: true,
        }
    }
}

impl StoreConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SG_STORE_BACKEND`: `memory` or `sqlite` (default: sqlite)
    /// - `SG_DATABASE_URL`: sqlx URL (default: sqlite://social-graph.db)
    /// - `SG_DB_MAX_CONNECTIONS`: pool size (default: 8)
    /// - `SG_DB_BUSY_TIMEOUT_MS`: lock wait in ms (default: 5000)
    /// - `SG_DB_RUN_MIGRATIONS`: run migrations on startup (default: true)
    ///
    /// Unparseable numeric values fall back to their defaults; an unknown
    /// backend name is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let backend = match env::var("SG_STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.backend,
        };

        Ok(Self {
            backend,
            database_url: env::var("SG_DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: env::var("SG_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            busy_timeout_ms: env::var("SG_DB_BUSY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.busy_timeout_ms),
            run_migrations: env::var("SG_DB_RUN_MIGRATIONS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.run_migrations),
        })
    }

    /// In-memory configuration, mostly for tests and demos.
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Default::default()
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StoreBackend::Sqlite {
            if self.database_url.trim().is_empty() {
                return Err(ConfigError::MissingDatabaseUrl);
            }
            if self.max_connections == 0 {
                return Err(ConfigError::ZeroConnections);
            }
        }
        Ok(())
    }
}
