//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Database parameters use the same
//! `DB_*` keys the station firmware deployment already provides.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Default bind address: fixed port, all interfaces.
pub const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5000);

/// Default PostgreSQL port.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Environment variable name.
        key: &'static str,
        /// Raw value found in the environment.
        value: String,
        /// Why the value was refused.
        reason: String,
    },
}

/// Which [`crate::persistence::MeasurementStore`] backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// PostgreSQL through `sqlx`.
    #[default]
    Postgres,
    /// Process-local store, lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend `{other}`")),
        }
    }
}

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

/// PostgreSQL connection parameters.
///
/// Unset optional values fall back to the driver defaults (`PGUSER`,
/// `PGDATABASE`, ...).
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database user (`DB_USER`).
    pub user: Option<String>,
    /// Database password (`DB_PASSWORD`).
    pub password: Option<String>,
    /// Database host (`DB_HOST`).
    pub host: String,
    /// Database port (`DB_PORT`).
    pub port: u16,
    /// Database name (`DB_DATABASE`).
    pub database: Option<String>,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`], before the
/// listener is bound.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:5000`).
    pub listen_addr: SocketAddr,

    /// PostgreSQL connection parameters.
    pub database: DatabaseConfig,

    /// Store implementation to use.
    pub store_backend: StoreBackend,

    /// Tracing output format.
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file
    /// first, then falls back to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = parse_var(&var, "LISTEN_ADDR")?
            .unwrap_or(DEFAULT_LISTEN_ADDR);

        let database = DatabaseConfig {
            user: var("DB_USER"),
            password: var("DB_PASSWORD"),
            host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_var(&var, "DB_PORT")?.unwrap_or(DEFAULT_DB_PORT),
            database: var("DB_DATABASE"),
        };

        let store_backend = parse_var(&var, "STORE_BACKEND")?.unwrap_or_default();
        let log_format = parse_var(&var, "LOG_FORMAT")?.unwrap_or_default();

        Ok(Self {
            listen_addr,
            database,
            store_backend,
            log_format,
        })
    }
}

/// Parses a variable as `T`. Unset yields `Ok(None)`; an unparsable value
/// is an error rather than a silent default.
fn parse_var<T, F>(var: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
