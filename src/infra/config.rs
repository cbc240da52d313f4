//! For reading application configuration.

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Server address.
    pub http_address: String,
    /// Server http port.
    pub http_port: u16,
    /// How long a request may take before it is aborted.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// The maximum number of requests served at once.
    pub concurrency_limit: usize,
}

/// Database configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    /// The database url, e.g. `sqlite://items.db`.
    pub url: String,
    /// The maximum number of pooled connections.
    pub max_connections: u32,
    /// How long to wait for a pooled connection.
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

/// Logging configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    /// The filter used when `RUST_LOG` is not set.
    pub default_filter: String,
    /// Write hourly JSON log files to this directory, if set.
    #[serde(default)]
    pub directory: Option<String>,
}

/// Retrieve [`Config`] from the default configuration file.
///
/// Values can be overridden with environment variables such as `APP__SERVER__HTTP_PORT`.
#[tracing::instrument]
pub fn load_config() -> Result<Config, ConfigError> {
    config::Config::builder()
        .add_source(File::with_name("config"))
        .add_source(Environment::with_prefix("app").separator("__"))
        .build()?
        .try_deserialize()
}
