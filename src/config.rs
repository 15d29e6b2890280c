//! Environment-based configuration types for the registry server.

use anyhow::Result;
use std::time::Duration;

use crate::errors::ConfigError;

/// HTTP server port configuration
#[derive(Clone)]
pub struct HttpPort(u16);

/// Storage pool acquire timeout configuration
#[derive(Clone)]
pub struct StorageTimeout(Duration);

/// How service and transport failures are mapped onto HTTP status codes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorStatusMapping {
    /// Every failure is reported as 500 Internal Server Error
    #[default]
    Collapsed,
    /// Not-found is 404, undecodable requests are 400, everything else is 500
    PerKind,
}

/// Main application configuration
#[derive(Clone)]
pub struct Config {
    pub version: String,
    pub http_port: HttpPort,
    pub storage_backend: String,
    pub database_url: Option<String>,
    pub storage_timeout: StorageTimeout,
    pub error_status_mapping: ErrorStatusMapping,
}

impl Config {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        let http_port: HttpPort = default_env("HTTP_PORT", "8080").try_into()?;
        let storage_backend = default_env("STORAGE_BACKEND", "memory");
        let database_url = require_database_url(&storage_backend, optional_env("DATABASE_URL"))?;
        let storage_timeout: StorageTimeout = default_env("STORAGE_TIMEOUT", "5s").try_into()?;
        let error_status_mapping: ErrorStatusMapping =
            default_env("ERROR_STATUS_MAPPING", "collapsed").try_into()?;

        Ok(Self {
            version: version()?,
            http_port,
            storage_backend,
            database_url,
            storage_timeout,
            error_status_mapping,
        })
    }
}

/// PostgreSQL has no sensible default location, so its URL must be set.
fn require_database_url(
    storage_backend: &str,
    database_url: Option<String>,
) -> Result<Option<String>, ConfigError> {
    match (storage_backend, database_url) {
        ("postgres", None) => Err(ConfigError::EnvVarRequired("DATABASE_URL".to_string())),
        (_, database_url) => Ok(database_url),
    }
}

/// Get application version from build environment
pub fn version() -> Result<String> {
    option_env!("GIT_HASH")
        .or(option_env!("CARGO_PKG_VERSION"))
        .map(|val| val.to_string())
        .ok_or(ConfigError::VersionNotSet.into())
}

pub(crate) fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn default_env(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default_value.to_string())
}

impl TryFrom<String> for HttpPort {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Ok(Self(8080))
        } else {
            value
                .parse::<u16>()
                .map(Self)
                .map_err(|err| ConfigError::PortParsingFailed(err).into())
        }
    }
}

impl AsRef<u16> for HttpPort {
    fn as_ref(&self) -> &u16 {
        &self.0
    }
}

impl TryFrom<String> for StorageTimeout {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self(Duration::from_secs(5)));
        }
        duration_str::parse(&value)
            .map(Self)
            .map_err(|err| ConfigError::DurationParsingFailed(value, err.to_string()))
    }
}

impl AsRef<Duration> for StorageTimeout {
    fn as_ref(&self) -> &Duration {
        &self.0
    }
}

impl TryFrom<String> for ErrorStatusMapping {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "" | "collapsed" => Ok(Self::Collapsed),
            "per-kind" | "per_kind" => Ok(Self::PerKind),
            _ => Err(ConfigError::UnknownErrorStatusMapping(value)),
        }
    }
}
