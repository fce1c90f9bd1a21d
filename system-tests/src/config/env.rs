// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. An endpoint override skips
//! the matching container and points the suite at an existing server.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Default time allowed for a database to accept connections.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(120);

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Existing MySQL server as `host:port` (root password `secret`).
    MysqlEndpoint,
    /// Existing PostgreSQL server as `host:port` (user `postgres`, password `secret`).
    PostgresEndpoint,
    /// Readiness timeout override in seconds (positive integer).
    ReadyTimeoutSeconds,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MysqlEndpoint => "DATA_INTEGRATE_SYSTEM_MYSQL",
            Self::PostgresEndpoint => "DATA_INTEGRATE_SYSTEM_POSTGRES",
            Self::ReadyTimeoutSeconds => "DATA_INTEGRATE_SYSTEM_READY_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// External database endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
}

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Existing MySQL server.
    pub mysql: Option<Endpoint>,
    /// Existing PostgreSQL server.
    pub postgres: Option<Endpoint>,
    /// Readiness timeout override.
    pub ready_timeout: Option<Duration>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation.
    pub fn load() -> Result<Self, String> {
        let mysql = read_env_nonempty(SystemTestEnv::MysqlEndpoint.as_str())?
            .map(|value| parse_endpoint(SystemTestEnv::MysqlEndpoint.as_str(), &value))
            .transpose()?;
        let postgres = read_env_nonempty(SystemTestEnv::PostgresEndpoint.as_str())?
            .map(|value| parse_endpoint(SystemTestEnv::PostgresEndpoint.as_str(), &value))
            .transpose()?;
        let ready_timeout = read_env_nonempty(SystemTestEnv::ReadyTimeoutSeconds.as_str())?
            .map(|value| {
                parse_timeout_seconds(SystemTestEnv::ReadyTimeoutSeconds.as_str(), &value)
            })
            .transpose()?;
        Ok(Self { mysql, postgres, ready_timeout })
    }

    /// Returns the readiness timeout, falling back to the default.
    #[must_use]
    pub fn ready_timeout(&self) -> Duration {
        self.ready_timeout.unwrap_or(DEFAULT_READY_TIMEOUT)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses `host:port`.
fn parse_endpoint(name: &str, raw: &str) -> Result<Endpoint, String> {
    let (host, port) =
        raw.trim().rsplit_once(':').ok_or_else(|| format!("{name} must be host:port"))?;
    if host.is_empty() {
        return Err(format!("{name} must name a host"));
    }
    let port: u16 = port.parse().map_err(|_| format!("{name} must end with a port number"))?;
    if port == 0 {
        return Err(format!("{name} port must be non-zero"));
    }
    Ok(Endpoint { host: host.to_string(), port })
}

/// Parses a positive timeout value from an environment variable string.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
