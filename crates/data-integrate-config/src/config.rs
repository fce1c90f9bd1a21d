// crates/data-integrate-config/src/config.rs
// ============================================================================
// Module: Data Integrate Configuration
// Description: Base configuration loading, validation, and database selection.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: data-integrate-core, serde, toml
// ============================================================================

//! ## Overview
//! The base configuration lists named database profiles plus catalog and
//! data-service endpoints. It is loaded from TOML with strict size and path
//! limits and validated before use. [`HarnessConfig::resolve_database`]
//! applies the template merge rule: match by `(name, dialect)` when the
//! template names a database, otherwise take the first profile of the dialect.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;
use std::env;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use data_integrate_core::DatabaseConnection;
use data_integrate_core::DatabaseTarget;
use data_integrate_core::Dialect;
use data_integrate_core::HintPolicy;
use data_integrate_core::NamespaceAllocator;
use data_integrate_core::OrchestratorConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::limits::InputError;
use crate::limits::MAX_TOTAL_PATH_LENGTH;
use crate::limits::read_bounded_utf8;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "data-integrate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DATA_INTEGRATE_CONFIG";
/// Maximum number of database profiles.
pub const MAX_DATABASES: usize = 256;
/// Largest accepted insert batch.
pub const MAX_INSERT_BATCH_SIZE: usize = 10_000;
/// Default insert batch size.
pub const DEFAULT_INSERT_BATCH_SIZE: usize = 500;
/// Default run deadline (two hours).
pub const DEFAULT_DEADLINE_SECS: u64 = 7200;
/// Default cleanup bound.
pub const DEFAULT_CLEANUP_TIMEOUT_MS: u64 = 30_000;
/// Default catalog request timeout.
pub const DEFAULT_CATALOG_TIMEOUT_MS: u64 = 10_000;
/// Default data-service request timeout.
pub const DEFAULT_DATA_SERVICE_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Base configuration for the harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Named database profiles.
    #[serde(default)]
    pub databases: Vec<DatabaseConnection>,
    /// Asset-catalog endpoint.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Optional streaming data-service endpoint.
    #[serde(default)]
    pub data_service: Option<DataServiceConfig>,
    /// Run limits.
    #[serde(default)]
    pub run: RunConfig,
    /// Schema synthesis settings.
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Run event logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog client selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogMode {
    /// HTTP/JSON catalog service.
    #[default]
    Http,
    /// In-process client returning fixed ids.
    Offline,
}

/// Asset-catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Client selection.
    #[serde(default)]
    pub mode: CatalogMode,
    /// Service host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Service port.
    #[serde(default = "default_catalog_port")]
    pub port: u16,
    /// Request timeout in milliseconds.
    #[serde(default = "default_catalog_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            mode: CatalogMode::Http,
            host: default_host(),
            port: default_catalog_port(),
            timeout_ms: DEFAULT_CATALOG_TIMEOUT_MS,
        }
    }
}

/// Streaming data-service endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataServiceConfig {
    /// Service host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Service port.
    pub port: u16,
    /// Request timeout in milliseconds.
    #[serde(default = "default_data_service_timeout_ms")]
    pub timeout_ms: u64,
}

/// Run limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Overall run deadline in seconds.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    /// Cleanup bound in milliseconds.
    #[serde(default = "default_cleanup_timeout_ms")]
    pub cleanup_timeout_ms: u64,
    /// Prefix for generated namespaces.
    #[serde(default = "default_namespace_prefix")]
    pub namespace_prefix: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            deadline_secs: DEFAULT_DEADLINE_SECS,
            cleanup_timeout_ms: DEFAULT_CLEANUP_TIMEOUT_MS,
            namespace_prefix: default_namespace_prefix(),
        }
    }
}

/// Schema synthesis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Treatment of unrecognized type hints.
    #[serde(default)]
    pub hint_policy: HintPolicy,
    /// Fixed RNG seed for reproducible schemas.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Rows per INSERT statement.
    #[serde(default = "default_insert_batch_size")]
    pub insert_batch_size: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            hint_policy: HintPolicy::Strict,
            seed: None,
            insert_batch_size: DEFAULT_INSERT_BATCH_SIZE,
        }
    }
}

/// Run event sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSink {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Discard events.
    None,
}

/// Run event logging.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: LogSink,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

impl HarnessConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        let content = read_bounded_utf8(&resolved).map_err(ConfigError::from)?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.databases.is_empty() {
            return Err(ConfigError::Invalid("at least one database is required".to_string()));
        }
        if self.databases.len() > MAX_DATABASES {
            return Err(ConfigError::Invalid("too many database profiles".to_string()));
        }
        let mut seen = HashSet::new();
        for database in &self.databases {
            validate_database(database)?;
            let dialect = database.parsed_dialect().map_err(|err| invalid(err.to_string()))?;
            if !seen.insert((database.name.as_str(), dialect)) {
                return Err(invalid(format!(
                    "duplicate database profile {} ({dialect})",
                    database.name
                )));
            }
        }
        validate_endpoint("catalog", &self.catalog.host, self.catalog.port)?;
        if let Some(data_service) = &self.data_service {
            validate_endpoint("data_service", &data_service.host, data_service.port)?;
        }
        if self.run.deadline_secs == 0 {
            return Err(invalid("run.deadline_secs must be at least 1".to_string()));
        }
        if self.run.cleanup_timeout_ms == 0 {
            return Err(invalid("run.cleanup_timeout_ms must be non-zero".to_string()));
        }
        if !(1 ..= MAX_INSERT_BATCH_SIZE).contains(&self.synthesis.insert_batch_size) {
            return Err(invalid(format!(
                "synthesis.insert_batch_size must be within 1..={MAX_INSERT_BATCH_SIZE}"
            )));
        }
        if self.logging.sink == LogSink::File {
            match self.logging.path.as_deref().map(str::trim) {
                Some(path) if !path.is_empty() => {
                    if path.len() > MAX_TOTAL_PATH_LENGTH {
                        return Err(invalid("logging.path exceeds max length".to_string()));
                    }
                }
                _ => return Err(invalid("logging.path is required for the file sink".to_string())),
            }
        }
        Ok(())
    }

    /// Resolves the connection profile for a template's database target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the dialect is unsupported or no
    /// profile matches. A named lookup never falls back to the dialect rule.
    pub fn resolve_database(
        &self,
        target: &DatabaseTarget,
    ) -> Result<DatabaseConnection, ConfigError> {
        let dialect = Dialect::from_tag(&target.dialect).map_err(|err| invalid(err.to_string()))?;
        let matches_dialect = |profile: &&DatabaseConnection| {
            profile.parsed_dialect().is_ok_and(|candidate| candidate == dialect)
        };
        match target.name.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => self
                .databases
                .iter()
                .filter(matches_dialect)
                .find(|profile| profile.name == name)
                .map(|profile| profile.with_database(name))
                .ok_or_else(|| invalid(format!("no database profile named {name} for {dialect}"))),
            None => self
                .databases
                .iter()
                .find(matches_dialect)
                .cloned()
                .ok_or_else(|| invalid(format!("no database profile for {dialect}"))),
        }
    }

    /// Builds orchestrator settings.
    #[must_use]
    pub fn orchestrator_config(&self, seed_override: Option<u64>) -> OrchestratorConfig {
        OrchestratorConfig {
            deadline: Some(Duration::from_secs(self.run.deadline_secs)),
            cleanup_timeout: Duration::from_millis(self.run.cleanup_timeout_ms),
            hint_policy: self.synthesis.hint_policy,
            seed: seed_override.or(self.synthesis.seed),
        }
    }

    /// Builds the namespace allocator for the configured prefix.
    #[must_use]
    pub fn namespace_allocator(&self) -> NamespaceAllocator {
        NamespaceAllocator::new(&self.run.namespace_prefix)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<InputError> for ConfigError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Io(message) => Self::Io(message),
            InputError::Invalid(message) => Self::Invalid(format!("config {message}")),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates one database profile.
fn validate_database(database: &DatabaseConnection) -> Result<(), ConfigError> {
    if database.name.trim().is_empty() {
        return Err(invalid("databases.name must be non-empty".to_string()));
    }
    validate_endpoint(&format!("databases.{}", database.name), &database.host, database.port)?;
    if database.user.trim().is_empty() {
        return Err(invalid(format!("databases.{}.user must be non-empty", database.name)));
    }
    if database.database.trim().is_empty() {
        return Err(invalid(format!("databases.{}.database must be non-empty", database.name)));
    }
    Ok(())
}

/// Validates a host/port pair.
fn validate_endpoint(field: &str, host: &str, port: u16) -> Result<(), ConfigError> {
    if host.trim().is_empty() {
        return Err(invalid(format!("{field}.host must be non-empty")));
    }
    if port == 0 {
        return Err(invalid(format!("{field}.port must be non-zero")));
    }
    Ok(())
}

/// Wraps a message as [`ConfigError::Invalid`].
const fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

/// Serde default for hosts.
fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Serde default for the catalog port.
const fn default_catalog_port() -> u16 {
    9090
}

/// Serde default for the catalog timeout.
const fn default_catalog_timeout_ms() -> u64 {
    DEFAULT_CATALOG_TIMEOUT_MS
}

/// Serde default for the data-service timeout.
const fn default_data_service_timeout_ms() -> u64 {
    DEFAULT_DATA_SERVICE_TIMEOUT_MS
}

/// Serde default for the run deadline.
const fn default_deadline_secs() -> u64 {
    DEFAULT_DEADLINE_SECS
}

/// Serde default for the cleanup bound.
const fn default_cleanup_timeout_ms() -> u64 {
    DEFAULT_CLEANUP_TIMEOUT_MS
}

/// Serde default for the namespace prefix.
fn default_namespace_prefix() -> String {
    "test".to_string()
}

/// Serde default for the insert batch size.
const fn default_insert_batch_size() -> usize {
    DEFAULT_INSERT_BATCH_SIZE
}
