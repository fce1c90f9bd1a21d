// crates/data-integrate-cli/src/wiring.rs
// ============================================================================
// Module: Collaborator Wiring
// Description: Builds sinks and service clients from the base configuration.
// Purpose: Translate configuration into trait objects for the orchestrator.
// Dependencies: data-integrate-{core,config,clients,dialects}, thiserror
// ============================================================================

//! ## Overview
//! Every collaborator the orchestrator needs, except the dialect strategy,
//! is built here. The strategy comes from
//! [`data_integrate_dialects::create_strategy`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::time::Duration;

use data_integrate_clients::HttpCatalogClient;
use data_integrate_clients::HttpStreamingClient;
use data_integrate_clients::OfflineCatalogClient;
use data_integrate_config::CatalogConfig;
use data_integrate_config::CatalogMode;
use data_integrate_config::DataServiceConfig;
use data_integrate_config::HarnessConfig;
use data_integrate_config::LogSink;
use data_integrate_config::LoggingConfig;
use data_integrate_core::CatalogClient;
use data_integrate_core::FileEventSink;
use data_integrate_core::NoopEventSink;
use data_integrate_core::RunEventSink;
use data_integrate_core::StderrEventSink;
use data_integrate_dialects::BulkInsertProducer;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while building collaborators.
#[derive(Debug, Error)]
pub enum WiringError {
    /// The event log file could not be opened.
    #[error("event log {path} could not be opened: {message}")]
    EventLog {
        /// Configured path.
        path: String,
        /// I/O error text.
        message: String,
    },
    /// A service client could not be built.
    #[error("{0}")]
    Client(String),
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds the run event sink selected by `[logging]`.
///
/// # Errors
///
/// Returns [`WiringError::EventLog`] when the file sink cannot open its path.
pub fn build_event_sink(logging: &LoggingConfig) -> Result<Box<dyn RunEventSink>, WiringError> {
    match logging.sink {
        LogSink::Stderr => Ok(Box::new(StderrEventSink)),
        LogSink::None => Ok(Box::new(NoopEventSink)),
        LogSink::File => {
            let path = logging.path.as_deref().unwrap_or_default().trim();
            let sink = FileEventSink::new(Path::new(path)).map_err(|err| {
                WiringError::EventLog { path: path.to_string(), message: err.to_string() }
            })?;
            Ok(Box::new(sink))
        }
    }
}

/// Builds the catalog client selected by `[catalog]`.
///
/// # Errors
///
/// Returns [`WiringError::Client`] when the HTTP client cannot be built.
pub fn build_catalog(catalog: &CatalogConfig) -> Result<Box<dyn CatalogClient>, WiringError> {
    match catalog.mode {
        CatalogMode::Offline => Ok(Box::new(OfflineCatalogClient::new())),
        CatalogMode::Http => {
            let timeout = Duration::from_millis(catalog.timeout_ms);
            HttpCatalogClient::new(&catalog.host, catalog.port, timeout)
                .map(|client| Box::new(client) as Box<dyn CatalogClient>)
                .map_err(|err| WiringError::Client(err.to_string()))
        }
    }
}

/// Builds the streaming client when `[data_service]` is configured.
///
/// # Errors
///
/// Returns [`WiringError::Client`] when the HTTP client cannot be built.
pub fn build_streaming(
    data_service: Option<&DataServiceConfig>,
) -> Result<Option<HttpStreamingClient>, WiringError> {
    data_service
        .map(|service| {
            HttpStreamingClient::new(
                &service.host,
                service.port,
                Duration::from_millis(service.timeout_ms),
            )
            .map_err(|err| WiringError::Client(err.to_string()))
        })
        .transpose()
}

/// Builds the bulk producer; `seed_override` wins over the configured seed.
#[must_use]
pub fn build_producer(config: &HarnessConfig, seed_override: Option<u64>) -> BulkInsertProducer {
    BulkInsertProducer::new(
        config.synthesis.insert_batch_size,
        seed_override.or(config.synthesis.seed),
    )
}
