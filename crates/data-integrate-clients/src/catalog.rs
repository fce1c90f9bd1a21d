// crates/data-integrate-clients/src/catalog.rs
// ============================================================================
// Module: Catalog Clients
// Description: HTTP and offline implementations of `CatalogClient`.
// Purpose: Register data sources and assets for harness runs.
// Dependencies: async-trait, data-integrate-core, crate::http
// ============================================================================

//! ## Overview
//! [`HttpCatalogClient`] speaks JSON to the asset catalog:
//! `POST /v1/datasources`, `POST /v1/assets`, and
//! `DELETE /v1/datasources/{id}`. Both create calls answer with a
//! [`Registration`]. A 2xx answer with `success = false` is returned as-is so
//! the orchestrator can report the catalog's message.
//!
//! [`OfflineCatalogClient`] returns fixed ids without any network access.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use data_integrate_core::AssetRequest;
use data_integrate_core::CatalogClient;
use data_integrate_core::CatalogError;
use data_integrate_core::DataSourceRequest;
use data_integrate_core::Registration;

use crate::http::HttpEndpoint;
use crate::http::HttpFailure;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Data source collection path.
pub const DATA_SOURCES_PATH: &str = "/v1/datasources";
/// Asset collection path.
pub const ASSETS_PATH: &str = "/v1/assets";
/// Data source id returned by the offline client.
pub const OFFLINE_DATA_SOURCE_ID: i64 = 1000;
/// Asset id returned by the offline client.
pub const OFFLINE_ASSET_ID: i64 = 2000;

// ============================================================================
// SECTION: HTTP Client
// ============================================================================

/// JSON catalog client.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    /// Catalog endpoint.
    endpoint: HttpEndpoint,
}

impl HttpCatalogClient {
    /// Creates a client for the catalog at `host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] when the HTTP client cannot be built.
    pub fn new(host: &str, port: u16, timeout: Duration) -> Result<Self, CatalogError> {
        let endpoint = HttpEndpoint::new(host, port, timeout).map_err(catalog_error)?;
        Ok(Self { endpoint })
    }

    /// Returns the catalog base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn create_data_source(
        &self,
        request: &DataSourceRequest,
    ) -> Result<Registration, CatalogError> {
        self.endpoint.post_json(DATA_SOURCES_PATH, request).await.map_err(catalog_error)
    }

    async fn create_asset(&self, request: &AssetRequest) -> Result<Registration, CatalogError> {
        self.endpoint.post_json(ASSETS_PATH, request).await.map_err(catalog_error)
    }

    async fn delete_data_source(&self, id: i64) -> Result<(), CatalogError> {
        self.endpoint.delete(&format!("{DATA_SOURCES_PATH}/{id}")).await.map_err(catalog_error)
    }
}

/// Maps an HTTP failure into the catalog error space.
fn catalog_error(failure: HttpFailure) -> CatalogError {
    match failure {
        HttpFailure::Transport(message) => CatalogError::Transport(message),
        HttpFailure::Status { .. } => CatalogError::Rejected(failure.to_string()),
        HttpFailure::Decode(message) => CatalogError::InvalidResponse(message),
    }
}

// ============================================================================
// SECTION: Offline Client
// ============================================================================

/// Catalog stand-in for runs without a catalog service.
///
/// Every registration succeeds with [`OFFLINE_DATA_SOURCE_ID`] or
/// [`OFFLINE_ASSET_ID`]. Deleted ids are remembered for inspection.
#[derive(Debug, Default)]
pub struct OfflineCatalogClient {
    /// Ids passed to `delete_data_source`.
    deleted: Mutex<Vec<i64>>,
}

impl OfflineCatalogClient {
    /// Creates an offline client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the data source ids deleted so far.
    #[must_use]
    pub fn deleted(&self) -> Vec<i64> {
        self.deleted.lock().map(|ids| ids.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CatalogClient for OfflineCatalogClient {
    async fn create_data_source(
        &self,
        request: &DataSourceRequest,
    ) -> Result<Registration, CatalogError> {
        Ok(Registration {
            id: OFFLINE_DATA_SOURCE_ID,
            success: true,
            message: format!("offline data source {}", request.name),
        })
    }

    async fn create_asset(&self, request: &AssetRequest) -> Result<Registration, CatalogError> {
        Ok(Registration {
            id: OFFLINE_ASSET_ID,
            success: true,
            message: format!("offline asset {}", request.asset_name),
        })
    }

    async fn delete_data_source(&self, id: i64) -> Result<(), CatalogError> {
        if let Ok(mut deleted) = self.deleted.lock() {
            deleted.push(id);
        }
        Ok(())
    }
}
