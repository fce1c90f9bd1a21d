// crates/data-integrate-clients/src/lib.rs
// ============================================================================
// Module: Data Integrate Clients
// Description: Catalog and streaming service clients.
// Purpose: Implement the service-facing interfaces over HTTP/JSON.
// Dependencies: async-trait, reqwest, serde
// ============================================================================

//! ## Overview
//! Clients for the two external services a harness run talks to: the asset
//! catalog, where tables are registered as data sources and assets, and the
//! data service, which streams registered assets.

pub mod catalog;
pub mod http;
pub mod streaming;

pub use catalog::HttpCatalogClient;
pub use catalog::OFFLINE_ASSET_ID;
pub use catalog::OFFLINE_DATA_SOURCE_ID;
pub use catalog::OfflineCatalogClient;
pub use http::HttpEndpoint;
pub use http::HttpFailure;
pub use streaming::HttpStreamingClient;
