// crates/data-integrate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Data Integrate Interfaces
// Description: Contracts for databases, producers, catalogs, streams, and sinks.
// Purpose: Keep the orchestrator independent of drivers and transports.
// Dependencies: async-trait, serde, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The orchestrator reaches every external system through the traits below.
//! Dialect strategies own database sessions; catalog and streaming clients own
//! their transports. Implementations must not branch on anything other than
//! their own configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::DatabaseConnection;
use crate::core::Dialect;
use crate::core::RunEvent;
use crate::core::SchemaDefinition;
use crate::core::UnsupportedDialect;

// ============================================================================
// SECTION: Database Sessions
// ============================================================================

/// Database errors surfaced by strategies and sessions.
#[derive(Debug, Error)]
pub enum DialectError {
    /// A session was requested before `connect` succeeded.
    #[error("database not connected")]
    NotConnected,
    /// Connecting or pinging failed.
    #[error("database connect failed: {0}")]
    Connect(String),
    /// A statement failed.
    #[error("database query failed: {0}")]
    Query(String),
    /// The dialect tag is unsupported.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedDialect),
}

/// Raw SQL session owned by a connected strategy.
#[async_trait]
pub trait SqlSession: Send + Sync {
    /// Executes a statement and returns affected rows.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Query`] when the statement fails.
    async fn execute(&self, sql: &str) -> Result<u64, DialectError>;

    /// Runs a query with positional text parameters and returns the first
    /// column of the first row as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Query`] when the query fails.
    async fn query_i64(&self, sql: &str, params: &[&str]) -> Result<Option<i64>, DialectError>;
}

/// Per-dialect database capability set.
///
/// # Invariants
/// - `cleanup` is idempotent and succeeds when the table is absent.
/// - Identifier quoting and catalog queries stay inside the implementation.
#[async_trait]
pub trait DialectStrategy: Send + Sync {
    /// Opens and verifies the database session.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Connect`] when the server is unreachable or
    /// rejects the credentials.
    async fn connect(&mut self) -> Result<(), DialectError>;

    /// Returns the raw session.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NotConnected`] before `connect` succeeds.
    fn session(&self) -> Result<&dyn SqlSession, DialectError>;

    /// Returns the dialect served by this strategy.
    fn dialect(&self) -> Dialect;

    /// Returns the dialect label.
    fn dialect_name(&self) -> &'static str {
        self.dialect().as_str()
    }

    /// Returns the connection profile.
    fn connection_info(&self) -> &DatabaseConnection;

    /// Quotes an identifier for this dialect.
    fn quote_identifier(&self, name: &str) -> String;

    /// Drops `table` if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError`] when the drop statement fails.
    async fn cleanup(&self, table: &str) -> Result<(), DialectError>;

    /// Counts rows in `table`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError`] when the count query fails.
    async fn row_count(&self, table: &str) -> Result<u64, DialectError>;

    /// Reports whether `table` exists in the current database or schema.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError`] when the catalog query fails.
    async fn table_exists(&self, table: &str) -> Result<bool, DialectError>;

    /// Releases the session.
    async fn close(&mut self) {}
}

// ============================================================================
// SECTION: Data Producer
// ============================================================================

/// Bulk producer errors.
#[derive(Debug, Error)]
pub enum ProducerError {
    /// Database statement failed.
    #[error(transparent)]
    Database(#[from] DialectError),
    /// Value generation failed.
    #[error("data generation failed: {0}")]
    Generation(String),
}

/// Creates a table from a schema and fills it with synthetic rows.
#[async_trait]
pub trait DataProducer: Send + Sync {
    /// Creates `schema.table_name` and inserts `schema.row_count` rows.
    ///
    /// Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError`] when DDL or inserts fail.
    async fn produce(
        &self,
        strategy: &dyn DialectStrategy,
        schema: &SchemaDefinition,
    ) -> Result<u64, ProducerError>;
}

// ============================================================================
// SECTION: Asset Catalog
// ============================================================================

/// Catalog data source registration payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceRequest {
    /// Data source name.
    pub name: String,
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Catalog dialect code.
    pub db_type: i32,
    /// Database user.
    pub username: String,
    /// Database password.
    pub password: String,
    /// Database name.
    pub database_name: String,
}

impl fmt::Debug for DataSourceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceRequest")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db_type", &self.db_type)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database_name", &self.database_name)
            .finish()
    }
}

/// Catalog asset registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRequest {
    /// Display asset name.
    pub asset_name: String,
    /// English asset name.
    pub asset_en_name: String,
    /// Owning data source id.
    pub data_source_id: i64,
    /// Database name.
    pub database_name: String,
    /// Table name.
    pub table_name: String,
}

/// Catalog registration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Assigned id.
    pub id: i64,
    /// Whether the catalog accepted the request.
    pub success: bool,
    /// Catalog message.
    #[serde(default)]
    pub message: String,
}

/// Catalog client errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure.
    #[error("catalog transport error: {0}")]
    Transport(String),
    /// The catalog rejected the request.
    #[error("catalog rejected request: {0}")]
    Rejected(String),
    /// The response could not be decoded.
    #[error("catalog response invalid: {0}")]
    InvalidResponse(String),
}

/// Asset-catalog collaborator.
///
/// Registration is not idempotent: retries may create duplicates.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Creates a data source.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport or decoding failures.
    async fn create_data_source(
        &self,
        request: &DataSourceRequest,
    ) -> Result<Registration, CatalogError>;

    /// Creates an asset bound to a data source.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport or decoding failures.
    async fn create_asset(&self, request: &AssetRequest) -> Result<Registration, CatalogError>;

    /// Deletes a data source.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the deletion fails.
    async fn delete_data_source(&self, id: i64) -> Result<(), CatalogError>;
}

// ============================================================================
// SECTION: Streaming Data
// ============================================================================

/// Streaming read request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamReadRequest {
    /// Registered asset name.
    pub asset_name: String,
    /// Chain identifier.
    pub chain_info_id: String,
    /// Request identifier.
    pub request_id: String,
    /// Columns to read; empty reads all.
    pub db_fields: Vec<String>,
}

/// Streaming write request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamWriteRequest {
    /// Registered asset name.
    pub asset_name: String,
    /// Request identifier.
    pub request_id: String,
    /// Target table.
    pub table_name: String,
    /// Rows to write.
    pub row_count: u64,
}

/// Streaming client errors.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Transport failure.
    #[error("stream transport error: {0}")]
    Transport(String),
    /// The data service rejected the request.
    #[error("stream rejected request: {0}")]
    Rejected(String),
}

/// Streaming data collaborator.
#[async_trait]
pub trait StreamingClient: Send + Sync {
    /// Reads an asset and returns the number of rows streamed.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError`] when the stream fails.
    async fn read_row_count(&self, request: &StreamReadRequest) -> Result<u64, StreamError>;

    /// Writes synthetic rows into an asset and returns rows accepted.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError`] when the write fails.
    async fn write_rows(&self, request: &StreamWriteRequest) -> Result<u64, StreamError>;
}

// ============================================================================
// SECTION: Event Sink
// ============================================================================

/// Sink for structured run events.
pub trait RunEventSink: Send + Sync {
    /// Records an event. Failures are swallowed.
    fn record(&self, event: &RunEvent);
}
