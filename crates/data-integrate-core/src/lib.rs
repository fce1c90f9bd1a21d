// crates/data-integrate-core/src/lib.rs
// ============================================================================
// Module: Data Integrate Core Library
// Description: Public API surface for the data-integration test engine.
// Purpose: Expose core types, interfaces, and runtime orchestration.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Data Integrate core reconciles an externally owned table against a
//! declarative template, registers it with an asset catalog, and validates
//! row counts within a tolerance. Drivers and transports plug in through
//! [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::AssetRequest;
pub use interfaces::CatalogClient;
pub use interfaces::CatalogError;
pub use interfaces::DataProducer;
pub use interfaces::DataSourceRequest;
pub use interfaces::DialectError;
pub use interfaces::DialectStrategy;
pub use interfaces::ProducerError;
pub use interfaces::Registration;
pub use interfaces::RunEventSink;
pub use interfaces::SqlSession;
pub use interfaces::StreamError;
pub use interfaces::StreamReadRequest;
pub use interfaces::StreamWriteRequest;
pub use interfaces::StreamingClient;
pub use runtime::Collaborators;
pub use runtime::FileEventSink;
pub use runtime::NoopEventSink;
pub use runtime::Orchestrator;
pub use runtime::OrchestratorConfig;
pub use runtime::RowCountValidator;
pub use runtime::RunError;
pub use runtime::StderrEventSink;
