// crates/data-integrate-core/src/core/mod.rs
// ============================================================================
// Module: Data Integrate Core Types
// Description: Dialects, type tables, schemas, templates, and reports.
// Purpose: Provide stable, serializable types shared by every harness crate.
// Dependencies: rand, serde, time
// ============================================================================

//! ## Overview
//! Core types are pure: nothing here touches a database or the network.
//! Randomness enters only through caller-supplied RNG handles.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod connection;
pub mod dialect;
pub mod events;
pub mod namespace;
pub mod report;
pub mod schema;
pub mod template;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use connection::DatabaseConnection;
pub use dialect::ALL_DIALECTS;
pub use dialect::Dialect;
pub use dialect::UnsupportedDialect;
pub use events::RunEvent;
pub use events::RunEventKind;
pub use namespace::NamespaceAllocator;
pub use namespace::asset_name;
pub use namespace::sanitize_identifier;
pub use namespace::table_name;
pub use report::AssertionResult;
pub use report::ReconcileOutcome;
pub use report::RunReport;
pub use report::Verdict;
pub use schema::FieldSpec;
pub use schema::HintPolicy;
pub use schema::MAX_FIELDS;
pub use schema::MIN_FIELDS;
pub use schema::SchemaDefinition;
pub use schema::SynthesisError;
pub use schema::SynthesisRequest;
pub use schema::clamp_field_count;
pub use schema::resolve_hints;
pub use schema::synthesize;
pub use template::Assertion;
pub use template::AssertionKind;
pub use template::DEFAULT_TOLERANCE_PERCENT;
pub use template::DataRequirements;
pub use template::DatabaseTarget;
pub use template::RunPlan;
pub use template::SchemaRequirements;
pub use template::TestTemplate;
pub use types::ColumnType;
pub use types::TypeCatalog;
pub use types::TypeCategory;
pub use types::TypeHint;
pub use types::type_catalog;
