// crates/data-integrate-core/src/runtime/mod.rs
// ============================================================================
// Module: Data Integrate Runtime
// Description: Reconciliation, validation, orchestration, and event sinks.
// Purpose: Execute templated runs against the interface contracts.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime is transport-agnostic: every database, catalog, and stream
//! call goes through [`crate::interfaces`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod orchestrator;
pub mod reconcile;
pub mod sinks;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use orchestrator::Collaborators;
pub use orchestrator::Orchestrator;
pub use orchestrator::OrchestratorConfig;
pub use orchestrator::RegisteredIds;
pub use orchestrator::RunContext;
pub use orchestrator::RunError;
pub use orchestrator::Services;
pub use reconcile::RECONCILE_TOLERANCE_PERCENT;
pub use reconcile::ReconcileDecision;
pub use reconcile::ReconcileError;
pub use reconcile::Reconciled;
pub use reconcile::decide;
pub use reconcile::reconcile;
pub use sinks::FileEventSink;
pub use sinks::NoopEventSink;
pub use sinks::StderrEventSink;
pub use validator::RowCountValidator;
pub use validator::effective_tolerance;
pub use validator::within_tolerance;
