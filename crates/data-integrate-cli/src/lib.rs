// crates/data-integrate-cli/src/lib.rs
// ============================================================================
// Module: Data Integrate CLI Library
// Description: Report rendering and collaborator wiring for the CLI binary.
// Purpose: Keep testable CLI logic outside the entry point.
// Dependencies: data-integrate-{core,config,clients,dialects}, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`report`] renders run reports as text or JSON and maps them to exit
//! codes. [`wiring`] turns the base configuration into event sinks and
//! service clients.

pub mod report;
pub mod wiring;
