// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for live-database system tests.
// Purpose: Provide database fixtures, readiness probes, and run builders.
// Dependencies: system-tests, data-integrate-core, data-integrate-dialects
// ============================================================================

//! ## Overview
//! Database fixtures start disposable servers (or adopt configured ones),
//! readiness probes wait for them, and run builders assemble templates and
//! collaborators the same way the CLI does.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod infra;
pub mod readiness;
pub mod runs;
