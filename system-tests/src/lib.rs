// system-tests/src/lib.rs
// ============================================================================
// Module: Data Integrate System Tests Library
// Description: Shared configuration for live-database system tests.
// Purpose: Provide common settings for the system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts environment-driven settings used by the live-database
//! suites in `system-tests/tests`. Without overrides the suites start MySQL
//! and PostgreSQL containers through testcontainers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
