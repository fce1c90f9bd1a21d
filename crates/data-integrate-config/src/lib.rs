// crates/data-integrate-config/src/lib.rs
// ============================================================================
// Module: Data Integrate Config Library
// Description: Base configuration and test template loading.
// Purpose: Single source of truth for data-integrate.toml and template semantics.
// Dependencies: data-integrate-core, serde, serde_yaml, toml
// ============================================================================

//! ## Overview
//! `data-integrate-config` loads the base configuration (database profiles,
//! service endpoints, run limits) from TOML and test templates from YAML.
//! Both loaders share the same hard limits and fail closed on invalid input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod limits;
pub mod template;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use template::TemplateError;
pub use template::load_template;
pub use template::normalize_template;
pub use template::parse_template;
pub use template::validate_template;
