// crates/data-integrate-core/src/core/dialect.rs
// ============================================================================
// Module: Database Dialects
// Description: Closed set of supported database families.
// Purpose: Parse dialect tags once and expose stable labels and catalog codes.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A dialect tag arrives as free text from templates and base configuration.
//! [`Dialect::from_tag`] is the single place where tags are interpreted;
//! unknown tags fail with [`UnsupportedDialect`] rather than falling back to a
//! default family.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported database families.
///
/// # Invariants
/// - Variants are stable for tag parsing and catalog registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// MySQL (MySQL wire protocol).
    Mysql,
    /// KingbaseES (PostgreSQL wire protocol).
    Kingbase,
    /// GBase (MySQL wire protocol).
    Gbase,
    /// Vastbase (PostgreSQL wire protocol).
    Vastbase,
}

/// Ordered list of supported dialects.
pub const ALL_DIALECTS: &[Dialect] =
    &[Dialect::Mysql, Dialect::Kingbase, Dialect::Gbase, Dialect::Vastbase];

/// Error returned for dialect tags outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported database type: {0}")]
pub struct UnsupportedDialect(pub String);

impl Dialect {
    /// Parses a dialect tag (case-insensitive, surrounding whitespace ignored).
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedDialect`] when the tag names no supported family.
    pub fn from_tag(tag: &str) -> Result<Self, UnsupportedDialect> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::Mysql),
            "kingbase" => Ok(Self::Kingbase),
            "gbase" => Ok(Self::Gbase),
            "vastbase" => Ok(Self::Vastbase),
            _ => Err(UnsupportedDialect(tag.to_string())),
        }
    }

    /// Returns the canonical tag for the dialect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Kingbase => "kingbase",
            Self::Gbase => "gbase",
            Self::Vastbase => "vastbase",
        }
    }

    /// Returns the numeric database-type code used by the asset catalog.
    #[must_use]
    pub const fn catalog_code(self) -> i32 {
        match self {
            Self::Mysql => 1,
            Self::Kingbase => 2,
            Self::Gbase => 3,
            Self::Vastbase => 4,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
