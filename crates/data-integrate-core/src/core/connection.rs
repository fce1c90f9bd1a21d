// crates/data-integrate-core/src/core/connection.rs
// ============================================================================
// Module: Database Connections
// Description: Resolved connection profile for one target database.
// Purpose: Carry host, credentials, and database name into dialect strategies.
// Dependencies: serde, crate::core::dialect
// ============================================================================

//! ## Overview
//! A [`DatabaseConnection`] is produced by merging a template's database
//! selection with a base-configuration profile. The dialect is kept as the
//! tag text so unsupported tags surface at strategy construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::dialect::Dialect;
use crate::core::dialect::UnsupportedDialect;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Connection profile for a single database.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConnection {
    /// Profile name.
    pub name: String,
    /// Dialect tag.
    pub dialect: String,
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password.
    #[serde(default)]
    pub password: String,
    /// Database (or schema) name.
    pub database: String,
}

impl DatabaseConnection {
    /// Parses the dialect tag.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedDialect`] when the tag is unknown.
    pub fn parsed_dialect(&self) -> Result<Dialect, UnsupportedDialect> {
        Dialect::from_tag(&self.dialect)
    }

    /// Returns a copy with the database name replaced.
    #[must_use]
    pub fn with_database(&self, database: &str) -> Self {
        Self { database: database.to_string(), ..self.clone() }
    }

    /// Returns `user@host:port/database` without the password.
    #[must_use]
    pub fn redacted(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}

impl fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConnection")
            .field("name", &self.name)
            .field("dialect", &self.dialect)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}
