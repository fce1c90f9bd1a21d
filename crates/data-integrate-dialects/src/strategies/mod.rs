// crates/data-integrate-dialects/src/strategies/mod.rs
// ============================================================================
// Module: Dialect Strategies
// Description: One `DialectStrategy` per supported database family.
// Purpose: Share connection state and catalog queries across strategies.
// Dependencies: data-integrate-core, crate::syntax
// ============================================================================

//! ## Overview
//! Each strategy owns a [`StrategyCore`] holding its connection profile,
//! syntax table, and the session opened by `connect`. Cleanup, counting, and
//! existence checks are written once against [`SqlSession`] and rendered
//! through the strategy's [`DialectSyntax`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use data_integrate_core::DatabaseConnection;
use data_integrate_core::DialectError;
use data_integrate_core::SqlSession;

use crate::syntax::DialectSyntax;

pub mod gbase;
pub mod kingbase;
pub mod mysql;
pub mod vastbase;

pub use gbase::GbaseStrategy;
pub use kingbase::KingbaseStrategy;
pub use mysql::MySqlStrategy;
pub use vastbase::VastbaseStrategy;

// ============================================================================
// SECTION: Shared Core
// ============================================================================

/// State shared by every strategy.
pub struct StrategyCore<S> {
    /// Connection profile.
    connection: DatabaseConnection,
    /// SQL syntax table.
    syntax: DialectSyntax,
    /// Session opened by `connect`.
    session: Option<S>,
}

impl<S: SqlSession> StrategyCore<S> {
    /// Creates a disconnected core.
    #[must_use]
    pub const fn new(connection: DatabaseConnection, syntax: DialectSyntax) -> Self {
        Self { connection, syntax, session: None }
    }

    /// Returns the connection profile.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Returns the syntax table.
    #[must_use]
    pub const fn syntax(&self) -> &DialectSyntax {
        &self.syntax
    }

    /// Installs an opened session, replacing any previous one.
    pub fn attach(&mut self, session: S) {
        self.session = Some(session);
    }

    /// Removes and returns the session.
    pub const fn detach(&mut self) -> Option<S> {
        self.session.take()
    }

    /// Returns the open session.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NotConnected`] before a session is attached.
    pub fn session(&self) -> Result<&S, DialectError> {
        self.session.as_ref().ok_or(DialectError::NotConnected)
    }

    /// Drops `table` if present.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError`] when the statement fails.
    pub async fn drop_table(&self, table: &str) -> Result<(), DialectError> {
        self.session()?.execute(&self.syntax.drop_table_sql(table)).await?;
        Ok(())
    }

    /// Counts rows in `table`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError`] when the query fails or reports a negative count.
    pub async fn count_rows(&self, table: &str) -> Result<u64, DialectError> {
        let count = self.session()?.query_i64(&self.syntax.count_rows_sql(table), &[]).await?;
        non_negative(count.unwrap_or(0))
    }

    /// Reports whether `table` exists in the current database or schema.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError`] when the catalog query fails.
    pub async fn exists(&self, table: &str) -> Result<bool, DialectError> {
        let count = self.session()?.query_i64(&self.syntax.table_exists_sql(), &[table]).await?;
        Ok(count.unwrap_or(0) > 0)
    }
}

/// Converts a driver count into `u64`.
fn non_negative(count: i64) -> Result<u64, DialectError> {
    u64::try_from(count).map_err(|_| DialectError::Query(format!("negative row count {count}")))
}
