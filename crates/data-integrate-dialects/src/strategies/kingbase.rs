// crates/data-integrate-dialects/src/strategies/kingbase.rs
// ============================================================================
// Module: KingbaseES Strategy
// Description: Dialect strategy for KingbaseES servers.
// Purpose: Double-quote quoting and `current_schema()` lookups over tokio-postgres.
// Dependencies: async-trait, data-integrate-core, crate::session
// ============================================================================

//! ## Overview
//! KingbaseES is reached through the PostgreSQL wire protocol. Tables live in
//! the login user's current schema.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use data_integrate_core::DatabaseConnection;
use data_integrate_core::Dialect;
use data_integrate_core::DialectError;
use data_integrate_core::DialectStrategy;
use data_integrate_core::SqlSession;

use crate::session::PostgresSession;
use crate::strategies::StrategyCore;
use crate::syntax::POSTGRES_SYNTAX;

// ============================================================================
// SECTION: Strategy
// ============================================================================

/// KingbaseES dialect strategy.
pub struct KingbaseStrategy {
    /// Shared connection state.
    core: StrategyCore<PostgresSession>,
}

impl KingbaseStrategy {
    /// Creates a disconnected strategy for `connection`.
    #[must_use]
    pub const fn new(connection: DatabaseConnection) -> Self {
        Self { core: StrategyCore::new(connection, POSTGRES_SYNTAX) }
    }
}

#[async_trait]
impl DialectStrategy for KingbaseStrategy {
    async fn connect(&mut self) -> Result<(), DialectError> {
        let session = PostgresSession::connect(self.core.connection()).await?;
        self.core.attach(session);
        Ok(())
    }

    fn session(&self) -> Result<&dyn SqlSession, DialectError> {
        self.core.session().map(|session| session as &dyn SqlSession)
    }

    fn dialect(&self) -> Dialect {
        Dialect::Kingbase
    }

    fn connection_info(&self) -> &DatabaseConnection {
        self.core.connection()
    }

    fn quote_identifier(&self, name: &str) -> String {
        self.core.syntax().quote_identifier(name)
    }

    async fn cleanup(&self, table: &str) -> Result<(), DialectError> {
        self.core.drop_table(table).await
    }

    async fn row_count(&self, table: &str) -> Result<u64, DialectError> {
        self.core.count_rows(table).await
    }

    async fn table_exists(&self, table: &str) -> Result<bool, DialectError> {
        self.core.exists(table).await
    }

    async fn close(&mut self) {
        drop(self.core.detach());
    }
}
