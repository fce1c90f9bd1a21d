// crates/data-integrate-dialects/src/strategies/vastbase.rs
// ============================================================================
// Module: Vastbase Strategy
// Description: Dialect strategy for Vastbase servers.
// Purpose: Reach Vastbase through its PostgreSQL-compatible protocol.
// Dependencies: async-trait, data-integrate-core, crate::session
// ============================================================================

//! ## Overview
//! Same wire behavior as KingbaseES; the dialect label selects the Vastbase
//! type catalog during synthesis.

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

/// Vastbase dialect strategy.
pub struct VastbaseStrategy {
    /// Shared connection state.
    core: StrategyCore<PostgresSession>,
}

impl VastbaseStrategy {
    /// Creates a disconnected strategy for `connection`.
    #[must_use]
    pub const fn new(connection: DatabaseConnection) -> Self {
        Self { core: StrategyCore::new(connection, POSTGRES_SYNTAX) }
    }
}

#[async_trait]
impl DialectStrategy for VastbaseStrategy {
    async fn connect(&mut self) -> Result<(), DialectError> {
        let session = PostgresSession::connect(self.core.connection()).await?;
        self.core.attach(session);
        Ok(())
    }

    fn session(&self) -> Result<&dyn SqlSession, DialectError> {
        self.core.session().map(|session| session as &dyn SqlSession)
    }

    fn dialect(&self) -> Dialect {
        Dialect::Vastbase
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
