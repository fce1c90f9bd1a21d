// crates/data-integrate-dialects/src/strategies/gbase.rs
// ============================================================================
// Module: GBase Strategy
// Description: Dialect strategy for GBase servers.
// Purpose: Reach GBase through its MySQL-compatible protocol.
// Dependencies: async-trait, data-integrate-core, crate::session
// ============================================================================

//! ## Overview
//! GBase accepts MySQL clients, so this strategy shares the MySQL session and
//! syntax. Only the dialect label and its type catalog differ.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use data_integrate_core::DatabaseConnection;
use data_integrate_core::Dialect;
use data_integrate_core::DialectError;
use data_integrate_core::DialectStrategy;
use data_integrate_core::SqlSession;

use crate::session::MySqlSession;
use crate::strategies::StrategyCore;
use crate::syntax::MYSQL_SYNTAX;

// ============================================================================
// SECTION: Strategy
// ============================================================================

/// GBase dialect strategy.
pub struct GbaseStrategy {
    /// Shared connection state.
    core: StrategyCore<MySqlSession>,
}

impl GbaseStrategy {
    /// Creates a disconnected strategy for `connection`.
    #[must_use]
    pub const fn new(connection: DatabaseConnection) -> Self {
        Self { core: StrategyCore::new(connection, MYSQL_SYNTAX) }
    }
}

#[async_trait]
impl DialectStrategy for GbaseStrategy {
    async fn connect(&mut self) -> Result<(), DialectError> {
        let session = MySqlSession::connect(self.core.connection()).await?;
        self.core.attach(session);
        Ok(())
    }

    fn session(&self) -> Result<&dyn SqlSession, DialectError> {
        self.core.session().map(|session| session as &dyn SqlSession)
    }

    fn dialect(&self) -> Dialect {
        Dialect::Gbase
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
        if let Some(session) = self.core.detach() {
            session.disconnect().await;
        }
    }
}
