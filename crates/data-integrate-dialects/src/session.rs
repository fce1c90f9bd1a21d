// crates/data-integrate-dialects/src/session.rs
// ============================================================================
// Module: Wire Sessions
// Description: MySQL-protocol and PostgreSQL-protocol SQL sessions.
// Purpose: Implement `SqlSession` over mysql_async and tokio-postgres.
// Dependencies: async-trait, mysql_async, tokio, tokio-postgres, data-integrate-core
// ============================================================================

//! ## Overview
//! GBase speaks the MySQL protocol and KingbaseES and Vastbase speak the
//! PostgreSQL protocol, so two session types cover all four dialects.
//! Sessions are opened by strategies and verified with a round trip before
//! they are handed out.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use data_integrate_core::DatabaseConnection;
use data_integrate_core::DialectError;
use data_integrate_core::SqlSession;
use mysql_async::Params;
use mysql_async::Pool;
use mysql_async::Value;
use mysql_async::prelude::Queryable;
use tokio::task::JoinHandle;
use tokio_postgres::Client;
use tokio_postgres::NoTls;
use tokio_postgres::types::ToSql;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Connect timeout for PostgreSQL-protocol servers.
pub const POSTGRES_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// SECTION: MySQL Protocol
// ============================================================================

/// Pooled MySQL-protocol session.
pub struct MySqlSession {
    /// Connection pool bound to one database.
    pool: Pool,
}

impl MySqlSession {
    /// Opens a pool for `connection` and verifies it with a ping.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Connect`] when the server cannot be reached.
    pub async fn connect(connection: &DatabaseConnection) -> Result<Self, DialectError> {
        let opts = mysql_async::OptsBuilder::default()
            .ip_or_hostname(connection.host.clone())
            .tcp_port(connection.port)
            .user(Some(connection.user.clone()))
            .pass(Some(connection.password.clone()))
            .db_name(Some(connection.database.clone()));
        let pool = Pool::new(opts);
        let mut conn = pool.get_conn().await.map_err(connect_error)?;
        conn.ping().await.map_err(connect_error)?;
        drop(conn);
        Ok(Self { pool })
    }

    /// Disconnects every pooled connection.
    pub async fn disconnect(self) {
        let _ = self.pool.disconnect().await;
    }
}

#[async_trait]
impl SqlSession for MySqlSession {
    async fn execute(&self, sql: &str) -> Result<u64, DialectError> {
        let mut conn = self.pool.get_conn().await.map_err(query_error)?;
        conn.query_drop(sql).await.map_err(query_error)?;
        Ok(conn.affected_rows())
    }

    async fn query_i64(&self, sql: &str, params: &[&str]) -> Result<Option<i64>, DialectError> {
        let mut conn = self.pool.get_conn().await.map_err(query_error)?;
        let params = if params.is_empty() {
            Params::Empty
        } else {
            Params::Positional(
                params.iter().map(|param| Value::Bytes(param.as_bytes().to_vec())).collect(),
            )
        };
        conn.exec_first::<i64, _, _>(sql, params).await.map_err(query_error)
    }
}

// ============================================================================
// SECTION: PostgreSQL Protocol
// ============================================================================

/// Single-connection PostgreSQL-protocol session.
pub struct PostgresSession {
    /// Query client.
    client: Client,
    /// Task driving the connection; aborted on drop.
    connection: JoinHandle<()>,
}

impl PostgresSession {
    /// Connects to `connection` and verifies the session with `SELECT 1`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Connect`] when the server cannot be reached.
    pub async fn connect(connection: &DatabaseConnection) -> Result<Self, DialectError> {
        let (client, driver) = tokio_postgres::Config::new()
            .host(&connection.host)
            .port(connection.port)
            .user(&connection.user)
            .password(&connection.password)
            .dbname(&connection.database)
            .connect_timeout(POSTGRES_CONNECT_TIMEOUT)
            .connect(NoTls)
            .await
            .map_err(connect_error)?;
        let connection = tokio::spawn(async move {
            let _ = driver.await;
        });
        let session = Self { client, connection };
        session.client.simple_query("SELECT 1").await.map_err(connect_error)?;
        Ok(session)
    }
}

impl Drop for PostgresSession {
    fn drop(&mut self) {
        self.connection.abort();
    }
}

#[async_trait]
impl SqlSession for PostgresSession {
    async fn execute(&self, sql: &str) -> Result<u64, DialectError> {
        self.client.execute(sql, &[]).await.map_err(query_error)
    }

    async fn query_i64(&self, sql: &str, params: &[&str]) -> Result<Option<i64>, DialectError> {
        let params: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|param| param as &(dyn ToSql + Sync)).collect();
        let row = self.client.query_opt(sql, &params).await.map_err(query_error)?;
        row.map(|row| row.try_get::<_, i64>(0)).transpose().map_err(query_error)
    }
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

/// Maps a driver error raised while connecting.
fn connect_error(err: impl std::fmt::Display) -> DialectError {
    DialectError::Connect(err.to_string())
}

/// Maps a driver error raised by a statement.
fn query_error(err: impl std::fmt::Display) -> DialectError {
    DialectError::Query(err.to_string())
}
