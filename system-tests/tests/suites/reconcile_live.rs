// system-tests/tests/suites/reconcile_live.rs
// ============================================================================
// Module: Live Reconcile Tests
// Description: End-to-end runs against real MySQL and PostgreSQL servers.
// Purpose: Verify create, keep, regenerate, and cleanup on live databases.
// Dependencies: system-tests helpers, data-integrate-core
// ============================================================================

//! ## Overview
//! Each test starts one server and exercises both dialects that speak its
//! wire protocol. Explicit tables are dropped before and after use so the
//! suite can rerun against a persistent endpoint.

use data_integrate_core::DatabaseConnection;
use data_integrate_core::ReconcileOutcome;
use system_tests::config::SystemTestConfig;

use crate::helpers::infra::DatabaseFixture;
use crate::helpers::readiness::wait_for_database_ready;
use crate::helpers::runs::connected;
use crate::helpers::runs::read_template;
use crate::helpers::runs::run_template;

const FRESH_ROWS: u64 = 450;
const STALE_ROWS: u64 = 3;
const TARGET_ROWS: u64 = 60;

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// Generated table: created, asserted, then dropped by cleanup.
async fn fresh_run_creates_and_cleans_up(connection: &DatabaseConnection) {
    let template = read_template(&connection.dialect, FRESH_ROWS, None, false);
    let report = run_template(connection, &template).await.expect("run succeeds");

    assert_eq!(report.reconcile, ReconcileOutcome::Created { rows: FRESH_ROWS });
    assert_eq!(report.results.len(), 1);
    assert!(report.results[0].passed, "{}", report.results[0].message);
    assert_eq!(report.results[0].actual, FRESH_ROWS);
    assert!(report.table_name.starts_with("sys_live_"));
    assert_eq!(report.data_source_id, 1000);

    let strategy = connected(connection).await;
    assert!(!strategy.table_exists(&report.table_name).await.unwrap());
}

/// Explicit table: stale contents are regenerated, then reused untouched.
async fn stale_table_regenerates_then_is_kept(connection: &DatabaseConnection) {
    let table = format!("sys_stale_{}", connection.dialect);
    let mut strategy = connected(connection).await;
    strategy.cleanup(&table).await.unwrap();
    let quoted = strategy.quote_identifier(&table);
    let session = strategy.session().unwrap();
    session.execute(&format!("CREATE TABLE {quoted} (id INT NOT NULL PRIMARY KEY)")).await.unwrap();
    session.execute(&format!("INSERT INTO {quoted} (id) VALUES (1), (2), (3)")).await.unwrap();
    assert_eq!(strategy.row_count(&table).await.unwrap(), STALE_ROWS);

    let template = read_template(&connection.dialect, TARGET_ROWS, Some(&table), false);
    let first = run_template(connection, &template).await.expect("first run succeeds");
    assert_eq!(
        first.reconcile,
        ReconcileOutcome::Regenerated { previous_rows: STALE_ROWS, rows: TARGET_ROWS }
    );
    assert!(!first.has_failure);
    assert_eq!(first.table_name, table);
    assert_eq!(strategy.row_count(&table).await.unwrap(), TARGET_ROWS);

    let second = run_template(connection, &template).await.expect("second run succeeds");
    assert_eq!(second.reconcile, ReconcileOutcome::Kept { rows: TARGET_ROWS });
    assert!(!second.has_failure);
    assert!(strategy.table_exists(&table).await.unwrap());

    strategy.cleanup(&table).await.unwrap();
    strategy.cleanup(&table).await.unwrap();
    assert!(!strategy.table_exists(&table).await.unwrap());
    strategy.close().await;
}

/// Runs every scenario for one dialect.
async fn exercise_dialect(fixture: &DatabaseFixture, dialect: &str, config: &SystemTestConfig) {
    let connection = fixture.connection(dialect);
    wait_for_database_ready(&connection, config.ready_timeout())
        .await
        .unwrap_or_else(|err| panic!("{dialect} not ready: {err}"));
    fresh_run_creates_and_cleans_up(&connection).await;
    stale_table_regenerates_then_is_kept(&connection).await;
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn mysql_protocol_dialects_reconcile_live() {
    let config = SystemTestConfig::load().expect("system test config");
    let fixture = DatabaseFixture::mysql(&config).await.expect("mysql fixture");
    for dialect in ["mysql", "gbase"] {
        exercise_dialect(&fixture, dialect, &config).await;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_protocol_dialects_reconcile_live() {
    let config = SystemTestConfig::load().expect("system test config");
    let fixture = DatabaseFixture::postgres(&config).await.expect("postgres fixture");
    for dialect in ["kingbase", "vastbase"] {
        exercise_dialect(&fixture, dialect, &config).await;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_database_fails_before_side_effects() {
    let connection = DatabaseConnection {
        name: "unreachable".to_string(),
        dialect: "vastbase".to_string(),
        host: "127.0.0.1".to_string(),
        port: 1,
        user: "postgres".to_string(),
        password: "secret".to_string(),
        database: "integration".to_string(),
    };
    let template = read_template("vastbase", 10, None, false);
    let err = run_template(&connection, &template).await.unwrap_err();
    assert!(err.to_string().starts_with("connect failed"), "{err}");
}
