// system-tests/tests/helpers/readiness.rs
// ============================================================================
// Module: Readiness Helpers
// Description: Readiness probes for database fixtures.
// Purpose: Ensure servers accept sessions without arbitrary sleeps.
// Dependencies: tokio, data-integrate-dialects
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use data_integrate_core::DatabaseConnection;
use data_integrate_dialects::create_strategy;
use tokio::time::sleep;

/// Polls until the database answers a catalog query or timeout expires.
pub async fn wait_for_database_ready(
    connection: &DatabaseConnection,
    timeout: Duration,
) -> Result<(), String> {
    let start = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        let mut strategy = create_strategy(connection).map_err(|err| err.to_string())?;
        let probe = match strategy.connect().await {
            Ok(()) => strategy.table_exists("readiness_probe").await.map(|_| ()),
            Err(err) => Err(err),
        };
        strategy.close().await;
        match probe {
            Ok(()) => return Ok(()),
            Err(err) => {
                if start.elapsed() > timeout {
                    return Err(format!(
                        "database readiness timeout after {attempts} attempts: {err}"
                    ));
                }
                sleep(Duration::from_millis(250)).await;
            }
        }
    }
}
