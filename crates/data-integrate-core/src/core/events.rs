// crates/data-integrate-core/src/core/events.rs
// ============================================================================
// Module: Run Events
// Description: Structured lifecycle events emitted during a harness run.
// Purpose: Give operators a JSON-line trail of every side effect.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every phase transition and every external side effect (table drop, bulk
//! insert, catalog registration, compensation) produces one [`RunEvent`].
//! Events are fire-and-forget; sinks never fail the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Lifecycle event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEventKind {
    /// Run planned (names resolved).
    Planned,
    /// Database connection established.
    Connected,
    /// Connection attempt failed.
    ConnectFailed,
    /// Existing table kept.
    TableKept,
    /// Stale table dropped before regeneration.
    TableDropped,
    /// Table created and populated.
    TableCreated,
    /// Catalog data source created.
    DataSourceRegistered,
    /// Catalog asset created.
    AssetRegistered,
    /// Registration failed.
    RegistrationFailed,
    /// Compensating data source deletion attempted.
    Compensated,
    /// Assertion finished.
    AssertionFinished,
    /// Cleanup dropped the run table.
    CleanedUp,
    /// Cleanup skipped for a retained table.
    CleanupSkipped,
    /// Cleanup failed (logged only).
    CleanupFailed,
    /// Run deadline expired.
    DeadlineExceeded,
    /// Run finished.
    Finished,
}

/// Structured run event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RunEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Run namespace.
    pub namespace: String,
    /// Event kind.
    pub kind: RunEventKind,
    /// Human-readable detail.
    pub message: String,
    /// Table involved, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

impl RunEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(namespace: &str, kind: RunEventKind, message: impl Into<String>) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "run_event",
            timestamp_ms,
            namespace: namespace.to_string(),
            kind,
            message: message.into(),
            table: None,
        }
    }

    /// Attaches the table name.
    #[must_use]
    pub fn with_table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }
}
