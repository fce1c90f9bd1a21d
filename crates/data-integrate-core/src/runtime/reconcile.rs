// crates/data-integrate-core/src/runtime/reconcile.rs
// ============================================================================
// Module: Data Reconciler
// Description: Keep, regenerate, or create the target table's data.
// Purpose: Converge an externally owned table onto a template's row count.
// Dependencies: rand, thiserror, crate::{core, interfaces, runtime::validator}
// ============================================================================

//! ## Overview
//! Reconciliation is a three-state decision over table existence and row
//! count. A table within [`RECONCILE_TOLERANCE_PERCENT`] of the expected count
//! is kept untouched, so re-running a template against the same fixture
//! performs no writes. A table outside tolerance is dropped and rebuilt.
//!
//! ## Invariants
//! - The schema is synthesized only when data must be written.
//! - A regenerate always drops before it creates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use thiserror::Error;

use crate::core::ReconcileOutcome;
use crate::core::SchemaDefinition;
use crate::core::SynthesisError;
use crate::core::SynthesisRequest;
use crate::core::synthesize;
use crate::interfaces::DataProducer;
use crate::interfaces::DialectError;
use crate::interfaces::DialectStrategy;
use crate::interfaces::ProducerError;
use crate::runtime::validator::within_tolerance;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Relative row-count tolerance (percent) under which a table is kept.
pub const RECONCILE_TOLERANCE_PERCENT: f64 = 0.1;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Decision taken before any write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileDecision {
    /// Table absent; create it.
    Create,
    /// Table present and within tolerance.
    Keep {
        /// Observed rows.
        rows: u64,
    },
    /// Table present and outside tolerance.
    Regenerate {
        /// Observed rows.
        rows: u64,
    },
}

/// Reconciliation errors. All are fatal for the run.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Existence or count inspection failed.
    #[error("table inspection failed: {0}")]
    Inspect(DialectError),
    /// Dropping a stale table failed.
    #[error("stale table drop failed: {0}")]
    Drop(DialectError),
    /// Schema synthesis failed.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    /// Table creation or insertion failed.
    #[error("data generation failed: {0}")]
    Produce(#[from] ProducerError),
}

/// Reconciliation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// What happened.
    pub outcome: ReconcileOutcome,
    /// Schema used when data was written.
    pub schema: Option<SchemaDefinition>,
}

// ============================================================================
// SECTION: Reconciliation
// ============================================================================

/// Decides what to do given the observed row count (`None` when absent).
#[must_use]
pub fn decide(existing_rows: Option<u64>, expected: u64) -> ReconcileDecision {
    match existing_rows {
        None => ReconcileDecision::Create,
        Some(rows) if within_tolerance(expected, rows, RECONCILE_TOLERANCE_PERCENT) => {
            ReconcileDecision::Keep { rows }
        }
        Some(rows) => ReconcileDecision::Regenerate { rows },
    }
}

/// Inspects the target table and returns the reconcile decision.
///
/// # Errors
///
/// Returns [`ReconcileError::Inspect`] when the catalog or count query fails.
pub async fn inspect(
    strategy: &dyn DialectStrategy,
    table: &str,
    expected: u64,
) -> Result<ReconcileDecision, ReconcileError> {
    let exists = strategy.table_exists(table).await.map_err(ReconcileError::Inspect)?;
    let existing_rows = if exists {
        Some(strategy.row_count(table).await.map_err(ReconcileError::Inspect)?)
    } else {
        None
    };
    Ok(decide(existing_rows, expected))
}

/// Converges `request.table_name` onto `request.row_count` rows.
///
/// # Errors
///
/// Returns [`ReconcileError`] when inspection, drop, synthesis, or
/// production fails.
pub async fn reconcile<R: Rng + Send + ?Sized>(
    strategy: &dyn DialectStrategy,
    producer: &dyn DataProducer,
    request: &SynthesisRequest<'_>,
    rng: &mut R,
) -> Result<Reconciled, ReconcileError> {
    let decision = inspect(strategy, request.table_name, request.row_count).await?;
    let previous_rows = match decision {
        ReconcileDecision::Keep { rows } => {
            return Ok(Reconciled {
                outcome: ReconcileOutcome::Kept { rows },
                schema: None,
            });
        }
        ReconcileDecision::Regenerate { rows } => {
            strategy.cleanup(request.table_name).await.map_err(ReconcileError::Drop)?;
            Some(rows)
        }
        ReconcileDecision::Create => None,
    };

    let schema = synthesize(request, rng)?;
    let rows = producer.produce(strategy, &schema).await?;
    let outcome = match previous_rows {
        Some(previous_rows) => ReconcileOutcome::Regenerated { previous_rows, rows },
        None => ReconcileOutcome::Created { rows },
    };
    Ok(Reconciled {
        outcome,
        schema: Some(schema),
    })
}
