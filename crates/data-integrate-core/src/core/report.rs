// crates/data-integrate-core/src/core/report.rs
// ============================================================================
// Module: Run Reports
// Description: Verdicts, per-assertion results, and the aggregated run report.
// Purpose: Record quantitative pass/fail outcomes for display and CI.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! A [`RunReport`] is append-only while assertions execute and is finalized
//! exactly once. `has_failure` is maintained on every append so a partially
//! built report never under-reports failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Verdicts
// ============================================================================

/// Outcome of a single row-count comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the observed count is within tolerance.
    pub passed: bool,
    /// Expected row count.
    pub expected: u64,
    /// Observed row count.
    pub actual: u64,
    /// `actual - expected`.
    pub diff: i64,
    /// `diff / expected * 100`, or `+-100` when `expected` is zero.
    pub diff_percent: f64,
    /// Human-readable summary.
    pub message: String,
}

// ============================================================================
// SECTION: Assertion Results
// ============================================================================

/// Result of one executed assertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionResult {
    /// Assertion kind label as written in the template.
    pub kind: String,
    /// Expected row count.
    pub expected: u64,
    /// Observed row count (0 when the assertion errored).
    pub actual: u64,
    /// `actual - expected`.
    pub diff: i64,
    /// Relative difference in percent.
    pub diff_percent: f64,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Human-readable summary.
    pub message: String,
    /// Assertion-local error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Start time.
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    /// End time.
    #[serde(with = "time::serde::rfc3339")]
    pub ended_at: OffsetDateTime,
    /// Elapsed milliseconds.
    pub duration_ms: u64,
}

impl AssertionResult {
    /// Builds a result from a validator verdict.
    #[must_use]
    pub fn from_verdict(
        kind: &str,
        verdict: Verdict,
        started_at: OffsetDateTime,
        ended_at: OffsetDateTime,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            expected: verdict.expected,
            actual: verdict.actual,
            diff: verdict.diff,
            diff_percent: verdict.diff_percent,
            passed: verdict.passed,
            message: verdict.message,
            error: None,
            started_at,
            ended_at,
            duration_ms: elapsed_ms(started_at, ended_at),
        }
    }

    /// Builds a failed result carrying an assertion-local error.
    #[must_use]
    pub fn errored(
        kind: &str,
        expected: u64,
        error: String,
        started_at: OffsetDateTime,
        ended_at: OffsetDateTime,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            expected,
            actual: 0,
            diff: 0,
            diff_percent: 0.0,
            passed: false,
            message: error.clone(),
            error: Some(error),
            started_at,
            ended_at,
            duration_ms: elapsed_ms(started_at, ended_at),
        }
    }
}

/// Returns non-negative elapsed milliseconds between two instants.
#[must_use]
pub fn elapsed_ms(started_at: OffsetDateTime, ended_at: OffsetDateTime) -> u64 {
    u64::try_from((ended_at - started_at).whole_milliseconds()).unwrap_or(0)
}

// ============================================================================
// SECTION: Reconcile Outcome
// ============================================================================

/// What the reconciler did to the target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// Existing table was within tolerance and left untouched.
    Kept {
        /// Observed rows.
        rows: u64,
    },
    /// Table was absent and has been created.
    Created {
        /// Rows inserted.
        rows: u64,
    },
    /// Table was outside tolerance and has been rebuilt.
    Regenerated {
        /// Rows observed before the rebuild.
        previous_rows: u64,
        /// Rows inserted.
        rows: u64,
    },
}

impl ReconcileOutcome {
    /// Returns true when the reconciler wrote to the database.
    #[must_use]
    pub const fn wrote_data(self) -> bool {
        !matches!(self, Self::Kept { .. })
    }

    /// Returns a short label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kept { .. } => "kept",
            Self::Created { .. } => "created",
            Self::Regenerated { .. } => "regenerated",
        }
    }
}

// ============================================================================
// SECTION: Run Report
// ============================================================================

/// Aggregated report for one run.
///
/// # Invariants
/// - `has_failure` equals `results.iter().any(|r| !r.passed)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Template name.
    pub template_name: String,
    /// Run namespace.
    pub namespace: String,
    /// Resolved table name.
    pub table_name: String,
    /// Resolved asset name.
    pub asset_name: String,
    /// Catalog data source id.
    pub data_source_id: i64,
    /// Catalog asset id.
    pub asset_id: i64,
    /// Reconcile outcome.
    pub reconcile: ReconcileOutcome,
    /// Run start.
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    /// Run end.
    #[serde(with = "time::serde::rfc3339")]
    pub ended_at: OffsetDateTime,
    /// Elapsed milliseconds.
    pub duration_ms: u64,
    /// Ordered assertion results.
    pub results: Vec<AssertionResult>,
    /// True when any assertion failed.
    pub has_failure: bool,
}

impl RunReport {
    /// Appends a result and updates the failure flag.
    pub fn push(&mut self, result: AssertionResult) {
        self.has_failure |= !result.passed;
        self.results.push(result);
    }

    /// Stamps the end time.
    pub fn finalize(&mut self, ended_at: OffsetDateTime) {
        self.ended_at = ended_at;
        self.duration_ms = elapsed_ms(self.started_at, ended_at);
    }

    /// Number of passed assertions.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|result| result.passed).count()
    }

    /// Number of failed assertions.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.passed_count()
    }
}
