// crates/data-integrate-core/src/runtime/validator.rs
// ============================================================================
// Module: Row-Count Validator
// Description: Tolerance-based comparison of observed and expected row counts.
// Purpose: Produce structured verdicts for read and write assertions.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The validator is dialect-agnostic. The read path never touches the
//! database; the write path issues exactly one count query through the
//! strategy. An expected count of zero is an exact-match comparison and never
//! divides.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DEFAULT_TOLERANCE_PERCENT;
use crate::core::Verdict;
use crate::interfaces::DialectError;
use crate::interfaces::DialectStrategy;

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Compares row counts against an expectation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowCountValidator {
    /// Expected row count.
    expected: u64,
    /// Tolerance in percent.
    tolerance: f64,
}

impl RowCountValidator {
    /// Creates a validator. Non-positive or non-finite tolerances become 0.1.
    #[must_use]
    pub fn new(expected: u64, tolerance: f64) -> Self {
        Self {
            expected,
            tolerance: effective_tolerance(tolerance),
        }
    }

    /// Returns the expected row count.
    #[must_use]
    pub const fn expected(&self) -> u64 {
        self.expected
    }

    /// Returns the effective tolerance in percent.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Validates an already observed row count.
    #[must_use]
    pub fn validate_read(&self, observed: u64) -> Verdict {
        compare(self.expected, observed, self.tolerance)
    }

    /// Re-queries the row count of `table` and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError`] when the count query fails.
    pub async fn validate_write(
        &self,
        strategy: &dyn DialectStrategy,
        table: &str,
    ) -> Result<Verdict, DialectError> {
        let observed = strategy.row_count(table).await?;
        Ok(self.validate_read(observed))
    }
}

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Returns the tolerance actually applied for a configured value.
#[must_use]
pub fn effective_tolerance(tolerance: f64) -> f64 {
    if tolerance.is_finite() && tolerance > 0.0 { tolerance } else { DEFAULT_TOLERANCE_PERCENT }
}

/// Returns true when `actual` is within `tolerance` percent of `expected`.
#[must_use]
pub fn within_tolerance(expected: u64, actual: u64, tolerance: f64) -> bool {
    compare(expected, actual, tolerance).passed
}

/// Computes the verdict for one comparison.
#[allow(clippy::cast_precision_loss, reason = "Row counts far below 2^52 in practice.")]
fn compare(expected: u64, actual: u64, tolerance: f64) -> Verdict {
    let wide_diff = i128::from(actual) - i128::from(expected);
    let diff = i64::try_from(wide_diff).unwrap_or(if wide_diff > 0 { i64::MAX } else { i64::MIN });
    let diff_percent = if expected == 0 {
        match actual {
            0 => 0.0,
            _ => 100.0,
        }
    } else {
        wide_diff as f64 * 100.0 / expected as f64
    };
    let passed = if expected == 0 { actual == 0 } else { diff_percent.abs() <= tolerance };
    let message = if passed {
        format!(
            "row count {actual} within {tolerance}% of expected {expected} (diff {diff}, \
             {diff_percent:.4}%)"
        )
    } else {
        format!(
            "row count {actual} deviates from expected {expected} by {diff_percent:.4}% \
             (diff {diff}, tolerance {tolerance}%)"
        )
    };
    Verdict {
        passed,
        expected,
        actual,
        diff,
        diff_percent,
        message,
    }
}
