// crates/data-integrate-cli/src/report.rs
// ============================================================================
// Module: Report Rendering
// Description: Text and JSON renderings of run reports plus exit codes.
// Purpose: Present run outcomes to humans and CI.
// Dependencies: data-integrate-core, serde_json
// ============================================================================

//! ## Overview
//! The text rendering is always printed; JSON is selected with
//! `--format json` and is also what `--report <path>` persists.
//!
//! Exit codes: `0` when every assertion passed, `1` when any failed, `2` for
//! fatal setup or configuration errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use data_integrate_core::AssertionResult;
use data_integrate_core::ReconcileOutcome;
use data_integrate_core::RunReport;

// ============================================================================
// SECTION: Exit Codes
// ============================================================================

/// Every assertion passed.
pub const EXIT_PASSED: u8 = 0;
/// At least one assertion failed.
pub const EXIT_ASSERTION_FAILED: u8 = 1;
/// Configuration, template, or setup error.
pub const EXIT_FATAL: u8 = 2;

/// Maps a completed report to its exit code.
#[must_use]
pub const fn exit_code_for(report: &RunReport) -> u8 {
    if report.has_failure { EXIT_ASSERTION_FAILED } else { EXIT_PASSED }
}

// ============================================================================
// SECTION: Text
// ============================================================================

/// Renders a human-readable report.
#[must_use]
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "template:  {}", report.template_name);
    let _ = writeln!(out, "namespace: {}", report.namespace);
    let _ = writeln!(out, "table:     {}", report.table_name);
    let _ = writeln!(
        out,
        "asset:     {} (data source {}, asset {})",
        report.asset_name, report.data_source_id, report.asset_id
    );
    let _ = writeln!(out, "reconcile: {}", describe_reconcile(report.reconcile));
    for result in &report.results {
        let _ = writeln!(out, "{}", render_result(result));
    }
    let _ = write!(
        out,
        "summary:   {} passed, {} failed in {} ms",
        report.passed_count(),
        report.failed_count(),
        report.duration_ms
    );
    out
}

/// Renders one assertion line.
#[must_use]
pub fn render_result(result: &AssertionResult) -> String {
    let status = if result.passed { "PASS" } else { "FAIL" };
    let mut line = format!(
        "[{status}] {} expected={} actual={} diff={} ({:.2}%)",
        result.kind, result.expected, result.actual, result.diff, result.diff_percent
    );
    if let Some(error) = &result.error {
        let _ = write!(line, " error: {error}");
    } else if !result.message.is_empty() {
        let _ = write!(line, " {}", result.message);
    }
    line
}

/// Describes the reconcile outcome.
fn describe_reconcile(outcome: ReconcileOutcome) -> String {
    match outcome {
        ReconcileOutcome::Kept { rows } => format!("kept existing table ({rows} rows)"),
        ReconcileOutcome::Created { rows } => format!("created table ({rows} rows)"),
        ReconcileOutcome::Regenerated { previous_rows, rows } => {
            format!("regenerated table ({previous_rows} -> {rows} rows)")
        }
    }
}

// ============================================================================
// SECTION: JSON
// ============================================================================

/// Renders the report as pretty JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialization fails.
pub fn render_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Writes the JSON report to `path`.
///
/// # Errors
///
/// Returns [`io::Error`] when serialization or the write fails.
pub fn write_report(path: &Path, report: &RunReport) -> io::Result<()> {
    let json = render_json(report).map_err(io::Error::other)?;
    fs::write(path, format!("{json}\n"))
}
