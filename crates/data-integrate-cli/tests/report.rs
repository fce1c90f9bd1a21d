// crates/data-integrate-cli/tests/report.rs
// ============================================================================
// Module: Report Rendering Tests
// Description: Text and JSON report output and exit code mapping.
// ============================================================================
//! ## Overview
//! Builds reports by hand and checks what CI and humans would see.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use data_integrate_cli::report::EXIT_ASSERTION_FAILED;
use data_integrate_cli::report::EXIT_PASSED;
use data_integrate_cli::report::exit_code_for;
use data_integrate_cli::report::render_json;
use data_integrate_cli::report::render_result;
use data_integrate_cli::report::render_text;
use data_integrate_cli::report::write_report;
use data_integrate_core::AssertionResult;
use data_integrate_core::ReconcileOutcome;
use data_integrate_core::RunReport;
use data_integrate_core::RowCountValidator;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn report() -> RunReport {
    let now = OffsetDateTime::UNIX_EPOCH;
    RunReport {
        template_name: "orders".to_string(),
        namespace: "test_orders_1_abc".to_string(),
        table_name: "test_orders_1_abc_test_table".to_string(),
        asset_name: "test_orders_1_abc_orders".to_string(),
        data_source_id: 1000,
        asset_id: 2000,
        reconcile: ReconcileOutcome::Created { rows: 1000 },
        started_at: now,
        ended_at: now,
        duration_ms: 12,
        results: Vec::new(),
        has_failure: false,
    }
}

fn passing() -> AssertionResult {
    let verdict = RowCountValidator::new(1000, 0.1).validate_read(1000);
    let now = OffsetDateTime::UNIX_EPOCH;
    AssertionResult::from_verdict("read", verdict, now, now)
}

fn errored() -> AssertionResult {
    let now = OffsetDateTime::UNIX_EPOCH;
    AssertionResult::errored("teleport", 10, "unknown test type: teleport".to_string(), now, now)
}

// ============================================================================
// SECTION: Exit Codes
// ============================================================================

#[test]
fn provisioning_run_without_assertions_exits_zero() {
    let report = report();
    assert_eq!(exit_code_for(&report), EXIT_PASSED);
    assert!(render_text(&report).contains("summary:   0 passed, 0 failed"));
}

#[test]
fn exit_code_tracks_failures() {
    let mut report = report();
    report.push(passing());
    assert_eq!(exit_code_for(&report), EXIT_PASSED);
    report.push(errored());
    assert_eq!(exit_code_for(&report), EXIT_ASSERTION_FAILED);
}

// ============================================================================
// SECTION: Text
// ============================================================================

#[test]
fn text_report_lists_every_assertion() {
    let mut report = report();
    report.push(passing());
    report.push(errored());
    let text = render_text(&report);
    assert!(text.contains("namespace: test_orders_1_abc"));
    assert!(text.contains("reconcile: created table (1000 rows)"));
    assert!(text.contains("[PASS] read expected=1000 actual=1000 diff=0 (0.00%)"));
    assert!(text.contains("[FAIL] teleport"));
    assert!(text.contains("error: unknown test type: teleport"));
    assert!(text.ends_with("summary:   1 passed, 1 failed in 12 ms"));
}

#[test]
fn regenerated_outcome_shows_both_counts() {
    let mut report = report();
    report.reconcile = ReconcileOutcome::Regenerated { previous_rows: 10, rows: 1000 };
    assert!(render_text(&report).contains("regenerated table (10 -> 1000 rows)"));
}

#[test]
fn result_line_prefers_error_over_message() {
    let line = render_result(&errored());
    assert!(line.starts_with("[FAIL] teleport expected=10"));
    assert!(line.ends_with("error: unknown test type: teleport"));
}

// ============================================================================
// SECTION: JSON
// ============================================================================

#[test]
fn json_report_round_trips_through_disk() {
    let mut report = report();
    report.push(passing());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_report(&path, &report).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written.trim_end(), render_json(&report).unwrap());
    let parsed: RunReport = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn json_report_tags_reconcile_action() {
    let json = render_json(&report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["reconcile"]["action"], "created");
    assert_eq!(value["has_failure"], false);
}
