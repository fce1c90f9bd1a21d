// crates/data-integrate-config/tests/template_load.rs
// ============================================================================
// Module: Template Loading Tests
// Description: Tests for YAML template parsing, normalization, and validation.
// ============================================================================
//! ## Overview
//! Validates that templates parse with their wire names, that defaults are
//! normalized, and that strict hint checking rejects unknown type hints.

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
    clippy::float_cmp,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use data_integrate_config::TemplateError;
use data_integrate_config::load_template;
use data_integrate_config::parse_template;
use data_integrate_core::AssertionKind;
use data_integrate_core::HintPolicy;
use data_integrate_core::RunPlan;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const TEMPLATE: &str = r"
name: mysql_orders_1k
description: read and write a thousand rows
database:
  type: mysql
  name: ''
schema:
  field_count: 8
  field_types: [int, VARCHAR, datetime]
  max_field_size: 128
  table_name: '  '
data:
  row_count: 1000
  keep_table: false
tests:
  - type: read
    expected: 1000
  - type: read_write
    expected: 1000
    tolerance: 0.5
    params:
      source: stream
  - type: scan
    expected: 1
    tolerance: 0
";

fn invalid(result: Result<data_integrate_core::TestTemplate, TemplateError>) -> String {
    match result {
        Err(TemplateError::Invalid(message)) => message,
        other => panic!("expected invalid template, got {other:?}"),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn parses_wire_names_and_normalizes_defaults() {
    let template = parse_template(TEMPLATE, HintPolicy::Strict).unwrap();
    assert_eq!(template.name, "mysql_orders_1k");
    assert_eq!(template.database.dialect, "mysql");
    assert_eq!(template.database.name, None);
    assert_eq!(template.schema.table_name, None);
    assert_eq!(template.schema.field_count, 8);
    assert_eq!(template.schema.max_field_size, 128);
    assert_eq!(template.data.row_count, 1000);

    assert_eq!(template.tests.len(), 3);
    assert_eq!(template.tests[0].kind, AssertionKind::Read);
    assert_eq!(template.tests[0].tolerance, 0.1);
    assert_eq!(template.tests[1].kind, AssertionKind::ReadWrite);
    assert_eq!(template.tests[1].tolerance, 0.5);
    assert_eq!(template.tests[1].param_str("source"), Some("stream"));
    assert_eq!(template.tests[2].kind, AssertionKind::Unknown("scan".to_string()));
    assert_eq!(template.tests[2].tolerance, 0.1);
}

#[test]
fn blank_table_name_yields_namespaced_plan() {
    let template = parse_template(TEMPLATE, HintPolicy::Strict).unwrap();
    let plan = RunPlan::resolve(&template, "test_mysql_1_a");
    assert_eq!(plan.table_name, "test_mysql_1_a_test_table");
    assert_eq!(plan.asset_name, "test_mysql_1_a_mysql_orders_1k");
    assert!(!plan.retain_table);
}

#[test]
fn strict_policy_rejects_unknown_hint_but_lenient_accepts() {
    let typo = TEMPLATE.replace("VARCHAR", "varchr");
    let message = invalid(parse_template(&typo, HintPolicy::Strict));
    assert!(message.contains("unknown type hint 'varchr' for mysql"), "{message}");
    assert!(parse_template(&typo, HintPolicy::Lenient).is_ok());
}

#[test]
fn rejects_unsupported_dialect() {
    let oracle = TEMPLATE.replace("type: mysql", "type: oracle");
    let message = invalid(parse_template(&oracle, HintPolicy::Strict));
    assert!(message.contains("unsupported database type"), "{message}");
}

#[test]
fn provisioning_template_without_tests_is_accepted() {
    let fixture = "name: shared_orders\n\
                   database:\n  type: gbase\n\
                   schema:\n  field_count: 4\n  table_name: shared_orders\n\
                   data:\n  row_count: 100\n  keep_table: true\n\
                   tests: []\n";
    let template = parse_template(fixture, HintPolicy::Strict).unwrap();
    assert!(template.tests.is_empty());
    let plan = RunPlan::resolve(&template, "test_gbase_1_a");
    assert_eq!(plan.table_name, "shared_orders");
    assert!(plan.retain_table);
}

#[test]
fn rejects_too_many_tests() {
    let mut yaml = String::from("name: t\ndatabase:\n  type: gbase\ntests:\n");
    for _ in 0 ..= data_integrate_config::template::MAX_ASSERTIONS {
        yaml.push_str("  - type: read\n    expected: 1\n");
    }
    let message = invalid(parse_template(&yaml, HintPolicy::Strict));
    assert!(message.contains("at most"), "{message}");
}

#[test]
fn rejects_oversized_cap_and_negative_counts() {
    let cap = TEMPLATE.replace("max_field_size: 128", "max_field_size: 70000");
    let message = invalid(parse_template(&cap, HintPolicy::Strict));
    assert!(message.contains("max_field_size"), "{message}");

    let negative = TEMPLATE.replace("row_count: 1000", "row_count: -5");
    assert!(matches!(
        parse_template(&negative, HintPolicy::Strict),
        Err(TemplateError::Parse(_))
    ));
}

#[test]
fn loads_template_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.yaml");
    std::fs::write(&path, TEMPLATE).unwrap();
    let template = load_template(&path, HintPolicy::Strict).unwrap();
    assert_eq!(template.tests.len(), 3);

    let missing = load_template(&dir.path().join("absent.yaml"), HintPolicy::Strict);
    assert!(matches!(missing, Err(TemplateError::Io(_))));
}
