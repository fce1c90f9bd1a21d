// crates/data-integrate-config/tests/config_load.rs
// ============================================================================
// Module: Config Loading Tests
// Description: Tests for base configuration parsing, limits, and selection.
// ============================================================================
//! ## Overview
//! Validates TOML loading, fail-closed validation, and the database merge
//! rule used to bind a template to a connection profile.

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

use std::time::Duration;

use data_integrate_config::CatalogMode;
use data_integrate_config::ConfigError;
use data_integrate_config::HarnessConfig;
use data_integrate_config::LogSink;
use data_integrate_config::limits::MAX_INPUT_FILE_SIZE;
use data_integrate_core::DatabaseTarget;
use data_integrate_core::HintPolicy;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const BASE: &str = r#"
[[databases]]
name = "it_mysql"
dialect = "mysql"
host = "10.0.0.5"
port = 3306
user = "root"
password = "secret"
database = "default_db"

[[databases]]
name = "reporting"
dialect = "mysql"
host = "10.0.0.6"
port = 3306
user = "reader"
password = "secret"
database = "reporting_db"

[[databases]]
name = "kb"
dialect = "kingbase"
host = "10.0.0.7"
port = 54321
user = "system"
database = "test"

[catalog]
mode = "offline"

[synthesis]
hint_policy = "lenient"
seed = 42
"#;

fn target(dialect: &str, name: Option<&str>) -> DatabaseTarget {
    DatabaseTarget {
        dialect: dialect.to_string(),
        name: name.map(str::to_string),
    }
}

fn invalid_message(result: Result<HarnessConfig, ConfigError>) -> String {
    match result {
        Err(ConfigError::Invalid(message)) => message,
        other => panic!("expected invalid config, got {other:?}"),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn loads_file_and_applies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data-integrate.toml");
    std::fs::write(&path, BASE).unwrap();

    let config = HarnessConfig::load(Some(&path)).unwrap();
    assert_eq!(config.databases.len(), 3);
    assert_eq!(config.catalog.mode, CatalogMode::Offline);
    assert_eq!(config.catalog.port, 9090);
    assert!(config.data_service.is_none());
    assert_eq!(config.run.deadline_secs, 7200);
    assert_eq!(config.synthesis.insert_batch_size, 500);
    assert_eq!(config.logging.sink, LogSink::Stderr);

    let orchestrator = config.orchestrator_config(None);
    assert_eq!(orchestrator.deadline, Some(Duration::from_secs(7200)));
    assert_eq!(orchestrator.hint_policy, HintPolicy::Lenient);
    assert_eq!(orchestrator.seed, Some(42));
    assert_eq!(config.orchestrator_config(Some(7)).seed, Some(7));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = HarnessConfig::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn oversized_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.toml");
    let mut content = BASE.to_string();
    content.push_str(&format!("# {}\n", "x".repeat(MAX_INPUT_FILE_SIZE)));
    std::fs::write(&path, content).unwrap();
    let message = invalid_message(HarnessConfig::load(Some(&path)));
    assert!(message.contains("size limit"), "{message}");
}

#[test]
fn non_utf8_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bin.toml");
    std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    let message = invalid_message(HarnessConfig::load(Some(&path)));
    assert!(message.contains("utf-8"), "{message}");
}

#[test]
fn unknown_top_level_key_is_a_parse_error() {
    let result = HarnessConfig::from_toml(&format!("{BASE}\n[bogus]\nvalue = 1\n"));
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn validation_rejects_bad_profiles() {
    let empty = invalid_message(HarnessConfig::from_toml("[catalog]\nmode = \"offline\"\n"));
    assert!(empty.contains("at least one database"), "{empty}");

    let unknown = BASE.replace("dialect = \"kingbase\"", "dialect = \"oracle\"");
    let message = invalid_message(HarnessConfig::from_toml(&unknown));
    assert!(message.contains("unsupported database type: oracle"), "{message}");

    let duplicate = BASE.replace("name = \"reporting\"", "name = \"it_mysql\"");
    let message = invalid_message(HarnessConfig::from_toml(&duplicate));
    assert!(message.contains("duplicate database profile"), "{message}");

    let zero_port = BASE.replace("port = 54321", "port = 0");
    let message = invalid_message(HarnessConfig::from_toml(&zero_port));
    assert!(message.contains("port must be non-zero"), "{message}");
}

#[test]
fn validation_rejects_bad_limits() {
    let batch = format!("{BASE}insert_batch_size = 0\n");
    let message = invalid_message(HarnessConfig::from_toml(&batch));
    assert!(message.contains("insert_batch_size"), "{message}");

    let file_sink = format!("{BASE}\n[logging]\nsink = \"file\"\n");
    let message = invalid_message(HarnessConfig::from_toml(&file_sink));
    assert!(message.contains("logging.path"), "{message}");

    let deadline = format!("{BASE}\n[run]\ndeadline_secs = 0\n");
    let message = invalid_message(HarnessConfig::from_toml(&deadline));
    assert!(message.contains("deadline_secs"), "{message}");
}

#[test]
fn named_target_matches_name_and_dialect_and_overrides_database() {
    let config = HarnessConfig::from_toml(BASE).unwrap();
    let resolved = config.resolve_database(&target("mysql", Some("reporting"))).unwrap();
    assert_eq!(resolved.host, "10.0.0.6");
    assert_eq!(resolved.user, "reader");
    assert_eq!(resolved.database, "reporting");
}

#[test]
fn unnamed_target_takes_first_profile_of_dialect() {
    let config = HarnessConfig::from_toml(BASE).unwrap();
    let mysql = config.resolve_database(&target("MySQL", None)).unwrap();
    assert_eq!(mysql.name, "it_mysql");
    assert_eq!(mysql.database, "default_db");
    let kingbase = config.resolve_database(&target("kingbase", Some("  "))).unwrap();
    assert_eq!(kingbase.name, "kb");
}

#[test]
fn named_target_without_match_does_not_fall_back() {
    let config = HarnessConfig::from_toml(BASE).unwrap();
    let err = config.resolve_database(&target("kingbase", Some("reporting"))).unwrap_err();
    assert!(err.to_string().contains("no database profile named reporting"), "{err}");
    let err = config.resolve_database(&target("gbase", None)).unwrap_err();
    assert!(err.to_string().contains("no database profile for gbase"), "{err}");
    let err = config.resolve_database(&target("db2", None)).unwrap_err();
    assert!(err.to_string().contains("unsupported database type"), "{err}");
}
