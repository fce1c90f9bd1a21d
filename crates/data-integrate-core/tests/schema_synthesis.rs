// crates/data-integrate-core/tests/schema_synthesis.rs
// ============================================================================
// Module: Schema Synthesis Tests
// Description: Tests for field clamping, key placement, caps, and hints.
// ============================================================================
//! ## Overview
//! Validates schema synthesis invariants across every dialect, including
//! property-based coverage of the field-count clamp and the capacity cap.

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

use data_integrate_core::ALL_DIALECTS;
use data_integrate_core::ColumnType;
use data_integrate_core::Dialect;
use data_integrate_core::HintPolicy;
use data_integrate_core::MAX_FIELDS;
use data_integrate_core::SchemaDefinition;
use data_integrate_core::SynthesisError;
use data_integrate_core::SynthesisRequest;
use data_integrate_core::TypeCategory;
use data_integrate_core::resolve_hints;
use data_integrate_core::synthesize;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Synthesizes with a seeded RNG.
fn synth(
    dialect: Dialect,
    field_count: usize,
    hints: &[String],
    cap: u32,
    policy: HintPolicy,
    seed: u64,
) -> Result<SchemaDefinition, SynthesisError> {
    let request = SynthesisRequest {
        dialect,
        table_name: "t_orders",
        field_count,
        row_count: 100,
        type_hints: hints,
        max_field_size: cap,
        hint_policy: policy,
    };
    synthesize(&request, &mut StdRng::seed_from_u64(seed))
}

/// Converts string literals into owned hints.
fn hints(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| (*token).to_string()).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn field_count_is_clamped_for_every_dialect() {
    for dialect in ALL_DIALECTS {
        let low = synth(*dialect, 0, &[], 0, HintPolicy::Strict, 1).unwrap();
        assert_eq!(low.fields.len(), 1);
        let high = synth(*dialect, 30, &[], 0, HintPolicy::Strict, 1).unwrap();
        assert_eq!(high.fields.len(), MAX_FIELDS);
    }
}

#[test]
fn first_field_is_non_nullable_bigint_key() {
    for dialect in ALL_DIALECTS {
        let schema = synth(*dialect, 12, &[], 0, HintPolicy::Strict, 9).unwrap();
        let key = schema.key_field().unwrap();
        assert_eq!(key.name, "id");
        assert_eq!(key.column_type, ColumnType::BigInt);
        assert!(!key.nullable);
        assert_eq!(key.max_size, 0);
    }
}

#[test]
fn columns_are_named_by_position() {
    let schema = synth(Dialect::Mysql, 4, &[], 0, HintPolicy::Strict, 2).unwrap();
    assert_eq!(schema.column_names(), vec!["id", "col_1", "col_2", "col_3"]);
    assert_eq!(schema.table_name, "t_orders");
    assert_eq!(schema.row_count, 100);
}

#[test]
fn same_seed_replays_same_schema() {
    let first = synth(Dialect::Kingbase, 16, &[], 64, HintPolicy::Strict, 42).unwrap();
    let second = synth(Dialect::Kingbase, 16, &[], 64, HintPolicy::Strict, 42).unwrap();
    assert_eq!(first, second);
}

#[test]
fn hints_restrict_the_candidate_pool() {
    let schema =
        synth(Dialect::Mysql, 16, &hints(&[" VARCHAR ", "int"]), 0, HintPolicy::Strict, 5).unwrap();
    for field in &schema.fields[1 ..] {
        assert!(
            field.column_type == ColumnType::Varchar(255) || field.column_type == ColumnType::Int,
            "unexpected type {}",
            field.column_type
        );
    }
}

#[test]
fn cap_rewrites_varchar_width() {
    let schema =
        synth(Dialect::Vastbase, 8, &hints(&["varchar"]), 64, HintPolicy::Strict, 3).unwrap();
    for field in &schema.fields[1 ..] {
        assert_eq!(field.column_type, ColumnType::Varchar(64));
        assert_eq!(field.sql_type(), "VARCHAR(64)");
        assert_eq!(field.max_size, 64);
    }
}

#[test]
fn cap_never_resizes_large_objects() {
    let schema = synth(Dialect::Mysql, 6, &hints(&["text"]), 100, HintPolicy::Strict, 3).unwrap();
    for field in &schema.fields[1 ..] {
        assert_eq!(field.column_type, ColumnType::Text);
        assert_eq!(field.max_size, 100);
    }
}

#[test]
fn strict_policy_rejects_unknown_hint() {
    let err = synth(Dialect::Kingbase, 4, &hints(&["datetime"]), 0, HintPolicy::Strict, 1)
        .unwrap_err();
    assert_eq!(
        err,
        SynthesisError::UnknownTypeHint {
            hint: "datetime".to_string(),
            dialect: Dialect::Kingbase,
        }
    );
}

#[test]
fn lenient_policy_classifies_unknown_hints() {
    let resolved = resolve_hints(
        Dialect::Kingbase,
        &hints(&["datetime", "tinyint", "nchar", "longtext", "money"]),
        HintPolicy::Lenient,
    )
    .unwrap();
    assert_eq!(
        resolved,
        vec![
            ColumnType::Timestamp,
            ColumnType::BigInt,
            ColumnType::Varchar(255),
            ColumnType::Text,
            ColumnType::Varchar(255),
        ]
    );
}

#[test]
fn dialects_map_the_same_hint_differently() {
    let mysql = resolve_hints(Dialect::Mysql, &hints(&["double"]), HintPolicy::Strict).unwrap();
    let vastbase =
        resolve_hints(Dialect::Vastbase, &hints(&["double"]), HintPolicy::Strict).unwrap();
    assert_eq!(mysql, vec![ColumnType::Double]);
    assert_eq!(vastbase, vec![ColumnType::DoublePrecision]);
}

proptest! {
    #[test]
    fn synthesized_schema_respects_bounds(
        dialect_index in 0usize .. 4,
        field_count in 0usize .. 64,
        cap in 0u32 .. 2048,
        seed in any::<u64>(),
    ) {
        let dialect = ALL_DIALECTS[dialect_index];
        let schema = synth(dialect, field_count, &[], cap, HintPolicy::Strict, seed).unwrap();
        prop_assert!((1 ..= MAX_FIELDS).contains(&schema.fields.len()));
        prop_assert!(!schema.fields[0].nullable);
        for field in &schema.fields[1 ..] {
            match field.column_type.category() {
                TypeCategory::Integer
                | TypeCategory::Float
                | TypeCategory::Fixed
                | TypeCategory::Temporal => prop_assert_eq!(field.max_size, 0),
                TypeCategory::Character => {
                    prop_assert_eq!(field.max_size, field.column_type.capacity());
                    if cap > 0 {
                        prop_assert!(field.max_size <= cap);
                    }
                }
                TypeCategory::LargeText | TypeCategory::Binary => {
                    if cap > 0 {
                        prop_assert!(field.max_size <= cap);
                    }
                }
            }
        }
    }
}
