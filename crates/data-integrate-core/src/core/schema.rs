// crates/data-integrate-core/src/core/schema.rs
// ============================================================================
// Module: Schema Synthesizer
// Description: Dialect-aware synthesis of randomized table schemas.
// Purpose: Turn an abstract field specification into concrete column definitions.
// Dependencies: rand, serde, thiserror, crate::core::{dialect, types}
// ============================================================================

//! ## Overview
//! [`synthesize`] maps a field count, optional type hints, and an optional
//! width cap onto concrete column definitions for one dialect. Randomness is
//! drawn only from the caller-supplied RNG, so a fixed seed replays the same
//! schema.
//!
//! ## Invariants
//! - Field count is clamped to `[MIN_FIELDS, MAX_FIELDS]`.
//! - Field 0 is always the non-nullable surrogate key.
//! - A configured cap bounds every field's capacity; only declared character
//!   widths are rewritten.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::dialect::Dialect;
use crate::core::types::ColumnType;
use crate::core::types::TypeCatalog;
use crate::core::types::normalize_hint;
use crate::core::types::type_catalog;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum number of fields in a synthesized schema.
pub const MIN_FIELDS: usize = 1;
/// Maximum number of fields in a synthesized schema.
pub const MAX_FIELDS: usize = 16;
/// Probability that a non-key field is nullable.
pub const NULLABLE_PROBABILITY: f64 = 0.3;
/// Name of the surrogate key column.
pub const KEY_FIELD_NAME: &str = "id";

// ============================================================================
// SECTION: Types
// ============================================================================

/// How unrecognized type hints are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintPolicy {
    /// Unrecognized hints are rejected.
    #[default]
    Strict,
    /// Unrecognized hints are classified by keyword substrings.
    Lenient,
}

/// A single synthesized column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name.
    pub name: String,
    /// Concrete column type.
    pub column_type: ColumnType,
    /// Byte/character capacity (`0` means unbounded).
    pub max_size: u32,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

impl FieldSpec {
    /// Returns the DDL rendering of the column type.
    #[must_use]
    pub fn sql_type(&self) -> String {
        self.column_type.sql()
    }
}

/// Synthesized table schema.
///
/// # Invariants
/// - `fields.len()` is within `[MIN_FIELDS, MAX_FIELDS]`.
/// - `fields[0]` is the non-nullable key named [`KEY_FIELD_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Target table name.
    pub table_name: String,
    /// Ordered columns.
    pub fields: Vec<FieldSpec>,
    /// Rows the producer must insert.
    pub row_count: u64,
}

impl SchemaDefinition {
    /// Returns the surrogate key field.
    #[must_use]
    pub fn key_field(&self) -> Option<&FieldSpec> {
        self.fields.first()
    }

    /// Returns column names in declaration order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

/// Inputs to [`synthesize`].
#[derive(Debug, Clone)]
pub struct SynthesisRequest<'a> {
    /// Target dialect.
    pub dialect: Dialect,
    /// Target table name.
    pub table_name: &'a str,
    /// Requested field count before clamping.
    pub field_count: usize,
    /// Rows the producer must insert.
    pub row_count: u64,
    /// Optional hint tokens; empty selects the dialect pool.
    pub type_hints: &'a [String],
    /// Capacity cap (`0` disables capping).
    pub max_field_size: u32,
    /// Treatment of unrecognized hints.
    pub hint_policy: HintPolicy,
}

/// Schema synthesis errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// A hint token has no entry in the dialect's lookup table.
    #[error("unknown type hint '{hint}' for {dialect}")]
    UnknownTypeHint {
        /// Offending hint token as written.
        hint: String,
        /// Target dialect.
        dialect: Dialect,
    },
}

// ============================================================================
// SECTION: Synthesis
// ============================================================================

/// Clamps a requested field count into the supported range.
#[must_use]
pub const fn clamp_field_count(requested: usize) -> usize {
    if requested < MIN_FIELDS {
        MIN_FIELDS
    } else if requested > MAX_FIELDS {
        MAX_FIELDS
    } else {
        requested
    }
}

/// Resolves hint tokens into the candidate pool for a dialect.
///
/// # Errors
///
/// Returns [`SynthesisError::UnknownTypeHint`] under [`HintPolicy::Strict`]
/// when a token is absent from the dialect's lookup table.
pub fn resolve_hints(
    dialect: Dialect,
    hints: &[String],
    policy: HintPolicy,
) -> Result<Vec<ColumnType>, SynthesisError> {
    let catalog = type_catalog(dialect);
    hints
        .iter()
        .map(|raw| {
            let token = normalize_hint(raw);
            match (catalog.resolve(&token), policy) {
                (Some(column_type), _) => Ok(column_type),
                (None, HintPolicy::Lenient) => Ok(catalog.classify(&token)),
                (None, HintPolicy::Strict) => Err(SynthesisError::UnknownTypeHint {
                    hint: raw.clone(),
                    dialect,
                }),
            }
        })
        .collect()
}

/// Synthesizes a schema for the request using the supplied RNG.
///
/// # Errors
///
/// Returns [`SynthesisError`] when hints cannot be resolved under the policy.
pub fn synthesize<R: Rng + ?Sized>(
    request: &SynthesisRequest<'_>,
    rng: &mut R,
) -> Result<SchemaDefinition, SynthesisError> {
    let catalog = type_catalog(request.dialect);
    let field_count = clamp_field_count(request.field_count);
    let hinted;
    let pool: &[ColumnType] = if request.type_hints.is_empty() {
        catalog.pool
    } else {
        hinted = resolve_hints(request.dialect, request.type_hints, request.hint_policy)?;
        &hinted
    };

    let mut fields = Vec::with_capacity(field_count);
    fields.push(key_field(catalog));
    for index in 1 .. field_count {
        let candidate = pool[rng.gen_range(0 .. pool.len())];
        let (column_type, max_size) = candidate.capped(request.max_field_size);
        fields.push(FieldSpec {
            name: format!("col_{index}"),
            column_type,
            max_size,
            nullable: rng.gen_bool(NULLABLE_PROBABILITY),
        });
    }

    Ok(SchemaDefinition {
        table_name: request.table_name.to_string(),
        fields,
        row_count: request.row_count,
    })
}

/// Builds the surrogate key column.
fn key_field(catalog: &TypeCatalog) -> FieldSpec {
    FieldSpec {
        name: KEY_FIELD_NAME.to_string(),
        column_type: catalog.key,
        max_size: 0,
        nullable: false,
    }
}
