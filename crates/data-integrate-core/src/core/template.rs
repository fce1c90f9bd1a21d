// crates/data-integrate-core/src/core/template.rs
// ============================================================================
// Module: Test Templates
// Description: Declarative description of one harness run.
// Purpose: Model target database, schema, data volume, and ordered assertions.
// Dependencies: serde, serde_json, crate::core::namespace
// ============================================================================

//! ## Overview
//! A [`TestTemplate`] is loaded once per run and never mutated afterwards.
//! Wire field names follow the YAML template format (`type`, `field_count`,
//! `keep_table`, ...). Assertion kinds outside the known set are preserved as
//! [`AssertionKind::Unknown`] so that only the offending assertion fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::namespace;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default assertion tolerance in percent.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 0.1;
/// Base name for run-scoped tables.
pub const DEFAULT_TABLE_BASE: &str = "test_table";

// ============================================================================
// SECTION: Template Types
// ============================================================================

/// Declarative run template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestTemplate {
    /// Template name; also the default asset base name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Target database selection.
    pub database: DatabaseTarget,
    /// Schema requirements.
    #[serde(default)]
    pub schema: SchemaRequirements,
    /// Data volume requirements.
    #[serde(default)]
    pub data: DataRequirements,
    /// Ordered assertions.
    #[serde(default)]
    pub tests: Vec<Assertion>,
}

/// Target database selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseTarget {
    /// Dialect tag (`mysql`, `kingbase`, `gbase`, `vastbase`).
    #[serde(rename = "type", alias = "dialect")]
    pub dialect: String,
    /// Optional logical database name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Schema requirements for the synthesized table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaRequirements {
    /// Requested field count (clamped to 1..=16 by the synthesizer).
    #[serde(default)]
    pub field_count: usize,
    /// Optional type hint tokens.
    #[serde(default)]
    pub field_types: Vec<String>,
    /// Optional capacity cap (`0` disables capping).
    #[serde(default)]
    pub max_field_size: u32,
    /// Optional explicit table name (used literally).
    #[serde(default)]
    pub table_name: Option<String>,
    /// Optional explicit asset name (used literally).
    #[serde(default)]
    pub asset_name: Option<String>,
}

/// Data volume requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataRequirements {
    /// Rows the target table must hold.
    #[serde(default)]
    pub row_count: u64,
    /// Preserve the table after the run.
    #[serde(default)]
    pub keep_table: bool,
}

/// Single read/write assertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    /// Assertion kind.
    #[serde(rename = "type", alias = "kind")]
    pub kind: AssertionKind,
    /// Expected row count.
    #[serde(default)]
    pub expected: u64,
    /// Allowed deviation in percent.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Free-form parameters.
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
}

impl Assertion {
    /// Returns the string parameter `key`, if present.
    #[must_use]
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

/// Assertion kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssertionKind {
    /// Count rows and compare.
    Read,
    /// Re-query the table after a write and compare.
    Write,
    /// Write, then read; short-circuits on a failed write.
    ReadWrite,
    /// Unrecognized kind, kept verbatim.
    Unknown(String),
}

impl AssertionKind {
    /// Returns the wire label of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::ReadWrite => "read_write",
            Self::Unknown(kind) => kind,
        }
    }
}

impl From<String> for AssertionKind {
    fn from(value: String) -> Self {
        match value.trim() {
            "read" => Self::Read,
            "write" => Self::Write,
            "read_write" => Self::ReadWrite,
            _ => Self::Unknown(value),
        }
    }
}

impl From<AssertionKind> for String {
    fn from(value: AssertionKind) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serde default for assertion tolerance.
const fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE_PERCENT
}

// ============================================================================
// SECTION: Run Planning
// ============================================================================

/// Names resolved for one run before any side effect happens.
///
/// # Invariants
/// - `retain_table` is true whenever the table name came from the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunPlan {
    /// Run namespace.
    pub namespace: String,
    /// Resolved table name.
    pub table_name: String,
    /// Resolved asset name.
    pub asset_name: String,
    /// Whether the table name came from the template.
    pub explicit_table: bool,
    /// Whether the asset name came from the template.
    pub explicit_asset: bool,
    /// Whether cleanup must preserve the table.
    pub retain_table: bool,
}

impl RunPlan {
    /// Resolves table and asset names for `template` under `namespace`.
    ///
    /// Explicit template names are used literally; omitted names are
    /// namespace-prefixed. Blank names count as omitted.
    #[must_use]
    pub fn resolve(template: &TestTemplate, namespace: &str) -> Self {
        let explicit_table = non_blank(template.schema.table_name.as_deref());
        let explicit_asset = non_blank(template.schema.asset_name.as_deref());
        let table_name = explicit_table.map_or_else(
            || namespace::table_name(namespace, DEFAULT_TABLE_BASE),
            str::to_string,
        );
        let asset_name = explicit_asset
            .map_or_else(|| namespace::asset_name(namespace, &template.name), str::to_string);
        Self {
            namespace: namespace.to_string(),
            table_name,
            asset_name,
            explicit_table: explicit_table.is_some(),
            explicit_asset: explicit_asset.is_some(),
            retain_table: explicit_table.is_some() || template.data.keep_table,
        }
    }
}

/// Returns the trimmed value when it is non-empty.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
