// crates/data-integrate-core/src/core/types.rs
// ============================================================================
// Module: Column Type Catalog
// Description: Concrete SQL column types and per-dialect type tables.
// Purpose: Replace free-form type strings with a closed, checkable model.
// Dependencies: serde, crate::core::dialect
// ============================================================================

//! ## Overview
//! [`ColumnType`] is a tagged model of every concrete type the synthesizer can
//! emit. Each dialect owns a [`TypeCatalog`]: the random pool used when a
//! template gives no hints, the hint lookup table, and the fallbacks used by
//! the lenient heuristic classifier.
//!
//! ## Invariants
//! - Capacity is the declared size for `CHAR(n)`/`VARCHAR(n)`, a fixed
//!   [`LARGE_OBJECT_CAPACITY`] for text and binary objects, and `0` for
//!   numeric and temporal types.
//! - Only character types with a declared size are ever resized.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::dialect::Dialect;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Capacity reported for large text and binary objects, in bytes.
pub const LARGE_OBJECT_CAPACITY: u32 = 1024;

// ============================================================================
// SECTION: Column Types
// ============================================================================

/// Broad type family used for capacity rules and value synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    /// Integer widths.
    Integer,
    /// Binary floating point.
    Float,
    /// Fixed-point decimal.
    Fixed,
    /// Character types with a declared width.
    Character,
    /// Unbounded character objects (TEXT, CLOB).
    LargeText,
    /// Dates and timestamps.
    Temporal,
    /// Binary objects.
    Binary,
}

/// Concrete SQL column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// `TINYINT`.
    TinyInt,
    /// `SMALLINT`.
    SmallInt,
    /// `MEDIUMINT`.
    MediumInt,
    /// `INT`.
    Int,
    /// `INTEGER`.
    Integer,
    /// `BIGINT`.
    BigInt,
    /// `FLOAT`.
    Float,
    /// `REAL`.
    Real,
    /// `DOUBLE`.
    Double,
    /// `DOUBLE PRECISION`.
    DoublePrecision,
    /// `DECIMAL(p,s)`.
    Decimal {
        /// Total digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: u8,
    },
    /// `NUMERIC(p,s)`.
    Numeric {
        /// Total digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: u8,
    },
    /// `CHAR(n)`.
    Char(u32),
    /// `VARCHAR(n)`.
    Varchar(u32),
    /// `TEXT`.
    Text,
    /// `MEDIUMTEXT`.
    MediumText,
    /// `CLOB`.
    Clob,
    /// `DATE`.
    Date,
    /// `DATETIME`.
    DateTime,
    /// `TIMESTAMP`.
    Timestamp,
    /// `BLOB`.
    Blob,
    /// `TINYBLOB`.
    TinyBlob,
    /// `MEDIUMBLOB`.
    MediumBlob,
    /// `BYTEA`.
    Bytea,
}

impl ColumnType {
    /// Renders the type as it appears in DDL.
    #[must_use]
    pub fn sql(self) -> String {
        match self {
            Self::TinyInt => "TINYINT".to_string(),
            Self::SmallInt => "SMALLINT".to_string(),
            Self::MediumInt => "MEDIUMINT".to_string(),
            Self::Int => "INT".to_string(),
            Self::Integer => "INTEGER".to_string(),
            Self::BigInt => "BIGINT".to_string(),
            Self::Float => "FLOAT".to_string(),
            Self::Real => "REAL".to_string(),
            Self::Double => "DOUBLE".to_string(),
            Self::DoublePrecision => "DOUBLE PRECISION".to_string(),
            Self::Decimal {
                precision,
                scale,
            } => format!("DECIMAL({precision},{scale})"),
            Self::Numeric {
                precision,
                scale,
            } => format!("NUMERIC({precision},{scale})"),
            Self::Char(size) => format!("CHAR({size})"),
            Self::Varchar(size) => format!("VARCHAR({size})"),
            Self::Text => "TEXT".to_string(),
            Self::MediumText => "MEDIUMTEXT".to_string(),
            Self::Clob => "CLOB".to_string(),
            Self::Date => "DATE".to_string(),
            Self::DateTime => "DATETIME".to_string(),
            Self::Timestamp => "TIMESTAMP".to_string(),
            Self::Blob => "BLOB".to_string(),
            Self::TinyBlob => "TINYBLOB".to_string(),
            Self::MediumBlob => "MEDIUMBLOB".to_string(),
            Self::Bytea => "BYTEA".to_string(),
        }
    }

    /// Returns the broad family of the type.
    #[must_use]
    pub const fn category(self) -> TypeCategory {
        match self {
            Self::TinyInt
            | Self::SmallInt
            | Self::MediumInt
            | Self::Int
            | Self::Integer
            | Self::BigInt => TypeCategory::Integer,
            Self::Float | Self::Real | Self::Double | Self::DoublePrecision => TypeCategory::Float,
            Self::Decimal {
                ..
            }
            | Self::Numeric {
                ..
            } => TypeCategory::Fixed,
            Self::Char(_) | Self::Varchar(_) => TypeCategory::Character,
            Self::Text | Self::MediumText | Self::Clob => TypeCategory::LargeText,
            Self::Date | Self::DateTime | Self::Timestamp => TypeCategory::Temporal,
            Self::Blob | Self::TinyBlob | Self::MediumBlob | Self::Bytea => TypeCategory::Binary,
        }
    }

    /// Returns the byte/character capacity of the type (`0` means unbounded).
    #[must_use]
    pub const fn capacity(self) -> u32 {
        match self {
            Self::Char(size) | Self::Varchar(size) => size,
            _ => match self.category() {
                TypeCategory::LargeText | TypeCategory::Binary => LARGE_OBJECT_CAPACITY,
                _ => 0,
            },
        }
    }

    /// Applies a capacity cap and returns the adjusted type and capacity.
    ///
    /// A cap of `0` disables capping. Declared character widths are rewritten
    /// to the cap; every other type keeps its declaration.
    #[must_use]
    pub const fn capped(self, cap: u32) -> (Self, u32) {
        let capacity = self.capacity();
        if cap == 0 || capacity <= cap {
            return (self, capacity);
        }
        let resized = match self {
            Self::Char(_) => Self::Char(cap),
            Self::Varchar(_) => Self::Varchar(cap),
            other => other,
        };
        (resized, cap)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}

// ============================================================================
// SECTION: Type Hints
// ============================================================================

/// Template-level type hint token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeHint {
    /// `int`.
    Int,
    /// `tinyint`.
    TinyInt,
    /// `smallint`.
    SmallInt,
    /// `mediumint`.
    MediumInt,
    /// `bigint`.
    BigInt,
    /// `float`.
    Float,
    /// `real`.
    Real,
    /// `double`.
    Double,
    /// `decimal`.
    Decimal,
    /// `decimal18`.
    Decimal18,
    /// `decimal38`.
    Decimal38,
    /// `numeric`.
    Numeric,
    /// `char`.
    Char,
    /// `varchar`.
    Varchar,
    /// `text`.
    Text,
    /// `mediumtext`.
    MediumText,
    /// `clob`.
    Clob,
    /// `date`.
    Date,
    /// `datetime`.
    DateTime,
    /// `timestamp`.
    Timestamp,
    /// `blob`.
    Blob,
    /// `tinyblob`.
    TinyBlob,
    /// `mediumblob`.
    MediumBlob,
    /// `bytea`.
    Bytea,
}

impl TypeHint {
    /// Parses a normalized (trimmed, lowercase) hint token.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let hint = match token {
            "int" => Self::Int,
            "tinyint" => Self::TinyInt,
            "smallint" => Self::SmallInt,
            "mediumint" => Self::MediumInt,
            "bigint" => Self::BigInt,
            "float" => Self::Float,
            "real" => Self::Real,
            "double" => Self::Double,
            "decimal" => Self::Decimal,
            "decimal18" => Self::Decimal18,
            "decimal38" => Self::Decimal38,
            "numeric" => Self::Numeric,
            "char" => Self::Char,
            "varchar" => Self::Varchar,
            "text" => Self::Text,
            "mediumtext" => Self::MediumText,
            "clob" => Self::Clob,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            "blob" => Self::Blob,
            "tinyblob" => Self::TinyBlob,
            "mediumblob" => Self::MediumBlob,
            "bytea" => Self::Bytea,
            _ => return None,
        };
        Some(hint)
    }
}

/// Normalizes a raw hint token for lookup.
#[must_use]
pub fn normalize_hint(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

// ============================================================================
// SECTION: Dialect Catalogs
// ============================================================================

/// Per-dialect type tables.
///
/// # Invariants
/// - `pool` is non-empty.
/// - Every entry of `hints` maps to a type the dialect accepts in DDL.
#[derive(Debug)]
pub struct TypeCatalog {
    /// Types drawn from when a template gives no hints.
    pub pool: &'static [ColumnType],
    /// Hint lookup table.
    pub hints: &'static [(TypeHint, ColumnType)],
    /// Surrogate key type.
    pub key: ColumnType,
    /// Fixed-point fallback for the heuristic classifier.
    pub decimal: ColumnType,
    /// Temporal fallback for the heuristic classifier.
    pub datetime: ColumnType,
}

impl TypeCatalog {
    /// Looks up the concrete type for a recognized hint.
    #[must_use]
    pub fn lookup(&self, hint: TypeHint) -> Option<ColumnType> {
        self.hints.iter().find(|(candidate, _)| *candidate == hint).map(|(_, ty)| *ty)
    }

    /// Resolves a normalized hint token through the lookup table only.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<ColumnType> {
        TypeHint::parse(token).and_then(|hint| self.lookup(hint))
    }

    /// Classifies an unrecognized token by keyword substrings.
    #[must_use]
    pub fn classify(&self, token: &str) -> ColumnType {
        if token.contains("int") {
            self.key
        } else if token.contains("char") {
            ColumnType::Varchar(255)
        } else if token.contains("text") {
            ColumnType::Text
        } else if token.contains("decimal") || token.contains("numeric") {
            self.decimal
        } else if token.contains("date") || token.contains("time") {
            self.datetime
        } else {
            ColumnType::Varchar(255)
        }
    }
}

/// `MySQL` type catalog.
static MYSQL_CATALOG: TypeCatalog = TypeCatalog {
    pool: &[
        ColumnType::TinyInt,
        ColumnType::SmallInt,
        ColumnType::MediumInt,
        ColumnType::Int,
        ColumnType::BigInt,
        ColumnType::Float,
        ColumnType::Double,
        ColumnType::Decimal {
            precision: 10,
            scale: 2,
        },
        ColumnType::Decimal {
            precision: 18,
            scale: 4,
        },
        ColumnType::Decimal {
            precision: 38,
            scale: 6,
        },
        ColumnType::Char(100),
        ColumnType::Char(255),
        ColumnType::Varchar(255),
        ColumnType::Varchar(512),
        ColumnType::Varchar(1024),
        ColumnType::Text,
        ColumnType::MediumText,
        ColumnType::Date,
        ColumnType::DateTime,
        ColumnType::Timestamp,
        ColumnType::Blob,
        ColumnType::TinyBlob,
        ColumnType::MediumBlob,
    ],
    hints: &[
        (TypeHint::Int, ColumnType::Int),
        (TypeHint::TinyInt, ColumnType::TinyInt),
        (TypeHint::SmallInt, ColumnType::SmallInt),
        (TypeHint::MediumInt, ColumnType::MediumInt),
        (TypeHint::BigInt, ColumnType::BigInt),
        (TypeHint::Float, ColumnType::Float),
        (TypeHint::Double, ColumnType::Double),
        (
            TypeHint::Decimal,
            ColumnType::Decimal {
                precision: 10,
                scale: 2,
            },
        ),
        (
            TypeHint::Decimal18,
            ColumnType::Decimal {
                precision: 18,
                scale: 4,
            },
        ),
        (
            TypeHint::Decimal38,
            ColumnType::Decimal {
                precision: 38,
                scale: 6,
            },
        ),
        (TypeHint::Varchar, ColumnType::Varchar(255)),
        (TypeHint::Char, ColumnType::Char(255)),
        (TypeHint::Text, ColumnType::Text),
        (TypeHint::MediumText, ColumnType::MediumText),
        (TypeHint::Date, ColumnType::Date),
        (TypeHint::DateTime, ColumnType::DateTime),
        (TypeHint::Timestamp, ColumnType::Timestamp),
        (TypeHint::Blob, ColumnType::Blob),
        (TypeHint::TinyBlob, ColumnType::TinyBlob),
        (TypeHint::MediumBlob, ColumnType::MediumBlob),
    ],
    key: ColumnType::BigInt,
    decimal: ColumnType::Decimal {
        precision: 10,
        scale: 2,
    },
    datetime: ColumnType::DateTime,
};

/// `KingbaseES` type catalog.
static KINGBASE_CATALOG: TypeCatalog = TypeCatalog {
    pool: &[
        ColumnType::SmallInt,
        ColumnType::Integer,
        ColumnType::BigInt,
        ColumnType::Real,
        ColumnType::DoublePrecision,
        ColumnType::Numeric {
            precision: 10,
            scale: 2,
        },
        ColumnType::Varchar(255),
        ColumnType::Varchar(512),
        ColumnType::Varchar(1024),
        ColumnType::Text,
        ColumnType::Clob,
        ColumnType::Date,
        ColumnType::Timestamp,
        ColumnType::Bytea,
    ],
    hints: &[
        (TypeHint::Int, ColumnType::Integer),
        (TypeHint::SmallInt, ColumnType::SmallInt),
        (TypeHint::BigInt, ColumnType::BigInt),
        (TypeHint::Real, ColumnType::Real),
        (TypeHint::Double, ColumnType::DoublePrecision),
        (
            TypeHint::Numeric,
            ColumnType::Numeric {
                precision: 10,
                scale: 2,
            },
        ),
        (
            TypeHint::Decimal,
            ColumnType::Numeric {
                precision: 10,
                scale: 2,
            },
        ),
        (TypeHint::Varchar, ColumnType::Varchar(255)),
        (TypeHint::Char, ColumnType::Char(255)),
        (TypeHint::Text, ColumnType::Text),
        (TypeHint::Clob, ColumnType::Clob),
        (TypeHint::Date, ColumnType::Date),
        (TypeHint::Timestamp, ColumnType::Timestamp),
        (TypeHint::Bytea, ColumnType::Bytea),
    ],
    key: ColumnType::BigInt,
    decimal: ColumnType::Numeric {
        precision: 10,
        scale: 2,
    },
    datetime: ColumnType::Timestamp,
};

/// `GBase` type catalog.
static GBASE_CATALOG: TypeCatalog = TypeCatalog {
    pool: &[
        ColumnType::TinyInt,
        ColumnType::SmallInt,
        ColumnType::Int,
        ColumnType::BigInt,
        ColumnType::Float,
        ColumnType::Double,
        ColumnType::Decimal {
            precision: 10,
            scale: 2,
        },
        ColumnType::Varchar(255),
        ColumnType::Varchar(512),
        ColumnType::Varchar(1024),
        ColumnType::Text,
        ColumnType::Clob,
        ColumnType::Date,
        ColumnType::DateTime,
        ColumnType::Timestamp,
        ColumnType::Blob,
    ],
    hints: &[
        (TypeHint::Int, ColumnType::Int),
        (TypeHint::TinyInt, ColumnType::TinyInt),
        (TypeHint::SmallInt, ColumnType::SmallInt),
        (TypeHint::BigInt, ColumnType::BigInt),
        (TypeHint::Float, ColumnType::Float),
        (TypeHint::Double, ColumnType::Double),
        (
            TypeHint::Decimal,
            ColumnType::Decimal {
                precision: 10,
                scale: 2,
            },
        ),
        (TypeHint::Varchar, ColumnType::Varchar(255)),
        (TypeHint::Char, ColumnType::Char(255)),
        (TypeHint::Text, ColumnType::Text),
        (TypeHint::Clob, ColumnType::Clob),
        (TypeHint::Date, ColumnType::Date),
        (TypeHint::DateTime, ColumnType::DateTime),
        (TypeHint::Timestamp, ColumnType::Timestamp),
        (TypeHint::Blob, ColumnType::Blob),
    ],
    key: ColumnType::BigInt,
    decimal: ColumnType::Decimal {
        precision: 10,
        scale: 2,
    },
    datetime: ColumnType::DateTime,
};

/// Vastbase type catalog.
static VASTBASE_CATALOG: TypeCatalog = TypeCatalog {
    pool: &[
        ColumnType::SmallInt,
        ColumnType::Integer,
        ColumnType::BigInt,
        ColumnType::Real,
        ColumnType::DoublePrecision,
        ColumnType::Numeric {
            precision: 10,
            scale: 2,
        },
        ColumnType::Varchar(255),
        ColumnType::Varchar(512),
        ColumnType::Varchar(1024),
        ColumnType::Text,
        ColumnType::Date,
        ColumnType::Timestamp,
        ColumnType::Bytea,
    ],
    hints: &[
        (TypeHint::Int, ColumnType::Integer),
        (TypeHint::SmallInt, ColumnType::SmallInt),
        (TypeHint::BigInt, ColumnType::BigInt),
        (TypeHint::Real, ColumnType::Real),
        (TypeHint::Double, ColumnType::DoublePrecision),
        (
            TypeHint::Numeric,
            ColumnType::Numeric {
                precision: 10,
                scale: 2,
            },
        ),
        (
            TypeHint::Decimal,
            ColumnType::Numeric {
                precision: 10,
                scale: 2,
            },
        ),
        (TypeHint::Varchar, ColumnType::Varchar(255)),
        (TypeHint::Char, ColumnType::Char(255)),
        (TypeHint::Text, ColumnType::Text),
        (TypeHint::Date, ColumnType::Date),
        (TypeHint::Timestamp, ColumnType::Timestamp),
        (TypeHint::Bytea, ColumnType::Bytea),
    ],
    key: ColumnType::BigInt,
    decimal: ColumnType::Numeric {
        precision: 10,
        scale: 2,
    },
    datetime: ColumnType::Timestamp,
};

/// Returns the type catalog for a dialect.
#[must_use]
pub fn type_catalog(dialect: Dialect) -> &'static TypeCatalog {
    match dialect {
        Dialect::Mysql => &MYSQL_CATALOG,
        Dialect::Kingbase => &KINGBASE_CATALOG,
        Dialect::Gbase => &GBASE_CATALOG,
        Dialect::Vastbase => &VASTBASE_CATALOG,
    }
}
