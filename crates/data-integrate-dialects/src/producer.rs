// crates/data-integrate-dialects/src/producer.rs
// ============================================================================
// Module: Bulk Insert Producer
// Description: Creates synthesized tables and fills them with random rows.
// Purpose: Provide the default `DataProducer` for every dialect.
// Dependencies: async-trait, rand, data-integrate-core
// ============================================================================

//! ## Overview
//! [`BulkInsertProducer`] renders `CREATE TABLE` from a
//! [`SchemaDefinition`] and inserts rows in multi-row `INSERT` batches.
//! Identifiers are quoted by the strategy, so the producer never branches on
//! dialect. Values are generated per [`TypeCategory`] and respect each
//! field's capacity. The key column receives sequential values from 1.
//!
//! ## Invariants
//! - Inserted row count equals `schema.row_count` on success.
//! - Character values never exceed the field capacity.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use data_integrate_core::ColumnType;
use data_integrate_core::DataProducer;
use data_integrate_core::DialectStrategy;
use data_integrate_core::FieldSpec;
use data_integrate_core::ProducerError;
use data_integrate_core::SchemaDefinition;
use data_integrate_core::TypeCategory;
use rand::Rng;
use rand::SeedableRng;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default rows per `INSERT` statement.
pub const DEFAULT_INSERT_BATCH_SIZE: usize = 500;
/// Probability that a nullable column receives NULL.
pub const NULL_PROBABILITY: f64 = 0.1;
/// Longest generated value for declared-width character columns.
pub const MAX_CHARACTER_SAMPLE: u32 = 32;
/// Longest generated value for large text and binary columns.
pub const MAX_LARGE_OBJECT_SAMPLE: u32 = 64;
/// Widest integer part generated for fixed-point columns.
const MAX_FIXED_DIGITS: u8 = 9;

// ============================================================================
// SECTION: Producer
// ============================================================================

/// Default producer issuing batched multi-row inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkInsertProducer {
    /// Rows per statement (at least 1).
    batch_size: usize,
    /// Optional RNG seed for reproducible data.
    seed: Option<u64>,
}

impl Default for BulkInsertProducer {
    fn default() -> Self {
        Self::new(DEFAULT_INSERT_BATCH_SIZE, None)
    }
}

impl BulkInsertProducer {
    /// Creates a producer; a zero batch size is raised to 1.
    #[must_use]
    pub const fn new(batch_size: usize, seed: Option<u64>) -> Self {
        Self { batch_size: if batch_size == 0 { 1 } else { batch_size }, seed }
    }

    /// Returns the configured batch size.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Builds the RNG for one `produce` call.
    fn rng(&self) -> StdRng {
        self.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}

#[async_trait]
impl DataProducer for BulkInsertProducer {
    async fn produce(
        &self,
        strategy: &dyn DialectStrategy,
        schema: &SchemaDefinition,
    ) -> Result<u64, ProducerError> {
        if schema.fields.is_empty() {
            return Err(ProducerError::Generation(format!(
                "schema for {} has no fields",
                schema.table_name
            )));
        }
        let session = strategy.session()?;
        let ddl = create_table_sql(|name| strategy.quote_identifier(name), schema);
        session.execute(&ddl).await?;

        let mut rng = self.rng();
        let batch = u64::try_from(self.batch_size).unwrap_or(u64::MAX);
        let mut inserted = 0_u64;
        while inserted < schema.row_count {
            let rows = batch.min(schema.row_count - inserted);
            let sql = insert_sql(strategy, schema, inserted + 1, rows, &mut rng);
            session.execute(&sql).await?;
            inserted += rows;
        }
        Ok(inserted)
    }
}

// ============================================================================
// SECTION: Statement Rendering
// ============================================================================

/// Renders `CREATE TABLE` with the first field as primary key.
///
/// `quote` is the target dialect's identifier quoting.
#[must_use]
pub fn create_table_sql<Q>(quote: Q, schema: &SchemaDefinition) -> String
where
    Q: Fn(&str) -> String,
{
    let columns: Vec<String> = schema
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let constraint = if index == 0 {
                "NOT NULL PRIMARY KEY"
            } else if field.nullable {
                "NULL"
            } else {
                "NOT NULL"
            };
            format!("{} {} {constraint}", quote(&field.name), field.sql_type())
        })
        .collect();
    format!("CREATE TABLE {} ({})", quote(&schema.table_name), columns.join(", "))
}

/// Renders one multi-row `INSERT` for `rows` rows whose keys start at `first_key`.
#[must_use]
pub fn insert_sql<R: Rng + ?Sized>(
    strategy: &dyn DialectStrategy,
    schema: &SchemaDefinition,
    first_key: u64,
    rows: u64,
    rng: &mut R,
) -> String {
    let columns: Vec<String> =
        schema.fields.iter().map(|field| strategy.quote_identifier(&field.name)).collect();
    let tuples: Vec<String> = (first_key .. first_key + rows)
        .map(|key| {
            let values: Vec<String> = schema
                .fields
                .iter()
                .enumerate()
                .map(|(index, field)| {
                    if index == 0 { key.to_string() } else { value_literal(field, rng) }
                })
                .collect();
            format!("({})", values.join(", "))
        })
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        strategy.quote_identifier(&schema.table_name),
        columns.join(", "),
        tuples.join(", ")
    )
}

// ============================================================================
// SECTION: Value Generation
// ============================================================================

/// Generates a SQL literal for a non-key field.
#[must_use]
pub fn value_literal<R: Rng + ?Sized>(field: &FieldSpec, rng: &mut R) -> String {
    if field.nullable && rng.gen_bool(NULL_PROBABILITY) {
        return "NULL".to_string();
    }
    match field.column_type.category() {
        TypeCategory::Integer => integer_literal(field.column_type, rng),
        TypeCategory::Float => format!("{:.3}", rng.gen_range(0.0 .. 100_000.0_f64)),
        TypeCategory::Fixed => fixed_literal(field.column_type, rng),
        TypeCategory::Character => {
            quote_literal(&random_text(rng, sample_len(field.max_size, MAX_CHARACTER_SAMPLE)))
        }
        TypeCategory::LargeText | TypeCategory::Binary => {
            quote_literal(&random_text(rng, sample_len(field.max_size, MAX_LARGE_OBJECT_SAMPLE)))
        }
        TypeCategory::Temporal => temporal_literal(field.column_type, rng),
    }
}

/// Generates an integer within the column's signed range.
fn integer_literal<R: Rng + ?Sized>(column_type: ColumnType, rng: &mut R) -> String {
    let upper: i64 = match column_type {
        ColumnType::TinyInt => i64::from(i8::MAX),
        ColumnType::SmallInt => i64::from(i16::MAX),
        ColumnType::MediumInt => 8_388_607,
        _ => i64::from(i32::MAX),
    };
    rng.gen_range(0 ..= upper).to_string()
}

/// Generates a decimal literal that fits the declared precision and scale.
fn fixed_literal<R: Rng + ?Sized>(column_type: ColumnType, rng: &mut R) -> String {
    let (precision, scale) = match column_type {
        ColumnType::Decimal { precision, scale } | ColumnType::Numeric { precision, scale } => {
            (precision, scale)
        }
        _ => (10, 2),
    };
    let int_digits = precision.saturating_sub(scale).min(MAX_FIXED_DIGITS);
    let frac_digits = scale.min(MAX_FIXED_DIGITS);
    let whole = rng.gen_range(0 .. 10_u64.pow(u32::from(int_digits)));
    if frac_digits == 0 {
        return whole.to_string();
    }
    let frac = rng.gen_range(0 .. 10_u64.pow(u32::from(frac_digits)));
    format!("{whole}.{frac:0width$}", width = usize::from(frac_digits))
}

/// Generates a date or timestamp literal.
fn temporal_literal<R: Rng + ?Sized>(column_type: ColumnType, rng: &mut R) -> String {
    let year = rng.gen_range(2000 ..= 2030);
    let month = rng.gen_range(1 ..= 12);
    let day = rng.gen_range(1 ..= 28);
    if column_type == ColumnType::Date {
        return format!("'{year:04}-{month:02}-{day:02}'");
    }
    let hour = rng.gen_range(0 .. 24);
    let minute = rng.gen_range(0 .. 60);
    let second = rng.gen_range(0 .. 60);
    format!("'{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}'")
}

/// Picks a sample length within `1..=min(capacity, limit)`.
fn sample_len(capacity: u32, limit: u32) -> u32 {
    let bound = if capacity == 0 { limit } else { capacity.min(limit) };
    bound.max(1)
}

/// Generates alphanumeric text of random length up to `max_len`.
fn random_text<R: Rng + ?Sized>(rng: &mut R, max_len: u32) -> String {
    let len = rng.gen_range(1 ..= max_len);
    (0 .. len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Wraps text in single quotes, doubling embedded quotes.
#[must_use]
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
