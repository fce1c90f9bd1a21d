// crates/data-integrate-dialects/src/lib.rs
// ============================================================================
// Module: Data Integrate Dialects
// Description: Database strategies, sessions, and the bulk producer.
// Purpose: Provide concrete `DialectStrategy` and `DataProducer` implementations.
// Dependencies: async-trait, mysql_async, rand, tokio, tokio-postgres
// ============================================================================

//! ## Overview
//! [`create_strategy`] turns a [`data_integrate_core::DatabaseConnection`]
//! into a boxed strategy for MySQL, GBase, KingbaseES, or Vastbase.
//! [`BulkInsertProducer`] creates and fills synthesized tables through any
//! of them.

pub mod factory;
pub mod producer;
pub mod session;
pub mod strategies;
pub mod syntax;

pub use factory::create_strategy;
pub use producer::BulkInsertProducer;
pub use producer::DEFAULT_INSERT_BATCH_SIZE;
pub use session::MySqlSession;
pub use session::PostgresSession;
pub use strategies::GbaseStrategy;
pub use strategies::KingbaseStrategy;
pub use strategies::MySqlStrategy;
pub use strategies::VastbaseStrategy;
pub use syntax::DialectSyntax;
pub use syntax::MYSQL_SYNTAX;
pub use syntax::POSTGRES_SYNTAX;
pub use syntax::PlaceholderStyle;
pub use syntax::syntax_for;
