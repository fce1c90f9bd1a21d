// crates/data-integrate-dialects/src/factory.rs
// ============================================================================
// Module: Strategy Factory
// Description: Maps a connection profile to its dialect strategy.
// Purpose: Single construction point for strategies.
// Dependencies: data-integrate-core, crate::strategies
// ============================================================================

//! ## Overview
//! The only place outside strategy implementations that branches on dialect.
//! Unknown tags fail before any network activity.

// ============================================================================
// SECTION: Imports
// ============================================================================

use data_integrate_core::DatabaseConnection;
use data_integrate_core::Dialect;
use data_integrate_core::DialectError;
use data_integrate_core::DialectStrategy;

use crate::strategies::GbaseStrategy;
use crate::strategies::KingbaseStrategy;
use crate::strategies::MySqlStrategy;
use crate::strategies::VastbaseStrategy;

// ============================================================================
// SECTION: Factory
// ============================================================================

/// Creates a disconnected strategy for `connection`.
///
/// # Errors
///
/// Returns [`DialectError::Unsupported`] when the dialect tag is unknown.
pub fn create_strategy(
    connection: &DatabaseConnection,
) -> Result<Box<dyn DialectStrategy>, DialectError> {
    let connection = connection.clone();
    let strategy: Box<dyn DialectStrategy> = match Dialect::from_tag(&connection.dialect)? {
        Dialect::Mysql => Box::new(MySqlStrategy::new(connection)),
        Dialect::Kingbase => Box::new(KingbaseStrategy::new(connection)),
        Dialect::Gbase => Box::new(GbaseStrategy::new(connection)),
        Dialect::Vastbase => Box::new(VastbaseStrategy::new(connection)),
    };
    Ok(strategy)
}
