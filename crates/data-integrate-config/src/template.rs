// crates/data-integrate-config/src/template.rs
// ============================================================================
// Module: Template Loading
// Description: YAML test template parsing, normalization, and validation.
// Purpose: Reject malformed templates before any database is touched.
// Dependencies: data-integrate-core, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! Templates are read with the same size and path limits as the base
//! configuration, parsed from YAML, normalized (blank names dropped,
//! non-positive tolerances reset to 0.1), and validated. Under the strict
//! hint policy every type hint must resolve for the target dialect, so a
//! misspelled hint fails here instead of silently becoming another type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use data_integrate_core::DEFAULT_TOLERANCE_PERCENT;
use data_integrate_core::Dialect;
use data_integrate_core::HintPolicy;
use data_integrate_core::TestTemplate;
use data_integrate_core::resolve_hints;
use thiserror::Error;

use crate::limits::InputError;
use crate::limits::read_bounded_utf8;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Largest accepted `schema.max_field_size`.
pub const MAX_FIELD_SIZE_CAP: u32 = 65_535;
/// Maximum assertions per template.
pub const MAX_ASSERTIONS: usize = 256;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Template errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// I/O failure while reading the template.
    #[error("template io error: {0}")]
    Io(String),
    /// YAML parsing error.
    #[error("template parse error: {0}")]
    Parse(String),
    /// Invalid template data.
    #[error("invalid template: {0}")]
    Invalid(String),
}

impl From<InputError> for TemplateError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Io(message) => Self::Io(message),
            InputError::Invalid(message) => Self::Invalid(format!("template {message}")),
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads, normalizes, and validates a template file.
///
/// # Errors
///
/// Returns [`TemplateError`] when reading, parsing, or validation fails.
pub fn load_template(path: &Path, policy: HintPolicy) -> Result<TestTemplate, TemplateError> {
    let content = read_bounded_utf8(path)?;
    parse_template(&content, policy)
}

/// Parses, normalizes, and validates template text.
///
/// # Errors
///
/// Returns [`TemplateError`] when parsing or validation fails.
pub fn parse_template(content: &str, policy: HintPolicy) -> Result<TestTemplate, TemplateError> {
    let mut template: TestTemplate =
        serde_yaml::from_str(content).map_err(|err| TemplateError::Parse(err.to_string()))?;
    normalize_template(&mut template);
    validate_template(&template, policy)?;
    Ok(template)
}

/// Drops blank optional names and resets unusable tolerances.
pub fn normalize_template(template: &mut TestTemplate) {
    template.name = template.name.trim().to_string();
    template.database.dialect = template.database.dialect.trim().to_ascii_lowercase();
    for name in [
        &mut template.database.name,
        &mut template.schema.table_name,
        &mut template.schema.asset_name,
    ] {
        if let Some(value) = name.take() {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                *name = Some(trimmed.to_string());
            }
        }
    }
    for assertion in &mut template.tests {
        if !(assertion.tolerance.is_finite() && assertion.tolerance > 0.0) {
            assertion.tolerance = DEFAULT_TOLERANCE_PERCENT;
        }
    }
}

/// Validates a normalized template.
///
/// # Errors
///
/// Returns [`TemplateError::Invalid`] when the template is unusable.
pub fn validate_template(template: &TestTemplate, policy: HintPolicy) -> Result<(), TemplateError> {
    if template.name.is_empty() {
        return Err(TemplateError::Invalid("name must be non-empty".to_string()));
    }
    let dialect = Dialect::from_tag(&template.database.dialect)
        .map_err(|err| TemplateError::Invalid(err.to_string()))?;
    if template.schema.max_field_size > MAX_FIELD_SIZE_CAP {
        return Err(TemplateError::Invalid(format!(
            "schema.max_field_size must be at most {MAX_FIELD_SIZE_CAP}"
        )));
    }
    if template.tests.len() > MAX_ASSERTIONS {
        return Err(TemplateError::Invalid(format!("at most {MAX_ASSERTIONS} tests are allowed")));
    }
    for (index, assertion) in template.tests.iter().enumerate() {
        if !assertion.tolerance.is_finite() || assertion.tolerance < 0.0 {
            return Err(TemplateError::Invalid(format!(
                "tests[{index}].tolerance must be a non-negative number"
            )));
        }
    }
    resolve_hints(dialect, &template.schema.field_types, policy)
        .map_err(|err| TemplateError::Invalid(err.to_string()))?;
    Ok(())
}
