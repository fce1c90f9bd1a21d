// crates/data-integrate-config/src/limits.rs
// ============================================================================
// Module: Input Limits
// Description: Shared size and path limits for configuration inputs.
// Purpose: Bound untrusted files before they reach a parser.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Config and template files are read through [`read_bounded_utf8`], which
//! enforces path and size limits before any parsing happens.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum input file size in bytes.
pub const MAX_INPUT_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure reading a bounded input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// I/O failure.
    Io(String),
    /// Limit violation.
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a path against length limits.
///
/// # Errors
///
/// Returns [`InputError::Invalid`] when the path or a component is too long.
pub fn validate_path(path: &Path) -> Result<(), InputError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(InputError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(InputError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

/// Reads a UTF-8 file no larger than [`MAX_INPUT_FILE_SIZE`].
///
/// # Errors
///
/// Returns [`InputError`] when the path is invalid, the file cannot be read,
/// exceeds the size limit, or is not UTF-8.
pub fn read_bounded_utf8(path: &Path) -> Result<String, InputError> {
    validate_path(path)?;
    let bytes = fs::read(path).map_err(|err| InputError::Io(err.to_string()))?;
    if bytes.len() > MAX_INPUT_FILE_SIZE {
        return Err(InputError::Invalid("file exceeds size limit".to_string()));
    }
    String::from_utf8(bytes).map_err(|_| InputError::Invalid("file must be utf-8".to_string()))
}
