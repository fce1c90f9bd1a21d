// crates/data-integrate-core/src/core/namespace.rs
// ============================================================================
// Module: Namespace Allocator
// Description: Collision-free run namespaces and derived object names.
// Purpose: Isolate concurrent runs against shared databases and catalogs.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! A namespace combines a sanitized seed (usually the template name) with the
//! wall-clock second, a process-local sequence number, and a random suffix.
//! Table and asset names are then derived from the namespace without any
//! further randomness, so a caller that supplies its own namespace gets
//! reproducible names.
//!
//! ## Invariants
//! - Every namespace is a valid unquoted SQL identifier fragment
//!   (`[a-z0-9_]`, no leading or trailing underscore).
//! - Two calls within one process never return the same namespace.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::Rng;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator between namespace components and derived names.
pub const NAME_SEPARATOR: char = '_';
/// Maximum length of the sanitized namespace prefix.
pub const MAX_PREFIX_LEN: usize = 8;
/// Maximum length of the sanitized seed fragment.
pub const MAX_SEED_LEN: usize = 16;
/// Maximum length of a sanitized base name.
pub const MAX_BASE_LEN: usize = 24;
/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "test";

/// Process-local sequence guaranteeing per-call uniqueness.
static NAMESPACE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// SECTION: Allocator
// ============================================================================

/// Produces run namespaces under a fixed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceAllocator {
    /// Sanitized prefix shared by every namespace from this allocator.
    prefix: String,
}

impl Default for NamespaceAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl NamespaceAllocator {
    /// Creates an allocator; the prefix is sanitized and falls back to `test`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: sanitize_identifier(prefix, MAX_PREFIX_LEN, DEFAULT_PREFIX),
        }
    }

    /// Returns the sanitized prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generates a fresh namespace for `seed` using the thread RNG and clock.
    #[must_use]
    pub fn generate_namespace(&self, seed: &str) -> String {
        let unix_secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
        self.generate_namespace_with(seed, unix_secs, &mut rand::thread_rng())
    }

    /// Generates a namespace from an explicit clock reading and RNG.
    #[must_use]
    pub fn generate_namespace_with<R: Rng + ?Sized>(
        &self,
        seed: &str,
        unix_secs: u64,
        rng: &mut R,
    ) -> String {
        let seed = sanitize_identifier(seed, MAX_SEED_LEN, "run");
        let sequence = NAMESPACE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let suffix: u32 = rng.gen_range(0 .. 0x0100_0000);
        format!("{}_{seed}_{unix_secs}_{sequence:x}{suffix:06x}", self.prefix)
    }

    /// Adopts an externally supplied namespace after sanitization.
    #[must_use]
    pub fn adopt_namespace(&self, supplied: &str) -> String {
        sanitize_identifier(supplied, MAX_PREFIX_LEN + MAX_SEED_LEN + 24, &self.prefix)
    }
}

// ============================================================================
// SECTION: Derived Names
// ============================================================================

/// Derives the run-scoped table name for `base`.
#[must_use]
pub fn table_name(namespace: &str, base: &str) -> String {
    join_name(namespace, base)
}

/// Derives the run-scoped asset name for `base`.
#[must_use]
pub fn asset_name(namespace: &str, base: &str) -> String {
    join_name(namespace, base)
}

/// Joins a namespace and a sanitized base with the fixed separator.
fn join_name(namespace: &str, base: &str) -> String {
    let base = sanitize_identifier(base, MAX_BASE_LEN, "object");
    format!("{namespace}{NAME_SEPARATOR}{base}")
}

/// Reduces arbitrary text to a lowercase `[a-z0-9_]` identifier fragment.
///
/// Runs of other characters collapse to one underscore, edges are trimmed,
/// and the result is truncated to `max_len`. Empty results yield `fallback`.
#[must_use]
pub fn sanitize_identifier(raw: &str, max_len: usize, fallback: &str) -> String {
    let mut out = String::with_capacity(raw.len().min(max_len));
    let mut pending_separator = false;
    for ch in raw.chars() {
        let lowered = ch.to_ascii_lowercase();
        if lowered.is_ascii_lowercase() || lowered.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push(NAME_SEPARATOR);
            }
            pending_separator = false;
            out.push(lowered);
        } else {
            pending_separator = true;
        }
        if out.len() >= max_len {
            break;
        }
    }
    out.truncate(max_len);
    let trimmed = out.trim_end_matches(NAME_SEPARATOR);
    if trimmed.is_empty() { fallback.to_string() } else { trimmed.to_string() }
}
