// crates/data-integrate-dialects/src/syntax.rs
// ============================================================================
// Module: Dialect Syntax
// Description: Identifier quoting, placeholders, and catalog queries.
// Purpose: Keep every per-dialect SQL difference in one table.
// Dependencies: data-integrate-core
// ============================================================================

//! ## Overview
//! The four supported families differ only in identifier quoting, the
//! placeholder style of parameterized queries, and the function naming the
//! current database or schema. [`DialectSyntax`] captures those three facts
//! and renders the statements strategies issue.

// ============================================================================
// SECTION: Imports
// ============================================================================

use data_integrate_core::Dialect;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Placeholder style for parameterized queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?`
    Question,
    /// `$1`, `$2`, ...
    Numbered,
}

/// SQL syntax facts for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectSyntax {
    /// Identifier quote character.
    pub quote: char,
    /// Placeholder style.
    pub placeholder: PlaceholderStyle,
    /// Expression naming the current database or schema.
    pub schema_function: &'static str,
}

/// Backtick quoting, `?` placeholders, `DATABASE()`.
pub const MYSQL_SYNTAX: DialectSyntax = DialectSyntax {
    quote: '`',
    placeholder: PlaceholderStyle::Question,
    schema_function: "DATABASE()",
};

/// Double-quote quoting, `$n` placeholders, `current_schema()`.
pub const POSTGRES_SYNTAX: DialectSyntax = DialectSyntax {
    quote: '"',
    placeholder: PlaceholderStyle::Numbered,
    schema_function: "current_schema()",
};

/// Returns the syntax table for a dialect.
#[must_use]
pub const fn syntax_for(dialect: Dialect) -> DialectSyntax {
    match dialect {
        Dialect::Mysql | Dialect::Gbase => MYSQL_SYNTAX,
        Dialect::Kingbase | Dialect::Vastbase => POSTGRES_SYNTAX,
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

impl DialectSyntax {
    /// Quotes an identifier, doubling embedded quote characters.
    #[must_use]
    pub fn quote_identifier(&self, identifier: &str) -> String {
        let mut doubled = String::with_capacity(2);
        doubled.push(self.quote);
        doubled.push(self.quote);
        let mut escaped = identifier.replace(self.quote, &doubled);
        escaped.insert(0, self.quote);
        escaped.push(self.quote);
        escaped
    }

    /// Renders the placeholder for the 1-based parameter `index`.
    #[must_use]
    pub fn placeholder(&self, index: usize) -> String {
        match self.placeholder {
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::Numbered => format!("${index}"),
        }
    }

    /// `DROP TABLE IF EXISTS <table>`.
    #[must_use]
    pub fn drop_table_sql(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {}", self.quote_identifier(table))
    }

    /// `SELECT COUNT(*) FROM <table>`.
    #[must_use]
    pub fn count_rows_sql(&self, table: &str) -> String {
        format!("SELECT COUNT(*) FROM {}", self.quote_identifier(table))
    }

    /// Catalog query counting tables named by parameter 1 in the current
    /// database or schema.
    #[must_use]
    pub fn table_exists_sql(&self) -> String {
        let parameter = match self.placeholder {
            PlaceholderStyle::Question => self.placeholder(1),
            PlaceholderStyle::Numbered => format!("{}::text", self.placeholder(1)),
        };
        format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = {} AND \
             table_name = {parameter}",
            self.schema_function
        )
    }
}
