//! SQL Server dialect.

use super::Dialect;

/// Microsoft SQL Server, bracket-quoted identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn identifier_quote(&self) -> char {
        '['
    }

    fn identifier_quote_end(&self) -> char {
        ']'
    }
}
