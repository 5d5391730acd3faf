//! Generic SQL dialect.
//!
//! Installed with `DefaultNamingStrategy::with_dialect`, it makes every
//! table, column and constraint name the builders register double-quoted.

use super::Dialect;

/// ANSI quoting: `users` becomes `"users"`, `app.users` becomes
/// `"app"."users"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}
