//! Identifier quoting per database engine.
//!
//! A [`Dialect`] only knows how a target engine delimits identifiers. The
//! naming strategy uses it to quote every table, column and index name
//! before it reaches the schema model.

mod generic;
mod mysql;
mod sqlserver;

use std::fmt;

pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use sqlserver::SqlServerDialect;

/// Trait for engine-specific identifier quoting.
pub trait Dialect: fmt::Debug {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the opening identifier quote (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the closing identifier quote. Same as the opening one unless
    /// the engine uses brackets.
    fn identifier_quote_end(&self) -> char {
        self.identifier_quote()
    }

    /// Quotes one identifier part, doubling any closing quote inside it.
    fn quote_single_identifier(&self, part: &str) -> String {
        let end = self.identifier_quote_end();
        let mut quoted = String::with_capacity(part.len() + 2);
        quoted.push(self.identifier_quote());
        for c in part.chars() {
            if c == end {
                quoted.push(end);
            }
            quoted.push(c);
        }
        quoted.push(end);
        quoted
    }

    /// Quotes a possibly qualified identifier (`schema.table`) part by part.
    fn quote_identifier(&self, name: &str) -> String {
        name.split('.')
            .map(|part| self.quote_single_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }
}
