//! Naming conventions for derived tables and columns.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::dialect::Dialect;
use crate::inflector::Inflector;

static WORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_ ]+").expect("Invalid word separator regex"));

/// Derives junction-table and foreign-key column names, and quotes
/// identifiers for the target engine.
pub trait NamingStrategy: fmt::Debug {
    /// Name of the table joining `table1` and `table2`.
    fn junction_table_name(&self, table1: &str, table2: &str) -> String;

    /// Name of a column referencing `target_table`.
    fn foreign_key_column_name(&self, target_table: &str) -> String;

    /// Quotes an identifier. The default leaves it untouched.
    fn quote_identifier(&self, identifier: &str) -> String {
        identifier.to_string()
    }
}

/// `users` + `roles` gives `users_roles`; `users` gives `user_id`.
///
/// Quoting is disabled unless a [`Dialect`] is installed with
/// [`DefaultNamingStrategy::with_dialect`].
#[derive(Debug, Default)]
pub struct DefaultNamingStrategy {
    inflector: Inflector,
    dialect: Option<Box<dyn Dialect>>,
}

impl DefaultNamingStrategy {
    /// Creates the strategy with English rules and no quoting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Quotes identifiers the way `dialect` does.
    #[must_use]
    pub fn with_dialect(mut self, dialect: impl Dialect + 'static) -> Self {
        self.dialect = Some(Box::new(dialect));
        self
    }

    /// Replaces the singularization rules.
    #[must_use]
    pub fn with_inflector(mut self, inflector: Inflector) -> Self {
        self.inflector = inflector;
        self
    }

    /// Returns the singularization rules.
    #[must_use]
    pub fn inflector(&self) -> &Inflector {
        &self.inflector
    }

    /// Returns the quoting dialect, if any.
    #[must_use]
    pub fn dialect(&self) -> Option<&dyn Dialect> {
        self.dialect.as_deref()
    }

    fn singularize(&self, name: &str) -> String {
        WORD_SEPARATOR
            .split(name)
            .map(|word| self.inflector.singularize(word))
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl NamingStrategy for DefaultNamingStrategy {
    fn junction_table_name(&self, table1: &str, table2: &str) -> String {
        format!("{table1}_{table2}")
    }

    fn foreign_key_column_name(&self, target_table: &str) -> String {
        format!("{}_id", self.singularize(target_table))
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        match &self.dialect {
            Some(dialect) => dialect.quote_identifier(identifier),
            None => identifier.to_string(),
        }
    }
}
