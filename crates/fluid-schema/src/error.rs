//! Error types for the schema model and the fluent builders.

/// Errors raised by the in-memory schema model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A table was looked up but does not exist.
    #[error("Table '{0}' does not exist")]
    UnknownTable(String),

    /// A table with this name is already registered.
    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),

    /// A column was looked up but does not exist.
    #[error("Column '{column}' does not exist in table '{table}'")]
    UnknownColumn {
        /// Table that was searched.
        table: String,
        /// Missing column.
        column: String,
    },

    /// A column with this name is already registered on the table.
    #[error("Column '{column}' already exists in table '{table}'")]
    ColumnAlreadyExists {
        /// Owning table.
        table: String,
        /// Duplicated column.
        column: String,
    },

    /// An index with this name is already registered on the table.
    #[error("Index '{index}' already exists on table '{table}'")]
    IndexAlreadyExists {
        /// Owning table.
        table: String,
        /// Duplicated index name.
        index: String,
    },

    /// An index or key was declared without any column.
    #[error("Index on table '{0}' must cover at least one column")]
    EmptyIndex(String),

    /// The table already has a primary key.
    #[error("Table '{0}' already has a primary key")]
    PrimaryKeyAlreadyExists(String),

    /// A foreign key with this name is already registered on the table.
    #[error("Foreign key '{name}' already exists on table '{table}'")]
    ForeignKeyAlreadyExists {
        /// Owning table.
        table: String,
        /// Duplicated constraint name.
        name: String,
    },

    /// A foreign key was looked up but does not exist.
    #[error("Foreign key '{name}' does not exist on table '{table}'")]
    UnknownForeignKey {
        /// Table that was searched.
        table: String,
        /// Missing constraint name.
        name: String,
    },

    /// The identifier cannot be used as a table, column or index name.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Errors raised by the fluent builders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FluidError {
    /// Error reported by the schema model, passed through unchanged.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The referenced table's primary key is not a single column.
    ///
    /// Relationships on composite keys have to be declared on the
    /// [`Schema`](crate::schema::Schema) directly.
    #[error(
        "Cannot reference table '{table}': its primary key must span exactly one column, found [{}]",
        .columns.join(", ")
    )]
    MultiColumnPrimaryKey {
        /// Referenced table.
        table: String,
        /// Its primary key columns.
        columns: Vec<String>,
    },
}

impl FluidError {
    /// Returns true if the error reports a missing table.
    #[must_use]
    pub fn is_unknown_table(&self) -> bool {
        matches!(self, Self::Schema(SchemaError::UnknownTable(_)))
    }
}

/// Result type for model operations.
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, FluidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_errors_pass_through() {
        let err: FluidError = SchemaError::UnknownTable("countries".into()).into();
        assert_eq!(err.to_string(), "Table 'countries' does not exist");
        assert!(err.is_unknown_table());
    }

    #[test]
    fn test_multi_column_message() {
        let err = FluidError::MultiColumnPrimaryKey {
            table: "countries".into(),
            columns: vec!["id1".into(), "id2".into()],
        };
        assert_eq!(
            err.to_string(),
            "Cannot reference table 'countries': its primary key must span exactly one column, found [id1, id2]"
        );
        assert!(!err.is_unknown_table());
    }
}
