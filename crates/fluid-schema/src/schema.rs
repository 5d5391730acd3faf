//! In-memory relational schema model.
//!
//! These types hold the tables, columns, indexes and foreign keys that the
//! fluent builders mutate. The model is the system of record: builders only
//! keep ids into it. Tables and columns are stored in insertion order and are
//! never removed, so a [`TableId`] or [`ColumnId`] stays valid for the
//! lifetime of the [`Schema`] that issued it.

use std::collections::BTreeMap;
use std::fmt;
use std::ops;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};

/// Column types known to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// 32-bit integer.
    Integer,
    /// 16-bit integer.
    #[serde(rename = "smallint")]
    SmallInt,
    /// 64-bit integer.
    #[serde(rename = "bigint")]
    BigInt,
    /// Exact numeric with precision and scale.
    Decimal,
    /// Floating point.
    Float,
    /// Variable or fixed length character string.
    String,
    /// Unbounded text.
    Text,
    /// UUID / GUID.
    Guid,
    /// Variable or fixed length binary string.
    Binary,
    /// Binary large object.
    Blob,
    /// Boolean.
    Boolean,
    /// Date, mutable value object.
    Date,
    /// Date, immutable value object.
    DateImmutable,
    /// Date and time, mutable value object.
    #[serde(rename = "datetime")]
    DateTime,
    /// Date and time, immutable value object.
    #[serde(rename = "datetime_immutable")]
    DateTimeImmutable,
    /// Date and time with time zone, mutable value object.
    #[serde(rename = "datetimetz")]
    DateTimeTz,
    /// Date and time with time zone, immutable value object.
    #[serde(rename = "datetimetz_immutable")]
    DateTimeTzImmutable,
    /// Time of day, mutable value object.
    Time,
    /// Time of day, immutable value object.
    TimeImmutable,
    /// Date interval.
    #[serde(rename = "dateinterval")]
    DateInterval,
    /// Serialized array.
    Array,
    /// Comma separated list.
    SimpleArray,
    /// JSON document.
    Json,
    /// Serialized object.
    Object,
}

impl ColumnType {
    /// Returns the canonical type name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::SmallInt => "smallint",
            Self::BigInt => "bigint",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::String => "string",
            Self::Text => "text",
            Self::Guid => "guid",
            Self::Binary => "binary",
            Self::Blob => "blob",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateImmutable => "date_immutable",
            Self::DateTime => "datetime",
            Self::DateTimeImmutable => "datetime_immutable",
            Self::DateTimeTz => "datetimetz",
            Self::DateTimeTzImmutable => "datetimetz_immutable",
            Self::Time => "time",
            Self::TimeImmutable => "time_immutable",
            Self::DateInterval => "dateinterval",
            Self::Array => "array",
            Self::SimpleArray => "simple_array",
            Self::Json => "json",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// Raw SQL expression (e.g., `CURRENT_TIMESTAMP`).
    Expression(String),
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Foreign key referential action (ON DELETE, ON UPDATE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Reject the change while referencing rows exist.
    #[default]
    Restrict,
    /// Cascade the delete/update to referencing rows.
    Cascade,
    /// Set the referencing columns to NULL.
    SetNull,
    /// Set the referencing columns to their default value.
    SetDefault,
}

/// Position of a table inside a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(usize);

/// Position of a column inside its [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(usize);

/// The storage attributes of a column that decide join compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnShape {
    /// Declared type.
    pub column_type: ColumnType,
    /// Length for string and binary types.
    pub length: Option<u32>,
    /// Whether the length is fixed.
    pub fixed: bool,
    /// Number of digits after the decimal point.
    pub scale: u32,
    /// Total number of digits.
    pub precision: Option<u32>,
    /// Whether numeric values are unsigned.
    pub unsigned: bool,
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    /// Declared type.
    pub column_type: ColumnType,
    /// Length for string and binary types.
    pub length: Option<u32>,
    /// Whether the length is fixed.
    pub fixed: bool,
    /// Total number of digits.
    pub precision: Option<u32>,
    /// Number of digits after the decimal point.
    pub scale: u32,
    /// Whether numeric values are unsigned.
    pub unsigned: bool,
    /// Whether NULL is rejected.
    pub not_null: bool,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Whether the column auto-increments.
    pub autoincrement: bool,
    /// Free-form comment.
    pub comment: Option<String>,
    /// Engine-specific options, e.g. the `unique` marker.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_options: BTreeMap<String, serde_json::Value>,
}

impl Column {
    fn new(name: String, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            length: None,
            fixed: false,
            precision: None,
            scale: 0,
            unsigned: false,
            not_null: true,
            default: None,
            autoincrement: false,
            comment: None,
            custom_options: BTreeMap::new(),
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attributes copied when another column references this one.
    #[must_use]
    pub fn shape(&self) -> ColumnShape {
        ColumnShape {
            column_type: self.column_type,
            length: self.length,
            fixed: self.fixed,
            scale: self.scale,
            precision: self.precision,
            unsigned: self.unsigned,
        }
    }

    /// Overwrites the shape attributes, leaving everything else untouched.
    pub fn set_shape(&mut self, shape: &ColumnShape) {
        self.column_type = shape.column_type;
        self.length = shape.length;
        self.fixed = shape.fixed;
        self.scale = shape.scale;
        self.precision = shape.precision;
        self.unsigned = shape.unsigned;
    }

    /// Returns an engine-specific option.
    #[must_use]
    pub fn custom_option(&self, key: &str) -> Option<&serde_json::Value> {
        self.custom_options.get(key)
    }

    /// Sets an engine-specific option.
    pub fn set_custom_option(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.custom_options.insert(key.into(), value.into());
    }
}

/// An index, unique index or primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed columns, in key order.
    pub columns: Vec<String>,
    /// Whether values must be unique.
    pub unique: bool,
    /// Whether this is the primary key.
    pub primary: bool,
}

/// How [`Table::set_primary_key`] names the primary key index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKeyName {
    /// Derive a name from the table name (`pk_<table>`).
    Generated,
    /// Use the engine's fixed primary key name, [`PRIMARY_KEY_INDEX`].
    Unnamed,
    /// Use this exact name.
    Explicit(String),
}

/// Name given to a primary key declared with [`PrimaryKeyName::Unnamed`].
pub const PRIMARY_KEY_INDEX: &str = "primary";

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name.
    pub name: String,
    /// Table owning the constraint.
    pub local_table: String,
    /// Referencing columns.
    pub local_columns: Vec<String>,
    /// Referenced table.
    pub foreign_table: String,
    /// Referenced columns.
    pub foreign_columns: Vec<String>,
    /// Action on update.
    pub on_update: ForeignKeyAction,
    /// Action on delete.
    pub on_delete: ForeignKeyAction,
}

/// Description of a foreign key to add with [`Table::add_foreign_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyDefinition {
    /// Constraint name; generated when `None`.
    pub name: Option<String>,
    /// Referencing columns.
    pub local_columns: Vec<String>,
    /// Referenced table.
    pub foreign_table: String,
    /// Referenced columns.
    pub foreign_columns: Vec<String>,
    /// Action on update.
    pub on_update: ForeignKeyAction,
    /// Action on delete.
    pub on_delete: ForeignKeyAction,
}

impl ForeignKeyDefinition {
    /// Creates a definition with `RESTRICT` actions and a generated name.
    #[must_use]
    pub fn new(
        local_columns: Vec<String>,
        foreign_table: impl Into<String>,
        foreign_columns: Vec<String>,
    ) -> Self {
        Self {
            name: None,
            local_columns,
            foreign_table: foreign_table.into(),
            foreign_columns,
            on_update: ForeignKeyAction::Restrict,
            on_delete: ForeignKeyAction::Restrict,
        }
    }

    /// Sets the constraint name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = action;
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = action;
        self
    }
}

/// A table: columns, indexes and foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    indexes: Vec<Index>,
    foreign_keys: Vec<ForeignKey>,
}

impl Table {
    fn new(name: String) -> Self {
        Self {
            name,
            columns: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column at `id`, if the table still has one there.
    #[must_use]
    pub fn column_at(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(id.0)
    }

    /// Returns true if the table has a column with this name.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_id(name).is_some()
    }

    /// Returns the id of the named column.
    #[must_use]
    pub fn column_id(&self, name: &str) -> Option<ColumnId> {
        self.columns.iter().position(|c| c.name == name).map(ColumnId)
    }

    /// Gets a column by name.
    pub fn column(&self, name: &str) -> SchemaResult<&Column> {
        self.column_id(name)
            .map(|id| &self[id])
            .ok_or_else(|| self.unknown_column(name))
    }

    /// Gets a mutable column by name.
    pub fn column_mut(&mut self, name: &str) -> SchemaResult<&mut Column> {
        match self.column_id(name) {
            Some(id) => Ok(&mut self[id]),
            None => Err(self.unknown_column(name)),
        }
    }

    /// Adds a column with default attributes.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        column_type: ColumnType,
    ) -> SchemaResult<ColumnId> {
        let name = name.into();
        validate_identifier(&name)?;
        if self.has_column(&name) {
            return Err(SchemaError::ColumnAlreadyExists {
                table: self.name.clone(),
                column: name,
            });
        }

        debug!(table = %self.name, column = %name, %column_type, "Adding column");
        self.columns.push(Column::new(name, column_type));
        Ok(ColumnId(self.columns.len() - 1))
    }

    /// Declares the primary key. Key columns become NOT NULL.
    pub fn set_primary_key(
        &mut self,
        columns: Vec<String>,
        name: PrimaryKeyName,
    ) -> SchemaResult<&Index> {
        if self.has_primary_key() {
            return Err(SchemaError::PrimaryKeyAlreadyExists(self.name.clone()));
        }
        let name = match name {
            PrimaryKeyName::Generated => format!("pk_{}", sanitize(&self.name)),
            PrimaryKeyName::Unnamed => PRIMARY_KEY_INDEX.to_string(),
            PrimaryKeyName::Explicit(name) => name,
        };
        self.check_index(&name, &columns)?;

        for column in &columns {
            self.column_mut(column)?.not_null = true;
        }

        debug!(table = %self.name, index = %name, columns = ?columns, "Setting primary key");
        self.indexes.push(Index {
            name,
            columns,
            unique: true,
            primary: true,
        });
        Ok(&self.indexes[self.indexes.len() - 1])
    }

    /// Returns the primary key index.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Index> {
        self.indexes.iter().find(|i| i.primary)
    }

    /// Returns true if a primary key is declared.
    #[must_use]
    pub fn has_primary_key(&self) -> bool {
        self.primary_key().is_some()
    }

    /// Returns the primary key columns in key order; empty when there is none.
    #[must_use]
    pub fn primary_key_columns(&self) -> &[String] {
        self.primary_key()
            .map(|pk| pk.columns.as_slice())
            .unwrap_or_default()
    }

    /// Adds a non-unique index; the name is generated when `None`.
    pub fn add_index(&mut self, columns: Vec<String>, name: Option<String>) -> SchemaResult<&Index> {
        let name = name.unwrap_or_else(|| self.generated_name("idx", &columns));
        self.push_index(name, columns, false)
    }

    /// Adds a unique index; the name is generated when `None`.
    pub fn add_unique_index(
        &mut self,
        columns: Vec<String>,
        name: Option<String>,
    ) -> SchemaResult<&Index> {
        let name = name.unwrap_or_else(|| self.generated_name("uniq", &columns));
        self.push_index(name, columns, true)
    }

    fn push_index(&mut self, name: String, columns: Vec<String>, unique: bool) -> SchemaResult<&Index> {
        self.check_index(&name, &columns)?;

        debug!(table = %self.name, index = %name, columns = ?columns, unique, "Adding index");
        self.indexes.push(Index {
            name,
            columns,
            unique,
            primary: false,
        });
        Ok(&self.indexes[self.indexes.len() - 1])
    }

    /// Returns true if an index (primary key included) has this name.
    #[must_use]
    pub fn has_index(&self, name: &str) -> bool {
        self.index(name).is_some()
    }

    /// Gets an index by name.
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Returns every index, the primary key included.
    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Adds a foreign key constraint owned by this table.
    pub fn add_foreign_key(&mut self, definition: ForeignKeyDefinition) -> SchemaResult<&ForeignKey> {
        let ForeignKeyDefinition {
            name,
            local_columns,
            foreign_table,
            foreign_columns,
            on_update,
            on_delete,
        } = definition;

        if local_columns.is_empty() {
            return Err(SchemaError::EmptyIndex(self.name.clone()));
        }
        validate_identifier(&foreign_table)?;
        for column in &local_columns {
            self.column(column)?;
        }

        let name = name.unwrap_or_else(|| self.generated_name("fk", &local_columns));
        validate_identifier(&name)?;
        if self.has_foreign_key(&name) {
            return Err(SchemaError::ForeignKeyAlreadyExists {
                table: self.name.clone(),
                name,
            });
        }

        debug!(
            table = %self.name,
            name = %name,
            columns = ?local_columns,
            references = %foreign_table,
            "Adding foreign key"
        );
        self.foreign_keys.push(ForeignKey {
            name,
            local_table: self.name.clone(),
            local_columns,
            foreign_table,
            foreign_columns,
            on_update,
            on_delete,
        });
        Ok(&self.foreign_keys[self.foreign_keys.len() - 1])
    }

    /// Returns true if a foreign key has this name.
    #[must_use]
    pub fn has_foreign_key(&self, name: &str) -> bool {
        self.foreign_keys.iter().any(|fk| fk.name == name)
    }

    /// Gets a foreign key by name.
    pub fn foreign_key(&self, name: &str) -> SchemaResult<&ForeignKey> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.name == name)
            .ok_or_else(|| SchemaError::UnknownForeignKey {
                table: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Returns every foreign key in declaration order.
    #[must_use]
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    fn check_index(&self, name: &str, columns: &[String]) -> SchemaResult<()> {
        validate_identifier(name)?;
        if columns.is_empty() {
            return Err(SchemaError::EmptyIndex(self.name.clone()));
        }
        for column in columns {
            self.column(column)?;
        }
        if self.has_index(name) {
            return Err(SchemaError::IndexAlreadyExists {
                table: self.name.clone(),
                index: name.to_string(),
            });
        }
        Ok(())
    }

    fn generated_name(&self, prefix: &str, columns: &[String]) -> String {
        let mut name = format!("{prefix}_{}", sanitize(&self.name));
        for column in columns {
            name.push('_');
            name.push_str(&sanitize(column));
        }
        name
    }

    fn unknown_column(&self, column: &str) -> SchemaError {
        SchemaError::UnknownColumn {
            table: self.name.clone(),
            column: column.to_string(),
        }
    }
}

impl ops::Index<ColumnId> for Table {
    type Output = Column;

    fn index(&self, id: ColumnId) -> &Column {
        &self.columns[id.0]
    }
}

impl ops::IndexMut<ColumnId> for Table {
    fn index_mut(&mut self, id: ColumnId) -> &mut Column {
        &mut self.columns[id.0]
    }
}

/// The complete schema: every table, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a table with this name exists.
    #[must_use]
    pub fn has_table(&self, name: &str) -> bool {
        self.table_id(name).is_some()
    }

    /// Returns the id of the named table.
    #[must_use]
    pub fn table_id(&self, name: &str) -> Option<TableId> {
        self.tables.iter().position(|t| t.name == name).map(TableId)
    }

    /// Creates an empty table.
    pub fn create_table(&mut self, name: impl Into<String>) -> SchemaResult<TableId> {
        let name = name.into();
        validate_identifier(&name)?;
        if self.has_table(&name) {
            return Err(SchemaError::TableAlreadyExists(name));
        }

        debug!(table = %name, "Creating table");
        self.tables.push(Table::new(name));
        Ok(TableId(self.tables.len() - 1))
    }

    /// Gets a table by name.
    pub fn table(&self, name: &str) -> SchemaResult<&Table> {
        self.table_id(name)
            .map(|id| &self[id])
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }

    /// Gets a mutable table by name.
    pub fn table_mut(&mut self, name: &str) -> SchemaResult<&mut Table> {
        match self.table_id(name) {
            Some(id) => Ok(&mut self[id]),
            None => Err(SchemaError::UnknownTable(name.to_string())),
        }
    }

    /// Returns the table at `id`, if the schema still has one there.
    #[must_use]
    pub fn table_at(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.0)
    }

    /// Returns every table in creation order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Returns table names.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }
}

impl ops::Index<TableId> for Schema {
    type Output = Table;

    fn index(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }
}

impl ops::IndexMut<TableId> for Schema {
    fn index_mut(&mut self, id: TableId) -> &mut Table {
        &mut self.tables[id.0]
    }
}

fn validate_identifier(name: &str) -> SchemaResult<()> {
    if name.trim().is_empty() {
        return Err(SchemaError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// Keeps the characters of an identifier that are safe in a generated name.
fn sanitize(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
