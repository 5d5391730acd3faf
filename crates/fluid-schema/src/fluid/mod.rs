//! Fluent builders over a [`Schema`].
//!
//! [`FluidSchema`] owns the model and hands out short-lived views:
//! [`FluidTable`] for one table, [`FluidColumn`] for a column whose type is
//! being chosen and [`FluidColumnOptions`] for a typed column. Views hold ids
//! into the model, never copies of it.

mod column;
mod options;
mod table;

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

pub use column::FluidColumn;
pub use options::FluidColumnOptions;
pub use table::FluidTable;

use crate::error::{FluidError, Result, SchemaError, SchemaResult};
use crate::naming::{DefaultNamingStrategy, NamingStrategy};
use crate::schema::{
    ColumnId, ColumnShape, ColumnType, ForeignKeyAction, ForeignKeyDefinition, Schema, TableId,
};

/// Fluent facade over a [`Schema`].
///
/// Asking twice for the same table or column returns a view over the same
/// model object; existing tables and columns are wrapped, never recreated.
///
/// # Example
///
/// ```
/// use fluid_schema::FluidSchema;
///
/// let mut fluid = FluidSchema::default();
/// fluid.table("roles")?.id()?;
/// fluid
///     .table("users")?
///     .id()?
///     .column("email")?
///     .string(Some(255), false)
///     .unique()
///     .then()
///     .timestamps()?;
/// fluid.junction_table("users", "roles")?;
///
/// let schema = fluid.into_schema();
/// let junction = schema.table("users_roles")?;
/// assert_eq!(junction.columns().len(), 2);
/// assert_eq!(junction.primary_key_columns(), ["user_id", "role_id"]);
/// # Ok::<(), fluid_schema::FluidError>(())
/// ```
pub struct FluidSchema {
    schema: Schema,
    naming: Box<dyn NamingStrategy>,
    tables: HashMap<String, TableId>,
    columns: HashMap<TableId, HashMap<String, ColumnId>>,
}

impl fmt::Debug for FluidSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluidSchema")
            .field("schema", &self.schema)
            .field("naming", &self.naming)
            .finish_non_exhaustive()
    }
}

impl Default for FluidSchema {
    fn default() -> Self {
        Self::new(Schema::new())
    }
}

impl FluidSchema {
    /// Wraps `schema` with the default naming strategy (no quoting).
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self::with_naming_strategy(schema, DefaultNamingStrategy::new())
    }

    /// Wraps `schema` with a custom naming strategy.
    #[must_use]
    pub fn with_naming_strategy(schema: Schema, naming: impl NamingStrategy + 'static) -> Self {
        Self {
            schema,
            naming: Box::new(naming),
            tables: HashMap::new(),
            columns: HashMap::new(),
        }
    }

    /// Returns the underlying model.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the underlying model for direct edits, e.g. composite foreign keys.
    pub fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }

    /// Consumes the builder and returns the model.
    #[must_use]
    pub fn into_schema(self) -> Schema {
        self.schema
    }

    /// Returns the naming strategy.
    #[must_use]
    pub fn naming_strategy(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }

    /// Returns the table named `name`, creating it if needed.
    pub fn table(&mut self, name: &str) -> Result<FluidTable<'_>> {
        let quoted = self.quote(name);
        let id = self.resolve_table(&quoted)?;
        Ok(FluidTable::new(self, id))
    }

    /// Creates the many-to-many table joining `table1` and `table2`.
    ///
    /// The table gets one referencing column per side, named by the naming
    /// strategy, and a composite primary key over both. Both tables must
    /// already have a single-column primary key. A table joined to itself
    /// would need the same column twice and is rejected before anything is
    /// created.
    pub fn junction_table(&mut self, table1: &str, table2: &str) -> Result<&mut Self> {
        self.referenced_primary_key(&self.quote(table1))?;
        self.referenced_primary_key(&self.quote(table2))?;

        let name = self.naming.junction_table_name(table1, table2);
        let column1 = self.naming.foreign_key_column_name(table1);
        let column2 = self.naming.foreign_key_column_name(table2);
        if self.quote(&column1) == self.quote(&column2) {
            return Err(SchemaError::ColumnAlreadyExists {
                table: self.quote(&name),
                column: self.quote(&column2),
            }
            .into());
        }
        debug!(table = %name, left = %table1, right = %table2, "Creating junction table");

        self.table(&name)?
            .column(&column1)?
            .references(table1)?
            .then()
            .column(&column2)?
            .references(table2)?
            .then()
            .primary_key(&[column1.as_str(), column2.as_str()])?;

        Ok(self)
    }

    fn quote(&self, identifier: &str) -> String {
        self.naming.quote_identifier(identifier)
    }

    fn resolve_table(&mut self, quoted: &str) -> SchemaResult<TableId> {
        if let Some(&id) = self.tables.get(quoted) {
            if self.schema.table_at(id).is_some_and(|t| t.name() == quoted) {
                trace!(table = %quoted, "Reusing table");
                return Ok(id);
            }
            // The model was edited through `schema_mut`.
            trace!(table = %quoted, "Evicting stale table");
            self.tables.remove(quoted);
            self.columns.remove(&id);
        }

        let id = match self.schema.table_id(quoted) {
            Some(id) => id,
            None => self.schema.create_table(quoted)?,
        };
        self.tables.insert(quoted.to_string(), id);
        Ok(id)
    }

    fn resolve_column(&mut self, table: TableId, quoted: &str) -> SchemaResult<ColumnId> {
        let cache = self.columns.entry(table).or_default();
        let model = &mut self.schema[table];
        if let Some(&id) = cache.get(quoted) {
            if model.column_at(id).is_some_and(|c| c.name() == quoted) {
                trace!(table = %model.name(), column = %quoted, "Reusing column");
                return Ok(id);
            }
            trace!(table = %model.name(), column = %quoted, "Evicting stale column");
            cache.remove(quoted);
        }

        let id = match model.column_id(quoted) {
            Some(id) => id,
            None => model.add_column(quoted, ColumnType::String)?,
        };
        cache.insert(quoted.to_string(), id);
        Ok(id)
    }

    /// Returns the single primary key column of an already quoted table
    /// name, with the attributes a referencing column must copy.
    fn referenced_primary_key(&self, quoted_table: &str) -> Result<(String, ColumnShape)> {
        let table = self.schema.table(quoted_table)?;
        match table.primary_key_columns() {
            [column] => Ok((column.clone(), table.column(column)?.shape())),
            columns => Err(FluidError::MultiColumnPrimaryKey {
                table: quoted_table.to_string(),
                columns: columns.to_vec(),
            }),
        }
    }

    /// Points `column` at the primary key of `quoted_target`.
    ///
    /// The column takes the referenced column's shape; if the foreign key
    /// cannot be registered the previous shape is put back.
    fn link(
        &mut self,
        table: TableId,
        column: ColumnId,
        quoted_target: &str,
        constraint: Option<String>,
        on_update: ForeignKeyAction,
        on_delete: ForeignKeyAction,
    ) -> Result<()> {
        let (target_column, shape) = self.referenced_primary_key(quoted_target)?;

        let model = &mut self.schema[table];
        let previous = model[column].shape();
        model[column].set_shape(&shape);

        let mut definition = ForeignKeyDefinition::new(
            vec![model[column].name().to_string()],
            quoted_target,
            vec![target_column],
        )
        .on_update(on_update)
        .on_delete(on_delete);
        if let Some(name) = constraint {
            definition = definition.name(name);
        }

        let added = model.add_foreign_key(definition).map(|fk| fk.name.clone());
        match added {
            Ok(name) => {
                debug!(
                    table = %model.name(),
                    column = %model[column].name(),
                    references = %quoted_target,
                    constraint = %name,
                    "Linked column"
                );
                Ok(())
            }
            Err(err) => {
                model[column].set_shape(&previous);
                Err(err.into())
            }
        }
    }
}
