//! Table-level fluent builder.

use tracing::debug;

use super::{FluidColumn, FluidSchema};
use crate::error::{Result, SchemaError};
use crate::schema::{ForeignKeyAction, PrimaryKeyName, Table, TableId};

/// View over one table of a [`FluidSchema`].
#[derive(Debug)]
pub struct FluidTable<'a> {
    schema: &'a mut FluidSchema,
    id: TableId,
}

impl<'a> FluidTable<'a> {
    pub(super) fn new(schema: &'a mut FluidSchema, id: TableId) -> Self {
        Self { schema, id }
    }

    /// Returns the identity of the table; stable for the schema's lifetime.
    #[must_use]
    pub fn handle(&self) -> TableId {
        self.id
    }

    /// Returns the table name as stored in the model (quoted).
    #[must_use]
    pub fn name(&self) -> &str {
        self.model().name()
    }

    /// Returns the model table.
    #[must_use]
    pub fn model(&self) -> &Table {
        &self.schema.schema[self.id]
    }

    fn model_mut(&mut self) -> &mut Table {
        &mut self.schema.schema[self.id]
    }

    /// Returns the column named `name`, creating it as a string column if
    /// the table does not have it yet.
    pub fn column(&mut self, name: &str) -> Result<FluidColumn<'_>> {
        let quoted = self.schema.quote(name);
        let column = self.schema.resolve_column(self.id, &quoted)?;
        Ok(FluidColumn::new(self.schema, self.id, column))
    }

    /// Adds an index over `columns`, in order, with a generated name.
    pub fn index(&mut self, columns: &[&str]) -> Result<&mut Self> {
        let columns = self.quote_all(columns);
        self.model_mut().add_index(columns, None)?;
        Ok(self)
    }

    /// Adds an index over `columns` named `name`.
    pub fn index_named(&mut self, columns: &[&str], name: &str) -> Result<&mut Self> {
        let columns = self.quote_all(columns);
        let name = self.schema.quote(name);
        self.model_mut().add_index(columns, Some(name))?;
        Ok(self)
    }

    /// Adds a unique index over `columns` with a generated name.
    pub fn unique(&mut self, columns: &[&str]) -> Result<&mut Self> {
        let columns = self.quote_all(columns);
        self.model_mut().add_unique_index(columns, None)?;
        Ok(self)
    }

    /// Adds a unique index over `columns` named `name`.
    pub fn unique_named(&mut self, columns: &[&str], name: &str) -> Result<&mut Self> {
        let columns = self.quote_all(columns);
        let name = self.schema.quote(name);
        self.model_mut().add_unique_index(columns, Some(name))?;
        Ok(self)
    }

    /// Declares the primary key over `columns`, in order.
    ///
    /// No name is generated: the key gets the engine's fixed primary key name.
    pub fn primary_key(&mut self, columns: &[&str]) -> Result<&mut Self> {
        let columns = self.quote_all(columns);
        self.model_mut()
            .set_primary_key(columns, PrimaryKeyName::Unnamed)?;
        Ok(self)
    }

    /// Declares the primary key over `columns` with an explicit index name.
    pub fn primary_key_named(&mut self, columns: &[&str], name: &str) -> Result<&mut Self> {
        let columns = self.quote_all(columns);
        let name = self.schema.quote(name);
        self.model_mut()
            .set_primary_key(columns, PrimaryKeyName::Explicit(name))?;
        Ok(self)
    }

    /// Adds an auto-incremented integer primary key named `id`.
    pub fn id(&mut self) -> Result<&mut Self> {
        self.column("id")?.integer().primary_key()?.auto_increment();
        Ok(self)
    }

    /// Adds a GUID primary key named `uuid`.
    pub fn uuid(&mut self) -> Result<&mut Self> {
        self.column("uuid")?.guid().primary_key()?;
        Ok(self)
    }

    /// Adds `created_at` and `updated_at` immutable datetime columns.
    pub fn timestamps(&mut self) -> Result<&mut Self> {
        self.column("created_at")?.datetime_immutable();
        self.column("updated_at")?.datetime_immutable();
        Ok(self)
    }

    /// Makes this table inherit its identity from `parent`.
    ///
    /// Creates a column named after the parent's primary key column, points it
    /// at the parent and makes it this table's primary key. The parent must
    /// have a single-column primary key; nothing is created otherwise.
    pub fn extends(&mut self, parent: &str) -> Result<&mut Self> {
        let quoted_parent = self.schema.quote(parent);
        let (parent_column, _) = self.schema.referenced_primary_key(&quoted_parent)?;
        if self.model().has_primary_key() {
            return Err(SchemaError::PrimaryKeyAlreadyExists(self.name().to_string()).into());
        }

        let column = self.schema.resolve_column(self.id, &parent_column)?;
        self.schema.link(
            self.id,
            column,
            &quoted_parent,
            None,
            ForeignKeyAction::Restrict,
            ForeignKeyAction::Restrict,
        )?;
        self.model_mut()
            .set_primary_key(vec![parent_column.clone()], PrimaryKeyName::Unnamed)?;

        debug!(table = %self.name(), parent = %quoted_parent, column = %parent_column, "Table extends parent");
        Ok(self)
    }

    fn quote_all(&self, columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| self.schema.quote(c)).collect()
    }
}
