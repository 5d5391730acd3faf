//! Modifiers for a typed column.

use super::{FluidColumn, FluidSchema, FluidTable};
use crate::error::Result;
use crate::schema::{Column, ColumnId, DefaultValue, PrimaryKeyName, Table, TableId};

/// View over a column once its type is set.
///
/// Modifiers return the view again so they chain; [`then`](Self::then) goes
/// back to the table and [`column`](Self::column) moves on to a sibling.
#[derive(Debug)]
pub struct FluidColumnOptions<'a> {
    schema: &'a mut FluidSchema,
    table: TableId,
    id: ColumnId,
}

impl<'a> FluidColumnOptions<'a> {
    pub(super) fn new(schema: &'a mut FluidSchema, table: TableId, id: ColumnId) -> Self {
        Self { schema, table, id }
    }

    /// Returns the identity of the column inside its table.
    #[must_use]
    pub fn handle(&self) -> ColumnId {
        self.id
    }

    /// Returns the model column.
    #[must_use]
    pub fn model(&self) -> &Column {
        &self.schema.schema[self.table][self.id]
    }

    fn model_mut(&mut self) -> &mut Column {
        &mut self.schema.schema[self.table][self.id]
    }

    fn table_mut(&mut self) -> &mut Table {
        &mut self.schema.schema[self.table]
    }

    /// Marks the column as NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.model_mut().not_null = true;
        self
    }

    /// Allows NULL in the column.
    pub fn nullable(mut self) -> Self {
        self.model_mut().not_null = false;
        self
    }

    /// Tags the column with the `unique` custom option.
    ///
    /// This does not add a unique index; use [`FluidTable::unique`] for that.
    pub fn unique(mut self) -> Self {
        self.model_mut().set_custom_option("unique", true);
        self
    }

    /// Adds a single-column index with a generated name.
    pub fn index(mut self) -> Result<Self> {
        let column = self.model().name().to_string();
        self.table_mut().add_index(vec![column], None)?;
        Ok(self)
    }

    /// Adds a single-column index named `name`.
    pub fn index_named(mut self, name: &str) -> Result<Self> {
        let column = self.model().name().to_string();
        let name = self.schema.quote(name);
        self.table_mut().add_index(vec![column], Some(name))?;
        Ok(self)
    }

    /// Attaches a comment to the column.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.model_mut().comment = Some(comment.into());
        self
    }

    /// Marks the column as auto-incrementing.
    pub fn auto_increment(mut self) -> Self {
        self.model_mut().autoincrement = true;
        self
    }

    /// Makes this column alone the table's primary key.
    pub fn primary_key(mut self) -> Result<Self> {
        let column = self.model().name().to_string();
        self.table_mut()
            .set_primary_key(vec![column], PrimaryKeyName::Unnamed)?;
        Ok(self)
    }

    /// Makes this column alone the table's primary key, named `name`.
    pub fn primary_key_named(mut self, name: &str) -> Result<Self> {
        let column = self.model().name().to_string();
        let name = self.schema.quote(name);
        self.table_mut()
            .set_primary_key(vec![column], PrimaryKeyName::Explicit(name))?;
        Ok(self)
    }

    /// Sets the default value.
    pub fn default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.model_mut().default = Some(value.into());
        self
    }

    /// Returns to the owning table.
    pub fn then(self) -> FluidTable<'a> {
        FluidTable::new(self.schema, self.table)
    }

    /// Moves on to another column of the same table.
    pub fn column(self, name: &str) -> Result<FluidColumn<'a>> {
        let quoted = self.schema.quote(name);
        let column = self.schema.resolve_column(self.table, &quoted)?;
        Ok(FluidColumn::new(self.schema, self.table, column))
    }
}
