//! Column type selection and relationships.

use super::{FluidColumnOptions, FluidSchema};
use crate::error::Result;
use crate::schema::{Column, ColumnId, ColumnType, ForeignKeyAction, TableId};

/// View over a column whose type is being chosen.
///
/// Every type setter consumes the view and returns the
/// [`FluidColumnOptions`] for the same column.
#[derive(Debug)]
pub struct FluidColumn<'a> {
    schema: &'a mut FluidSchema,
    table: TableId,
    id: ColumnId,
}

impl<'a> FluidColumn<'a> {
    pub(super) fn new(schema: &'a mut FluidSchema, table: TableId, id: ColumnId) -> Self {
        Self { schema, table, id }
    }

    /// Returns the identity of the column inside its table.
    #[must_use]
    pub fn handle(&self) -> ColumnId {
        self.id
    }

    /// Returns the identity of the owning table.
    #[must_use]
    pub fn table_handle(&self) -> TableId {
        self.table
    }

    /// Returns the column name as stored in the model (quoted).
    #[must_use]
    pub fn name(&self) -> &str {
        self.model().name()
    }

    /// Returns the model column.
    #[must_use]
    pub fn model(&self) -> &Column {
        &self.schema.schema[self.table][self.id]
    }

    fn model_mut(&mut self) -> &mut Column {
        &mut self.schema.schema[self.table][self.id]
    }

    fn into_options(self) -> FluidColumnOptions<'a> {
        FluidColumnOptions::new(self.schema, self.table, self.id)
    }

    fn typed(mut self, column_type: ColumnType) -> FluidColumnOptions<'a> {
        self.model_mut().column_type = column_type;
        self.into_options()
    }

    /// Signed 32-bit integer.
    pub fn integer(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Integer)
    }

    /// Signed 16-bit integer.
    pub fn small_int(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::SmallInt)
    }

    /// Signed 64-bit integer.
    pub fn big_int(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::BigInt)
    }

    /// Exact numeric with `precision` total digits, `scale` of them decimals.
    pub fn decimal(mut self, precision: u32, scale: u32) -> FluidColumnOptions<'a> {
        let column = self.model_mut();
        column.column_type = ColumnType::Decimal;
        column.precision = Some(precision);
        column.scale = scale;
        self.into_options()
    }

    /// Approximate numeric with `precision` digits, `scale` of them decimals.
    pub fn float(mut self, precision: u32, scale: u32) -> FluidColumnOptions<'a> {
        let column = self.model_mut();
        column.column_type = ColumnType::Float;
        column.precision = Some(precision);
        column.scale = scale;
        self.into_options()
    }

    /// Character string, optionally bounded and fixed-width.
    pub fn string(mut self, length: Option<u32>, fixed: bool) -> FluidColumnOptions<'a> {
        let column = self.model_mut();
        column.column_type = ColumnType::String;
        column.length = length;
        column.fixed = fixed;
        self.into_options()
    }

    /// Unbounded character data.
    pub fn text(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Text)
    }

    /// Globally unique identifier.
    pub fn guid(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Guid)
    }

    /// Binary string, optionally bounded and fixed-width.
    pub fn binary(mut self, length: Option<u32>, fixed: bool) -> FluidColumnOptions<'a> {
        let column = self.model_mut();
        column.column_type = ColumnType::Binary;
        column.length = length;
        column.fixed = fixed;
        self.into_options()
    }

    /// Unbounded binary data.
    pub fn blob(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Blob)
    }

    /// True/false flag.
    pub fn boolean(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Boolean)
    }

    /// Calendar date.
    pub fn date(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Date)
    }

    /// Calendar date, mapped to an immutable value.
    pub fn date_immutable(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::DateImmutable)
    }

    /// Date and time without zone.
    pub fn datetime(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::DateTime)
    }

    /// Date and time without zone, mapped to an immutable value.
    pub fn datetime_immutable(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::DateTimeImmutable)
    }

    /// Date and time with zone.
    pub fn datetime_tz(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::DateTimeTz)
    }

    /// Date and time with zone, mapped to an immutable value.
    pub fn datetime_tz_immutable(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::DateTimeTzImmutable)
    }

    /// Time of day.
    pub fn time(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Time)
    }

    /// Time of day, mapped to an immutable value.
    pub fn time_immutable(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::TimeImmutable)
    }

    /// Duration.
    pub fn date_interval(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::DateInterval)
    }

    /// Serialized array.
    pub fn array(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Array)
    }

    /// Comma-separated list of scalars.
    pub fn simple_array(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::SimpleArray)
    }

    /// JSON document.
    pub fn json(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Json)
    }

    /// Same as [`json`](Self::json).
    #[deprecated(note = "use `json` instead")]
    pub fn json_array(self) -> FluidColumnOptions<'a> {
        self.json()
    }

    /// Serialized object.
    pub fn object(self) -> FluidColumnOptions<'a> {
        self.typed(ColumnType::Object)
    }

    /// Points this column at the primary key of `table`.
    ///
    /// The column copies the referenced column's type, length, fixed flag,
    /// scale, precision and signedness, and a foreign key with `RESTRICT`
    /// actions and a generated name is added to the owning table.
    ///
    /// # Errors
    ///
    /// Fails if `table` does not exist or if its primary key is not exactly
    /// one column. The column is left untouched in both cases.
    pub fn references(self, table: &str) -> Result<FluidColumnOptions<'a>> {
        self.references_full(
            table,
            None,
            ForeignKeyAction::Restrict,
            ForeignKeyAction::Restrict,
        )
    }

    /// Like [`references`](Self::references) with an explicit constraint name.
    pub fn references_named(self, table: &str, constraint: &str) -> Result<FluidColumnOptions<'a>> {
        self.references_full(
            table,
            Some(constraint),
            ForeignKeyAction::Restrict,
            ForeignKeyAction::Restrict,
        )
    }

    /// Like [`references`](Self::references) with every option spelled out.
    pub fn references_full(
        self,
        table: &str,
        constraint: Option<&str>,
        on_update: ForeignKeyAction,
        on_delete: ForeignKeyAction,
    ) -> Result<FluidColumnOptions<'a>> {
        let quoted_table = self.schema.quote(table);
        let constraint = constraint.map(|name| self.schema.quote(name));
        self.schema
            .link(self.table, self.id, &quoted_table, constraint, on_update, on_delete)?;
        Ok(self.into_options())
    }
}
