//! Fluent schema definition on top of an in-memory relational model.
//!
//! `fluid-schema` lets you describe tables, columns, indexes and foreign keys
//! with chained calls, and infers the tedious parts:
//! - A referencing column copies the type of the primary key it points at
//! - Foreign key and junction table names derive from table names
//!   (`users` gives `user_id`, `users` + `roles` gives `users_roles`)
//! - A table can inherit its identity from a parent table
//!
//! # Architecture
//!
//! - **Schema** - The model: tables, columns, indexes and foreign keys
//! - **Fluid builders** - `FluidSchema`, `FluidTable`, `FluidColumn`,
//!   `FluidColumnOptions`, thin views over the model
//! - **Naming** - Derived names and identifier quoting
//! - **Inflector** - English singularization rules
//! - **Dialect** - Engine-specific identifier quotes
//!
//! # Example
//!
//! ```rust
//! use fluid_schema::{ColumnType, FluidSchema};
//!
//! let mut fluid = FluidSchema::default();
//! fluid.table("countries")?.id()?.column("name")?.string(Some(50), false);
//! fluid
//!     .table("users")?
//!     .id()?
//!     .column("country_id")?
//!     .references("countries")?
//!     .nullable()
//!     .then()
//!     .column("email")?
//!     .string(Some(255), false)
//!     .not_null()
//!     .then()
//!     .unique(&["email"])?;
//! fluid.table("admins")?.extends("users")?;
//!
//! let schema = fluid.schema();
//! let country_id = schema.table("users")?.column("country_id")?;
//! assert_eq!(country_id.column_type, ColumnType::Integer);
//! assert!(schema.table("admins")?.has_foreign_key("fk_admins_id"));
//! # Ok::<(), fluid_schema::FluidError>(())
//! ```
//!
//! Builders are single-threaded views: they borrow the [`FluidSchema`]
//! mutably, so the model cannot be shared while a chain is in progress.

pub mod dialect;
pub mod error;
pub mod fluid;
pub mod inflector;
pub mod naming;
pub mod schema;

pub use error::{FluidError, Result, SchemaError};
pub use fluid::{FluidColumn, FluidColumnOptions, FluidSchema, FluidTable};
pub use naming::{DefaultNamingStrategy, NamingStrategy};
pub use schema::{
    Column, ColumnId, ColumnShape, ColumnType, DefaultValue, ForeignKey, ForeignKeyAction,
    ForeignKeyDefinition, Index, PrimaryKeyName, Schema, Table, TableId,
};
