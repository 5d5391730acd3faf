#![allow(dead_code)]

use fluid_schema::dialect::GenericDialect;
use fluid_schema::{DefaultNamingStrategy, FluidSchema, Schema, Table};

/// Builder without quoting, with `countries`, `users` and `roles` each
/// having an auto-incremented `id` primary key.
pub fn fluid_with_tables() -> FluidSchema {
    let mut fluid = FluidSchema::default();
    for table in ["countries", "users", "roles"] {
        fluid
            .table(table)
            .and_then(|mut t| t.id().map(|_| ()))
            .unwrap_or_else(|e| panic!("Failed to create {table}: {e}"));
    }
    fluid
}

/// Builder quoting identifiers with ANSI double quotes.
pub fn quoted_fluid() -> FluidSchema {
    FluidSchema::with_naming_strategy(
        Schema::new(),
        DefaultNamingStrategy::new().with_dialect(GenericDialect::new()),
    )
}

/// Adds a table whose primary key spans `id1` and `id2`.
pub fn add_composite_table(fluid: &mut FluidSchema, name: &str) {
    let mut table = fluid.table(name).unwrap();
    table.column("id1").unwrap().integer();
    table.column("id2").unwrap().integer();
    table.primary_key(&["id1", "id2"]).unwrap();
}

pub fn table<'a>(fluid: &'a FluidSchema, name: &str) -> &'a Table {
    fluid
        .schema()
        .table(name)
        .unwrap_or_else(|e| panic!("Expected table {name}: {e}"))
}
