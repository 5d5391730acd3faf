//! Integration tests for column types and `references`.

mod common;

use common::{add_composite_table, fluid_with_tables, table};
use fluid_schema::{ColumnShape, ColumnType, FluidError, FluidSchema, ForeignKeyAction, SchemaError};

fn built_shape(build: impl FnOnce(&mut FluidSchema)) -> ColumnShape {
    let mut fluid = FluidSchema::default();
    build(&mut fluid);
    table(&fluid, "t").column("c").unwrap().shape()
}

#[test]
#[allow(deprecated)]
fn type_setters() {
    let cases: [(fn(&mut FluidSchema), ColumnType); 22] = [
        (|f| { f.table("t").unwrap().column("c").unwrap().integer(); }, ColumnType::Integer),
        (|f| { f.table("t").unwrap().column("c").unwrap().small_int(); }, ColumnType::SmallInt),
        (|f| { f.table("t").unwrap().column("c").unwrap().big_int(); }, ColumnType::BigInt),
        (|f| { f.table("t").unwrap().column("c").unwrap().text(); }, ColumnType::Text),
        (|f| { f.table("t").unwrap().column("c").unwrap().guid(); }, ColumnType::Guid),
        (|f| { f.table("t").unwrap().column("c").unwrap().blob(); }, ColumnType::Blob),
        (|f| { f.table("t").unwrap().column("c").unwrap().boolean(); }, ColumnType::Boolean),
        (|f| { f.table("t").unwrap().column("c").unwrap().date(); }, ColumnType::Date),
        (|f| { f.table("t").unwrap().column("c").unwrap().date_immutable(); }, ColumnType::DateImmutable),
        (|f| { f.table("t").unwrap().column("c").unwrap().datetime(); }, ColumnType::DateTime),
        (|f| { f.table("t").unwrap().column("c").unwrap().datetime_immutable(); }, ColumnType::DateTimeImmutable),
        (|f| { f.table("t").unwrap().column("c").unwrap().datetime_tz(); }, ColumnType::DateTimeTz),
        (|f| { f.table("t").unwrap().column("c").unwrap().datetime_tz_immutable(); }, ColumnType::DateTimeTzImmutable),
        (|f| { f.table("t").unwrap().column("c").unwrap().time(); }, ColumnType::Time),
        (|f| { f.table("t").unwrap().column("c").unwrap().time_immutable(); }, ColumnType::TimeImmutable),
        (|f| { f.table("t").unwrap().column("c").unwrap().date_interval(); }, ColumnType::DateInterval),
        (|f| { f.table("t").unwrap().column("c").unwrap().array(); }, ColumnType::Array),
        (|f| { f.table("t").unwrap().column("c").unwrap().simple_array(); }, ColumnType::SimpleArray),
        (|f| { f.table("t").unwrap().column("c").unwrap().json(); }, ColumnType::Json),
        (|f| { f.table("t").unwrap().column("c").unwrap().json_array(); }, ColumnType::Json),
        (|f| { f.table("t").unwrap().column("c").unwrap().object(); }, ColumnType::Object),
        (|f| { f.table("t").unwrap().column("c").unwrap().string(None, false); }, ColumnType::String),
    ];

    for (build, expected) in cases {
        assert_eq!(built_shape(build).column_type, expected);
    }
}

#[test]
fn sized_type_setters() {
    let shape = built_shape(|f| {
        f.table("t").unwrap().column("c").unwrap().decimal(12, 2);
    });
    assert_eq!(shape.column_type, ColumnType::Decimal);
    assert_eq!(shape.precision, Some(12));
    assert_eq!(shape.scale, 2);

    let shape = built_shape(|f| {
        f.table("t").unwrap().column("c").unwrap().float(8, 3);
    });
    assert_eq!(shape.column_type, ColumnType::Float);
    assert_eq!(shape.precision, Some(8));
    assert_eq!(shape.scale, 3);

    let shape = built_shape(|f| {
        f.table("t").unwrap().column("c").unwrap().string(Some(2), true);
    });
    assert_eq!(shape.length, Some(2));
    assert!(shape.fixed);

    let shape = built_shape(|f| {
        f.table("t").unwrap().column("c").unwrap().binary(Some(16), true);
    });
    assert_eq!(shape.column_type, ColumnType::Binary);
    assert_eq!(shape.length, Some(16));
    assert!(shape.fixed);
}

#[test]
fn type_setters_overwrite() {
    let shape = built_shape(|f| {
        let mut t = f.table("t").unwrap();
        t.column("c").unwrap().string(Some(10), true);
        t.column("c").unwrap().text();
    });
    assert_eq!(shape.column_type, ColumnType::Text);
    // Only the type changes; length and fixed stay as they were.
    assert_eq!(shape.length, Some(10));
    assert!(shape.fixed);
}

// =============================================================================
// references
// =============================================================================

#[test]
fn references_copies_the_key_shape() {
    let mut fluid = FluidSchema::default();
    fluid
        .table("countries")
        .unwrap()
        .column("id")
        .unwrap()
        .decimal(10, 0)
        .primary_key()
        .unwrap();
    {
        let countries = fluid.schema_mut().table_mut("countries").unwrap();
        countries.column_mut("id").unwrap().unsigned = true;
    }

    fluid
        .table("users")
        .unwrap()
        .column("country_id")
        .unwrap()
        .references("countries")
        .unwrap();

    let users = table(&fluid, "users");
    let country_id = users.column("country_id").unwrap();
    let id = table(&fluid, "countries").column("id").unwrap();
    assert_eq!(country_id.shape(), id.shape());
    assert!(country_id.unsigned);

    let fk = &users.foreign_keys()[0];
    assert_eq!(fk.name, "fk_users_country_id");
    assert_eq!(fk.local_columns, ["country_id"]);
    assert_eq!(fk.foreign_table, "countries");
    assert_eq!(fk.foreign_columns, ["id"]);
    assert_eq!(fk.on_update, ForeignKeyAction::Restrict);
    assert_eq!(fk.on_delete, ForeignKeyAction::Restrict);
}

#[test]
fn references_with_name_and_actions() {
    let mut fluid = fluid_with_tables();
    let mut posts = fluid.table("posts").unwrap();
    posts
        .column("author_id")
        .unwrap()
        .references_named("users", "myfk")
        .unwrap()
        .then()
        .column("country_id")
        .unwrap()
        .references_full(
            "countries",
            None,
            ForeignKeyAction::Cascade,
            ForeignKeyAction::SetNull,
        )
        .unwrap()
        .nullable();

    let model = posts.model();
    let fk = model.foreign_key("myfk").unwrap();
    assert_eq!(fk.local_table, "posts");
    assert_eq!(fk.foreign_table, "users");
    assert_eq!(fk.local_columns, ["author_id"]);

    let fk = model.foreign_key("fk_posts_country_id").unwrap();
    assert_eq!(fk.on_update, ForeignKeyAction::Cascade);
    assert_eq!(fk.on_delete, ForeignKeyAction::SetNull);
    assert!(!model.column("country_id").unwrap().not_null);
}

#[test]
fn references_unknown_table() {
    let mut fluid = FluidSchema::default();
    let err = fluid
        .table("users")
        .unwrap()
        .column("country_id")
        .unwrap()
        .references("countries")
        .unwrap_err();

    assert_eq!(
        err,
        FluidError::Schema(SchemaError::UnknownTable("countries".into()))
    );
    let users = table(&fluid, "users");
    assert!(users.foreign_keys().is_empty());
    assert_eq!(users.column("country_id").unwrap().column_type, ColumnType::String);
}

#[test]
fn references_rejects_composite_key() {
    let mut fluid = FluidSchema::default();
    add_composite_table(&mut fluid, "pairs");
    fluid
        .table("users")
        .unwrap()
        .column("pair_id")
        .unwrap()
        .string(Some(5), false);

    let err = fluid
        .table("users")
        .unwrap()
        .column("pair_id")
        .unwrap()
        .references("pairs")
        .unwrap_err();
    assert!(matches!(err, FluidError::MultiColumnPrimaryKey { .. }));

    let users = table(&fluid, "users");
    assert!(users.foreign_keys().is_empty());
    let pair_id = users.column("pair_id").unwrap();
    assert_eq!(pair_id.column_type, ColumnType::String);
    assert_eq!(pair_id.length, Some(5));
}

#[test]
fn failed_foreign_key_restores_the_shape() {
    let mut fluid = fluid_with_tables();
    let mut posts = fluid.table("posts").unwrap();
    posts.column("owner").unwrap().references_named("users", "owner_fk").unwrap();
    posts.column("label").unwrap().text();

    let err = posts
        .column("label")
        .unwrap()
        .references_named("countries", "owner_fk")
        .unwrap_err();
    assert!(matches!(
        err,
        FluidError::Schema(SchemaError::ForeignKeyAlreadyExists { .. })
    ));
    assert_eq!(posts.model().column("label").unwrap().column_type, ColumnType::Text);
    assert_eq!(posts.model().foreign_keys().len(), 1);
}
