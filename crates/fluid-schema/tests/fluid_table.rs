//! Integration tests for table-level builders: columns, keys, shorthands and inheritance.

mod common;

use common::{add_composite_table, fluid_with_tables, table};
use fluid_schema::schema::PRIMARY_KEY_INDEX;
use fluid_schema::{ColumnType, FluidError, FluidSchema, SchemaError};

#[test]
fn column_is_created_once() {
    let mut fluid = FluidSchema::default();
    let mut posts = fluid.table("posts").unwrap();
    let first = posts.column("title").unwrap().handle();
    let second = posts.column("title").unwrap().handle();

    assert_eq!(first, second);
    assert_eq!(posts.model().columns().len(), 1);
    // New columns default to strings.
    assert_eq!(posts.column("title").unwrap().model().column_type, ColumnType::String);
}

#[test]
fn existing_column_is_wrapped() {
    let mut fluid = FluidSchema::default();
    fluid.table("posts").unwrap().column("views").unwrap().big_int();

    // A fresh builder over the same schema still finds the column.
    let schema = fluid.into_schema();
    let mut fluid = FluidSchema::new(schema);
    let mut posts = fluid.table("posts").unwrap();
    assert_eq!(posts.column("views").unwrap().model().column_type, ColumnType::BigInt);
    assert_eq!(posts.model().columns().len(), 1);
}

#[test]
fn index_and_unique() {
    let mut fluid = FluidSchema::default();
    let mut posts = fluid.table("posts").unwrap();
    posts.column("slug").unwrap().string(Some(100), false);
    posts.column("author").unwrap().integer();
    posts
        .index(&["author", "slug"])
        .unwrap()
        .unique(&["slug"])
        .unwrap()
        .index_named(&["slug"], "by_slug")
        .unwrap()
        .unique_named(&["author"], "one_per_author")
        .unwrap();

    let model = posts.model();
    assert_eq!(model.indexes().len(), 4);
    let composite = model.index("idx_posts_author_slug").unwrap();
    assert_eq!(composite.columns, ["author", "slug"]);
    assert!(!composite.unique);
    assert!(model.index("uniq_posts_slug").unwrap().unique);
    assert!(model.has_index("by_slug"));
    assert!(model.index("one_per_author").unwrap().unique);
}

#[test]
fn index_on_missing_column_fails() {
    let mut fluid = FluidSchema::default();
    let err = fluid.table("posts").unwrap().index(&["nope"]).unwrap_err();
    assert!(matches!(
        err,
        FluidError::Schema(SchemaError::UnknownColumn { .. })
    ));
}

#[test]
fn primary_key_without_name_is_unnamed() {
    let mut fluid = FluidSchema::default();
    let mut tags = fluid.table("tags").unwrap();
    tags.column("a").unwrap().integer();
    tags.column("b").unwrap().integer();
    tags.primary_key(&["b", "a"]).unwrap();

    let pk = tags.model().primary_key().unwrap();
    assert_eq!(pk.name, PRIMARY_KEY_INDEX);
    assert_eq!(pk.columns, ["b", "a"]);
}

#[test]
fn primary_key_with_name() {
    let mut fluid = FluidSchema::default();
    let mut tags = fluid.table("tags").unwrap();
    tags.column("a").unwrap().integer();
    tags.primary_key_named(&["a"], "pkname").unwrap();

    assert!(tags.model().has_index("pkname"));
    assert!(!tags.model().has_index(PRIMARY_KEY_INDEX));

    let err = tags.primary_key(&["a"]).unwrap_err();
    assert_eq!(
        err,
        FluidError::Schema(SchemaError::PrimaryKeyAlreadyExists("tags".into()))
    );
}

#[test]
fn id_shorthand() {
    let mut fluid = FluidSchema::default();
    fluid.table("posts").unwrap().id().unwrap();

    let posts = table(&fluid, "posts");
    let id = posts.column("id").unwrap();
    assert_eq!(id.column_type, ColumnType::Integer);
    assert!(id.autoincrement);
    assert_eq!(posts.primary_key_columns(), ["id"]);
}

#[test]
fn uuid_shorthand() {
    let mut fluid = FluidSchema::default();
    fluid.table("posts").unwrap().uuid().unwrap();

    let posts = table(&fluid, "posts");
    let uuid = posts.column("uuid").unwrap();
    assert_eq!(uuid.column_type, ColumnType::Guid);
    assert!(!uuid.autoincrement);
    assert_eq!(posts.primary_key_columns(), ["uuid"]);
}

#[test]
fn timestamps_shorthand() {
    let mut fluid = FluidSchema::default();
    fluid.table("posts").unwrap().timestamps().unwrap();

    let posts = table(&fluid, "posts");
    for name in ["created_at", "updated_at"] {
        let column = posts.column(name).unwrap();
        assert_eq!(column.column_type, ColumnType::DateTimeImmutable);
        assert_eq!(column.default, None);
    }
    assert!(!posts.has_primary_key());
}

// =============================================================================
// Inheritance
// =============================================================================

#[test]
fn extends_shares_the_parent_identity() {
    let mut fluid = fluid_with_tables();
    fluid.table("admins").unwrap().extends("users").unwrap();

    let admins = table(&fluid, "admins");
    assert_eq!(admins.columns().len(), 1);
    let id = admins.column("id").unwrap();
    assert_eq!(id.shape(), table(&fluid, "users").column("id").unwrap().shape());
    assert_eq!(admins.primary_key_columns(), ["id"]);

    let fk = admins.foreign_key("fk_admins_id").unwrap();
    assert_eq!(fk.local_table, "admins");
    assert_eq!(fk.local_columns, ["id"]);
    assert_eq!(fk.foreign_table, "users");
    assert_eq!(fk.foreign_columns, ["id"]);
}

#[test]
fn extends_uses_the_parent_key_name() {
    let mut fluid = FluidSchema::default();
    fluid.table("contacts").unwrap().uuid().unwrap();
    fluid.table("users").unwrap().extends("contacts").unwrap();

    let users = table(&fluid, "users");
    assert_eq!(users.column("uuid").unwrap().column_type, ColumnType::Guid);
    assert_eq!(users.primary_key_columns(), ["uuid"]);
    assert_eq!(users.foreign_keys()[0].foreign_table, "contacts");
}

#[test]
fn extends_rejects_composite_parent() {
    let mut fluid = FluidSchema::default();
    add_composite_table(&mut fluid, "pairs");

    let err = fluid.table("children").unwrap().extends("pairs").unwrap_err();
    assert_eq!(
        err,
        FluidError::MultiColumnPrimaryKey {
            table: "pairs".into(),
            columns: vec!["id1".into(), "id2".into()],
        }
    );

    let children = table(&fluid, "children");
    assert!(children.columns().is_empty());
    assert!(children.foreign_keys().is_empty());
}

#[test]
fn extends_rejects_parent_without_primary_key() {
    let mut fluid = FluidSchema::default();
    fluid.table("loose").unwrap().column("x").unwrap().integer();

    let err = fluid.table("children").unwrap().extends("loose").unwrap_err();
    assert!(matches!(
        err,
        FluidError::MultiColumnPrimaryKey { ref columns, .. } if columns.is_empty()
    ));
}

#[test]
fn extends_unknown_parent() {
    let mut fluid = FluidSchema::default();
    let err = fluid.table("children").unwrap().extends("ghosts").unwrap_err();

    assert!(err.is_unknown_table());
    assert!(table(&fluid, "children").columns().is_empty());
    assert!(!fluid.schema().has_table("ghosts"));
}

#[test]
fn extends_requires_a_table_without_primary_key() {
    let mut fluid = fluid_with_tables();
    let mut admins = fluid.table("admins").unwrap();
    admins.id().unwrap();

    let err = admins.extends("users").unwrap_err();
    assert_eq!(
        err,
        FluidError::Schema(SchemaError::PrimaryKeyAlreadyExists("admins".into()))
    );
    assert!(admins.model().foreign_keys().is_empty());
}
