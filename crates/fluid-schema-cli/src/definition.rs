//! Declarative schema definitions, replayed through the fluent builder.

use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info};

use fluid_schema::{
    ColumnType, DefaultValue, FluidColumn, FluidColumnOptions, FluidSchema, FluidTable,
    ForeignKeyAction,
};

/// A whole schema: tables first, then junction tables.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
    /// Pairs of table names to join.
    #[serde(default)]
    pub junctions: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDefinition {
    pub name: String,
    #[serde(default)]
    pub id: bool,
    #[serde(default)]
    pub uuid: bool,
    #[serde(default)]
    pub timestamps: bool,
    pub extends: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
    pub primary_key: Option<PrimaryKeyDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnDefinition {
    pub name: String,
    /// Ignored when `references` is set: the referenced type wins.
    #[serde(rename = "type", default = "default_column_type")]
    pub column_type: ColumnType,
    pub length: Option<u32>,
    #[serde(default)]
    pub fixed: bool,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub index: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub auto_increment: bool,
    pub comment: Option<String>,
    /// Any JSON scalar; an explicit `null` means a NULL default.
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,
    pub references: Option<ReferenceDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceDefinition {
    pub table: String,
    pub name: Option<String>,
    #[serde(default)]
    pub on_update: ForeignKeyAction,
    #[serde(default)]
    pub on_delete: ForeignKeyAction,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexDefinition {
    pub columns: Vec<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimaryKeyDefinition {
    pub columns: Vec<String>,
    pub name: Option<String>,
}

const fn default_column_type() -> ColumnType {
    ColumnType::String
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl SchemaDefinition {
    /// Reads a definition from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid schema definition in {}", path.display()))
    }

    /// Replays the definition, in declaration order.
    pub fn apply(&self, fluid: &mut FluidSchema) -> anyhow::Result<()> {
        for table in &self.tables {
            table
                .apply(fluid)
                .with_context(|| format!("Failed to build table '{}'", table.name))?;
        }
        for (left, right) in &self.junctions {
            fluid
                .junction_table(left, right)
                .with_context(|| format!("Failed to join '{left}' and '{right}'"))?;
        }

        info!(
            tables = self.tables.len(),
            junctions = self.junctions.len(),
            "Applied schema definition"
        );
        Ok(())
    }
}

impl TableDefinition {
    fn apply(&self, fluid: &mut FluidSchema) -> anyhow::Result<()> {
        let mut table = fluid.table(&self.name)?;
        if self.id {
            table.id()?;
        }
        if self.uuid {
            table.uuid()?;
        }
        if let Some(parent) = &self.extends {
            table.extends(parent)?;
        }

        for column in &self.columns {
            column
                .apply(&mut table)
                .with_context(|| format!("Invalid column '{}'", column.name))?;
        }

        for index in &self.indexes {
            let columns: Vec<&str> = index.columns.iter().map(String::as_str).collect();
            match (&index.name, index.unique) {
                (Some(name), true) => table.unique_named(&columns, name)?,
                (Some(name), false) => table.index_named(&columns, name)?,
                (None, true) => table.unique(&columns)?,
                (None, false) => table.index(&columns)?,
            };
        }

        if let Some(pk) = &self.primary_key {
            let columns: Vec<&str> = pk.columns.iter().map(String::as_str).collect();
            match &pk.name {
                Some(name) => table.primary_key_named(&columns, name)?,
                None => table.primary_key(&columns)?,
            };
        }

        if self.timestamps {
            table.timestamps()?;
        }

        debug!(table = %self.name, columns = self.columns.len(), "Applied table definition");
        Ok(())
    }
}

impl ColumnDefinition {
    fn apply(&self, table: &mut FluidTable<'_>) -> anyhow::Result<()> {
        let column = table.column(&self.name)?;
        let mut options = match &self.references {
            Some(reference) => column.references_full(
                &reference.table,
                reference.name.as_deref(),
                reference.on_update,
                reference.on_delete,
            )?,
            None => self.set_type(column),
        };

        if self.nullable {
            options = options.nullable();
        }
        if self.unique {
            options = options.unique();
        }
        if self.auto_increment {
            options = options.auto_increment();
        }
        if let Some(comment) = &self.comment {
            options = options.comment(comment.as_str());
        }
        if let Some(value) = &self.default {
            options = options.default(default_value(value)?);
        }
        if self.index {
            options = options.index()?;
        }
        if self.primary_key {
            options.primary_key()?;
        }
        Ok(())
    }

    fn set_type<'a>(&self, column: FluidColumn<'a>) -> FluidColumnOptions<'a> {
        match self.column_type {
            ColumnType::Integer => column.integer(),
            ColumnType::SmallInt => column.small_int(),
            ColumnType::BigInt => column.big_int(),
            ColumnType::Decimal => {
                column.decimal(self.precision.unwrap_or(10), self.scale.unwrap_or(0))
            }
            ColumnType::Float => column.float(self.precision.unwrap_or(10), self.scale.unwrap_or(0)),
            ColumnType::String => column.string(self.length, self.fixed),
            ColumnType::Text => column.text(),
            ColumnType::Guid => column.guid(),
            ColumnType::Binary => column.binary(self.length, self.fixed),
            ColumnType::Blob => column.blob(),
            ColumnType::Boolean => column.boolean(),
            ColumnType::Date => column.date(),
            ColumnType::DateImmutable => column.date_immutable(),
            ColumnType::DateTime => column.datetime(),
            ColumnType::DateTimeImmutable => column.datetime_immutable(),
            ColumnType::DateTimeTz => column.datetime_tz(),
            ColumnType::DateTimeTzImmutable => column.datetime_tz_immutable(),
            ColumnType::Time => column.time(),
            ColumnType::TimeImmutable => column.time_immutable(),
            ColumnType::DateInterval => column.date_interval(),
            ColumnType::Array => column.array(),
            ColumnType::SimpleArray => column.simple_array(),
            ColumnType::Json => column.json(),
            ColumnType::Object => column.object(),
        }
    }
}

fn default_value(value: &Value) -> anyhow::Result<DefaultValue> {
    Ok(match value {
        Value::Null => DefaultValue::Null,
        Value::Bool(b) => DefaultValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => DefaultValue::Integer(i),
            None => n
                .as_f64()
                .map(DefaultValue::Float)
                .with_context(|| format!("Unsupported numeric default {n}"))?,
        },
        Value::String(s) => DefaultValue::String(s.clone()),
        Value::Array(_) | Value::Object(_) => bail!("Default must be a JSON scalar, got {value}"),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use fluid_schema::{ColumnType, DefaultValue, FluidSchema, ForeignKeyAction, Schema};
    use serde_json::json;

    use super::*;

    const SAMPLE: &str = r#"{
        "tables": [
            { "name": "countries", "id": true,
              "columns": [ { "name": "code", "type": "string", "length": 2, "fixed": true, "unique": true } ] },
            { "name": "roles", "uuid": true },
            { "name": "users", "id": true, "timestamps": true,
              "columns": [
                { "name": "country_id", "nullable": true,
                  "references": { "table": "countries", "on_delete": "cascade" } },
                { "name": "score", "type": "decimal", "precision": 5, "scale": 2, "default": 0 },
                { "name": "nickname", "default": null, "comment": "shown publicly" }
              ],
              "indexes": [ { "columns": ["country_id"] }, { "columns": ["nickname"], "unique": true, "name": "uniq_nick" } ] },
            { "name": "admins", "extends": "users" }
        ],
        "junctions": [ ["users", "roles"] ]
    }"#;

    fn build(json: &str) -> anyhow::Result<Schema> {
        let definition: SchemaDefinition = serde_json::from_str(json)?;
        let mut fluid = FluidSchema::default();
        definition.apply(&mut fluid)?;
        Ok(fluid.into_schema())
    }

    #[test]
    fn test_sample_definition() {
        let schema = build(SAMPLE).unwrap();
        let names: Vec<_> = schema.table_names().collect();
        assert_eq!(names, ["countries", "roles", "users", "admins", "users_roles"]);

        let code = schema.table("countries").unwrap().column("code").unwrap();
        assert_eq!(code.length, Some(2));
        assert!(code.fixed);
        assert_eq!(code.custom_option("unique"), Some(&json!(true)));

        let users = schema.table("users").unwrap();
        let country_id = users.column("country_id").unwrap();
        assert_eq!(country_id.column_type, ColumnType::Integer);
        assert!(!country_id.not_null);
        let fk = users.foreign_key("fk_users_country_id").unwrap();
        assert_eq!(fk.on_delete, ForeignKeyAction::Cascade);
        assert_eq!(fk.on_update, ForeignKeyAction::Restrict);

        let score = users.column("score").unwrap();
        assert_eq!(score.precision, Some(5));
        assert_eq!(score.default, Some(DefaultValue::Integer(0)));
        let nickname = users.column("nickname").unwrap();
        assert_eq!(nickname.default, Some(DefaultValue::Null));
        assert_eq!(nickname.comment.as_deref(), Some("shown publicly"));

        assert!(users.has_index("idx_users_country_id"));
        assert!(users.index("uniq_nick").unwrap().unique);
        assert!(users.has_column("created_at"));

        let admins = schema.table("admins").unwrap();
        assert_eq!(admins.primary_key_columns(), ["id"]);

        let junction = schema.table("users_roles").unwrap();
        assert_eq!(junction.column("role_id").unwrap().column_type, ColumnType::Guid);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let definition = SchemaDefinition::load(file.path()).unwrap();
        assert_eq!(definition.tables.len(), 4);
        assert_eq!(definition.junctions, [("users".to_string(), "roles".to_string())]);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{ "tables": [ { "nme": "x" } ] }"#).unwrap();

        let err = SchemaDefinition::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid schema definition"));

        let err = SchemaDefinition::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_unknown_reference_has_context() {
        let err = build(
            r#"{ "tables": [ { "name": "users",
                "columns": [ { "name": "country_id", "references": { "table": "countries" } } ] } ] }"#,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Failed to build table 'users'");
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        assert_eq!(chain.last().unwrap(), "Table 'countries' does not exist");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_value(&json!(true)).unwrap(), DefaultValue::Bool(true));
        assert_eq!(default_value(&json!(1.5)).unwrap(), DefaultValue::Float(1.5));
        assert_eq!(
            default_value(&json!("x")).unwrap(),
            DefaultValue::String("x".into())
        );
        assert!(default_value(&json!([1])).is_err());
    }
}
