//! SQLite dialect.
//!
//! SQLite cannot alter a column or a primary key in place, so those
//! operations render an empty expression and the executor skips them.
//! Dropping and renaming columns need SQLite 3.35.0 and 3.25.0.

use sqlplan_core::{Column, Dialect, Key, SqlExpr, Table, TableRef};

/// SQLite schema dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn quote_table(table: &TableRef) -> String {
        match &table.schema {
            Some(schema) if !schema.is_empty() => format!(
                "{}.{}",
                Self::quote_identifier(schema),
                Self::quote_identifier(&table.name)
            ),
            _ => Self::quote_identifier(&table.name),
        }
    }

    /// `<schema>."<table>_<key>"`; SQLite scopes index names per schema.
    fn index_name(table: &TableRef, key: &Key) -> String {
        let name = Self::quote_identifier(&format!("{}_{}", table.name, key.name));
        match &table.schema {
            Some(schema) if !schema.is_empty() => {
                format!("{}.{name}", Self::quote_identifier(schema))
            }
            _ => name,
        }
    }

    fn column_definition(col: &Column) -> String {
        let mut parts = vec![Self::quote_identifier(&col.name)];
        if !col.data_type.is_empty() {
            parts.push(col.data_type.clone());
        }
        if !col.nullable {
            parts.push(String::from("NOT NULL"));
        }
        if let Some(default) = &col.default {
            parts.push(format!("DEFAULT {default}"));
        }
        parts.join(" ")
    }

    fn owner(table: Option<&TableRef>) -> TableRef {
        table.cloned().unwrap_or_default()
    }

    fn create_index(table: &TableRef, key: &Key) -> String {
        let mut sql = String::from("CREATE ");
        if key.is_unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str("INDEX IF NOT EXISTS ");
        sql.push_str(&Self::index_name(table, key));
        sql.push_str(" ON ");
        sql.push_str(&Self::quote_identifier(&table.name));
        sql.push_str(" (");
        let cols: Vec<String> = key
            .columns
            .iter()
            .map(|c| Self::quote_identifier(c))
            .collect();
        sql.push_str(&cols.join(", "));
        sql.push(')');
        sql
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn primary_key_name(&self) -> &str {
        sqlplan_core::PRIMARY_KEY_NAME
    }

    fn add_column(&self, col: &Column) -> SqlExpr {
        SqlExpr::new(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            Self::quote_table(&Self::owner(col.table())),
            Self::column_definition(col)
        ))
    }

    fn drop_column(&self, col: &Column) -> SqlExpr {
        SqlExpr::new(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            Self::quote_table(&Self::owner(col.table())),
            Self::quote_identifier(&col.name)
        ))
    }

    fn modify_column(&self, _col: &Column) -> SqlExpr {
        SqlExpr::empty()
    }

    fn rename_column(&self, col: &Column, target: &Column) -> SqlExpr {
        SqlExpr::new(format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {}",
            Self::quote_table(&Self::owner(col.table())),
            Self::quote_identifier(&col.name),
            Self::quote_identifier(&target.name)
        ))
    }

    fn add_index(&self, key: &Key) -> SqlExpr {
        if key.is_primary() {
            return SqlExpr::empty();
        }
        SqlExpr::new(Self::create_index(&Self::owner(key.table()), key))
    }

    fn drop_index(&self, key: &Key) -> SqlExpr {
        if key.is_primary() {
            return SqlExpr::empty();
        }
        SqlExpr::new(format!(
            "DROP INDEX IF EXISTS {}",
            Self::index_name(&Self::owner(key.table()), key)
        ))
    }

    fn create_table_if_not_exists(&self, table: &Table) -> Vec<SqlExpr> {
        let mut defs: Vec<String> = table
            .columns()
            .iter()
            .filter(|col| !col.is_deprecated())
            .map(|col| format!("    {}", Self::column_definition(col)))
            .collect();
        if let Some(pk) = table.primary_key() {
            let cols: Vec<String> = pk
                .columns
                .iter()
                .map(|c| Self::quote_identifier(c))
                .collect();
            defs.push(format!("    PRIMARY KEY ({})", cols.join(", ")));
        }

        let owner = table.table_ref();
        let mut plan = vec![SqlExpr::new(format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            Self::quote_table(&owner),
            defs.join(",\n")
        ))];
        plan.extend(
            table
                .keys()
                .iter()
                .filter(|key| !key.is_primary())
                .map(|key| SqlExpr::new(Self::create_index(&owner, key))),
        );
        plan
    }

    fn drop_table(&self, table: &Table) -> SqlExpr {
        SqlExpr::new(format!(
            "DROP TABLE IF EXISTS {}",
            Self::quote_table(&table.table_ref())
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlplan_core::TableMember;

    fn users() -> Table {
        Table::new(
            "users",
            vec![
                TableMember::from(Column::new("id").data_type("INTEGER").not_null()),
                Column::new("email")
                    .data_type("TEXT")
                    .not_null()
                    .default_value("''")
                    .into(),
                Column::new("legacy").deprecated().into(),
                Key::primary(["id"]).into(),
                Key::unique_index("i_email", ["email"]).into(),
            ],
        )
    }

    #[test]
    fn column_operations() {
        let table = users();
        let dialect = SqliteDialect::new();
        let email = table.col("email").unwrap();

        assert_eq!(
            dialect.add_column(email).query(),
            "ALTER TABLE \"users\" ADD COLUMN \"email\" TEXT NOT NULL DEFAULT ''"
        );
        assert_eq!(
            dialect.drop_column(email).query(),
            "ALTER TABLE \"users\" DROP COLUMN \"email\""
        );
        assert_eq!(
            dialect
                .rename_column(table.col("legacy").unwrap(), email)
                .query(),
            "ALTER TABLE \"users\" RENAME COLUMN \"legacy\" TO \"email\""
        );
        assert!(dialect.modify_column(email).is_empty());
    }

    #[test]
    fn index_operations() {
        let table = users().with_schema("main");
        let dialect = SqliteDialect::new();
        let key = table.key("i_email").unwrap();

        assert_eq!(
            dialect.add_index(key).query(),
            "CREATE UNIQUE INDEX IF NOT EXISTS \"main\".\"users_i_email\" ON \"users\" (\"email\")"
        );
        assert_eq!(
            dialect.drop_index(key).query(),
            "DROP INDEX IF EXISTS \"main\".\"users_i_email\""
        );
        let pk = table.primary_key().unwrap();
        assert!(dialect.add_index(pk).is_empty());
        assert!(dialect.drop_index(pk).is_empty());
    }

    #[test]
    fn create_table_skips_deprecated_columns() {
        let plan = SqliteDialect::new().create_table_if_not_exists(&users());

        assert_eq!(plan.len(), 2);
        assert_eq!(
            plan[0].query(),
            "CREATE TABLE IF NOT EXISTS \"users\" (\n    \"id\" INTEGER NOT NULL,\n    \"email\" TEXT NOT NULL DEFAULT '',\n    PRIMARY KEY (\"id\")\n)"
        );
        assert!(plan[1].query().starts_with("CREATE UNIQUE INDEX"));
    }

    #[test]
    fn quotes_identifiers() {
        let table = Table::new("we\"ird", [Column::new("a")]);
        assert_eq!(
            SqliteDialect::new().drop_table(&table).query(),
            "DROP TABLE IF EXISTS \"we\"\"ird\""
        );
    }
}
