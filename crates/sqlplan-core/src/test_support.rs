//! Dialect double for unit tests.

use crate::{Column, Dialect, Key, SqlExpr, Table};

/// Renders one readable line per operation.
pub struct RecordingDialect {
    primary_key: &'static str,
}

impl RecordingDialect {
    pub const fn with_primary_key(primary_key: &'static str) -> Self {
        Self { primary_key }
    }
}

impl Default for RecordingDialect {
    fn default() -> Self {
        Self::with_primary_key("primary")
    }
}

fn owner(table: Option<&crate::TableRef>) -> String {
    table.map(crate::TableRef::qualified_name).unwrap_or_default()
}

impl Dialect for RecordingDialect {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn primary_key_name(&self) -> &str {
        self.primary_key
    }

    fn add_column(&self, col: &Column) -> SqlExpr {
        SqlExpr::new(format!("ADD COLUMN {}.{}", owner(col.table()), col.name))
    }

    fn drop_column(&self, col: &Column) -> SqlExpr {
        SqlExpr::new(format!("DROP COLUMN {}.{}", owner(col.table()), col.name))
    }

    fn modify_column(&self, col: &Column) -> SqlExpr {
        SqlExpr::new(format!("MODIFY COLUMN {}.{}", owner(col.table()), col.name))
    }

    fn rename_column(&self, col: &Column, target: &Column) -> SqlExpr {
        SqlExpr::new(format!(
            "RENAME COLUMN {}.{} TO {}",
            owner(col.table()),
            col.name,
            target.name
        ))
    }

    fn add_index(&self, key: &Key) -> SqlExpr {
        SqlExpr::new(format!(
            "ADD INDEX {}.{} ({})",
            owner(key.table()),
            key.name,
            key.columns_expr()
        ))
    }

    fn drop_index(&self, key: &Key) -> SqlExpr {
        SqlExpr::new(format!("DROP INDEX {}.{}", owner(key.table()), key.name))
    }

    fn create_table_if_not_exists(&self, table: &Table) -> Vec<SqlExpr> {
        vec![SqlExpr::new(format!(
            "CREATE TABLE {} ({})",
            table.expr(),
            table.columns().expr()
        ))]
    }

    fn drop_table(&self, table: &Table) -> SqlExpr {
        SqlExpr::new(format!("DROP TABLE {}", table.expr()))
    }
}

#[must_use]
pub fn queries(plan: &[SqlExpr]) -> Vec<&str> {
    plan.iter().map(SqlExpr::query).collect()
}
