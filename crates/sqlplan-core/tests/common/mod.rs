//! Shared helpers for integration tests.

use sqlplan_core::{Column, Dialect, Key, SqlExpr, Table, TableRef};

/// A dialect that renders each operation as a short, readable line.
pub struct TextDialect;

fn owner(table: Option<&TableRef>) -> String {
    table.map(TableRef::qualified_name).unwrap_or_default()
}

impl Dialect for TextDialect {
    fn name(&self) -> &'static str {
        "text"
    }

    fn primary_key_name(&self) -> &str {
        "pkey"
    }

    fn add_column(&self, col: &Column) -> SqlExpr {
        SqlExpr::new(format!("add {}.{} {}", owner(col.table()), col.name, col.data_type))
    }

    fn drop_column(&self, col: &Column) -> SqlExpr {
        SqlExpr::new(format!("drop {}.{}", owner(col.table()), col.name))
    }

    fn modify_column(&self, col: &Column) -> SqlExpr {
        SqlExpr::new(format!("modify {}.{} {}", owner(col.table()), col.name, col.data_type))
    }

    fn rename_column(&self, col: &Column, target: &Column) -> SqlExpr {
        SqlExpr::new(format!(
            "rename {}.{} -> {}",
            owner(col.table()),
            col.name,
            target.name
        ))
    }

    fn add_index(&self, key: &Key) -> SqlExpr {
        SqlExpr::new(format!(
            "add index {}.{} ({})",
            owner(key.table()),
            key.name,
            key.columns_expr()
        ))
    }

    fn drop_index(&self, key: &Key) -> SqlExpr {
        SqlExpr::new(format!("drop index {}.{}", owner(key.table()), key.name))
    }

    fn create_table_if_not_exists(&self, table: &Table) -> Vec<SqlExpr> {
        let mut plan = vec![SqlExpr::new(format!("create {}", table.expr()))];
        plan.extend(
            table
                .keys()
                .iter()
                .filter(|key| !key.is_primary())
                .map(|key| self.add_index(key)),
        );
        plan
    }

    fn drop_table(&self, table: &Table) -> SqlExpr {
        SqlExpr::new(format!("drop table {}", table.expr()))
    }
}

/// Query text of every operation in a plan.
pub fn queries(plan: &[SqlExpr]) -> Vec<String> {
    plan.iter().map(|expr| expr.query().to_string()).collect()
}
