//! Migration planning across a whole registry.

use tracing::{debug, info};

use crate::dialect::Dialect;
use crate::error::Result;
use crate::expr::SqlExpr;
use crate::tables::Tables;

/// Plans the migration from `previous` to `current`.
///
/// Tables are visited in `current`'s registration order. A table missing
/// from `previous` is created; an existing one is diffed. Tables that only
/// exist in `previous` are left alone.
///
/// # Errors
///
/// Fails on the first table with an undeclared rename target; no partial
/// plan is returned.
pub fn plan_migration<D: Dialect + ?Sized>(
    current: &Tables,
    previous: &Tables,
    dialect: &D,
) -> Result<Vec<SqlExpr>> {
    let mut plan = Vec::new();
    for table in current.iter() {
        let Some(prev) = previous.table(&table.name) else {
            debug!(table = %table.name, "Table does not exist yet, creating");
            plan.extend(dialect.create_table_if_not_exists(table));
            continue;
        };
        plan.extend(table.diff(prev, dialect)?);
    }
    info!(
        tables = current.len(),
        operations = plan.len(),
        "Planned migration"
    );
    Ok(plan)
}
