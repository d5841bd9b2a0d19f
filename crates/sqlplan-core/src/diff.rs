//! Migration diff between two descriptions of the same table.
//!
//! The walk is driven by the current table. `previous` is only a lookup
//! source, so a column or key that is simply missing from the current
//! table never produces a drop: columns go away by being declared
//! deprecated first. Every decision is made on presence, absence and
//! deprecation metadata; types and defaults are the dialect's business,
//! which is why every surviving column gets a modify operation.
//!
//! Output order is columns in declaration order, then keys in declaration
//! order, then drops of keys that disappeared.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::column::Column;
use crate::dialect::Dialect;
use crate::error::{Result, SchemaError};
use crate::expr::SqlExpr;
use crate::table::Table;

impl Table {
    /// Computes the ordered operations that turn `previous` into `self`.
    ///
    /// `previous` is not modified; renames are tracked on a private copy.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UndeclaredRenameTarget`] if a column present
    /// in `previous` is renamed to a column this table does not declare. No
    /// operations are produced in that case.
    pub fn diff<D: Dialect + ?Sized>(
        &self,
        previous: &Self,
        dialect: &D,
    ) -> Result<Vec<SqlExpr>> {
        self.check_rename_targets(previous)?;

        let mut prev = previous.clone();
        let mut plan = Vec::new();

        self.diff_columns(&mut prev, dialect, &mut plan)?;
        self.diff_keys(&prev, dialect, &mut plan);

        debug!(
            table = %self.name,
            dialect = dialect.name(),
            operations = plan.len(),
            "Computed table diff"
        );
        Ok(plan)
    }

    /// Renames of columns absent from `previous` are never acted on.
    fn check_rename_targets(&self, previous: &Self) -> Result<()> {
        for col in self.columns().iter() {
            if previous.col(&col.name).is_none() {
                continue;
            }
            if let Some(target) = col.rename_target() {
                self.rename_target_of(&col.name, target)?;
            }
        }
        Ok(())
    }

    fn rename_target_of(&self, column: &str, target: &str) -> Result<&Column> {
        self.col(target)
            .ok_or_else(|| SchemaError::UndeclaredRenameTarget {
                table: self.name.clone(),
                column: column.to_string(),
                target: target.to_string(),
            })
    }

    fn diff_columns<D: Dialect + ?Sized>(
        &self,
        prev: &mut Self,
        dialect: &D,
        plan: &mut Vec<SqlExpr>,
    ) -> Result<()> {
        for col in self.columns().iter() {
            if prev.col(&col.name).is_none() {
                if col.is_deprecated() {
                    trace!(column = %col.name, "Deprecated column never existed, skipping");
                } else {
                    trace!(column = %col.name, "Adding column");
                    plan.push(dialect.add_column(col));
                }
                continue;
            }

            let Some(actions) = &col.deprecated else {
                trace!(column = %col.name, "Modifying column");
                plan.push(dialect.modify_column(col));
                continue;
            };

            let Some(target) = actions.rename_target() else {
                trace!(column = %col.name, "Dropping deprecated column");
                plan.push(dialect.drop_column(col));
                continue;
            };

            let target_col = self.rename_target_of(&col.name, target)?;
            if let Some(existing) = prev.col(target) {
                trace!(column = %target, "Dropping column in the way of a rename");
                plan.push(dialect.drop_column(existing));
            }
            trace!(column = %col.name, target = %target, "Renaming column");
            plan.push(dialect.rename_column(col, target_col));
            prev.add_col(target_col.clone());
        }
        Ok(())
    }

    fn diff_keys<D: Dialect + ?Sized>(&self, prev: &Self, dialect: &D, plan: &mut Vec<SqlExpr>) {
        let mut visited = BTreeSet::new();

        for key in self.keys().iter() {
            let name = if key.is_primary() {
                dialect.primary_key_name().to_lowercase()
            } else {
                key.name.to_lowercase()
            };

            let Some(prev_key) = prev.key(&name) else {
                trace!(key = %name, "Adding index");
                plan.push(dialect.add_index(key));
                visited.insert(name);
                continue;
            };
            if !key.is_primary() && key.columns_expr() != prev_key.columns_expr() {
                trace!(key = %name, "Recreating index");
                plan.push(dialect.drop_index(key));
                plan.push(dialect.add_index(key));
            }
            visited.insert(name);
        }

        for prev_key in prev.keys().iter() {
            if !visited.contains(&prev_key.name.to_lowercase()) {
                trace!(key = %prev_key.name, "Dropping index");
                plan.push(dialect.drop_index(prev_key));
            }
        }
    }
}
