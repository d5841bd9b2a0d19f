//! The SQL synthesis capability consumed by the diff engine.
//!
//! A dialect turns one schema decision into one [`SqlExpr`]. Whether that
//! expression does anything is up to the dialect: returning
//! [`SqlExpr::empty`] for an operation the database cannot or need not
//! perform is expected, and executors skip empty expressions.

use crate::column::Column;
use crate::expr::SqlExpr;
use crate::key::Key;
use crate::table::Table;

/// Database-specific SQL generation for schema operations.
pub trait Dialect {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Name under which primary keys are matched across schema versions.
    fn primary_key_name(&self) -> &str;

    /// Adds `col` to its table.
    fn add_column(&self, col: &Column) -> SqlExpr;

    /// Drops `col` from its table.
    fn drop_column(&self, col: &Column) -> SqlExpr;

    /// Brings an existing column in line with `col`.
    fn modify_column(&self, col: &Column) -> SqlExpr;

    /// Renames `col` to the name of `target`.
    fn rename_column(&self, col: &Column, target: &Column) -> SqlExpr;

    /// Creates the index or constraint `key`.
    fn add_index(&self, key: &Key) -> SqlExpr;

    /// Drops the index or constraint `key`.
    fn drop_index(&self, key: &Key) -> SqlExpr;

    /// Creates `table` with its keys if it does not exist yet.
    fn create_table_if_not_exists(&self, table: &Table) -> Vec<SqlExpr>;

    /// Drops `table`.
    fn drop_table(&self, table: &Table) -> SqlExpr;
}
