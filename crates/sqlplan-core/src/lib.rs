//! # sqlplan-core
//!
//! A relational schema description layer and a migration diff engine.
//!
//! Tables are described symbolically as ordered collections of columns and
//! keys. Given the desired description of a table and the description of
//! what currently exists, [`Table::diff`] computes the ordered list of DDL
//! operations that migrates one into the other. The SQL text of every
//! operation comes from a pluggable [`Dialect`].
//!
//! ```
//! use sqlplan_core::{Column, Key, Table, TableMember};
//!
//! let users = Table::new(
//!     "t_user",
//!     vec![
//!         TableMember::from(Column::new("f_id").field("ID").data_type("BIGINT").not_null()),
//!         Column::new("f_name").field("Name").data_type("TEXT").into(),
//!         Column::new("f_nick").deprecated().into(),
//!         Key::primary(["f_id"]).into(),
//!         Key::unique_index("i_name", ["f_name"]).into(),
//!     ],
//! )
//! .with_schema("app");
//!
//! assert_eq!(users.expr().query(), "app.t_user");
//! assert_eq!(users.field("Name").map(|c| c.name.as_str()), Some("f_name"));
//! ```
//!
//! Plans are deterministic: the same inputs always produce the same
//! operations in the same order, because every collection iterates in
//! declaration order.

pub mod collection;
pub mod column;
pub mod dialect;
mod diff;
pub mod error;
pub mod expr;
pub mod key;
pub mod plan;
pub mod table;
pub mod tables;
pub mod value;

#[cfg(test)]
mod test_support;

pub use collection::{Columns, Keys, Member, Members};
pub use column::{Assignment, Column, DeprecatedActions, TableRef};
pub use dialect::Dialect;
pub use error::{Result, SchemaError};
pub use expr::SqlExpr;
pub use key::{Key, PRIMARY_KEY_NAME};
pub use plan::plan_migration;
pub use table::{Table, TableMember};
pub use tables::Tables;
pub use value::{FieldValues, SqlValue, ToSqlValue};
