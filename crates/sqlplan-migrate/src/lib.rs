//! Applying sqlplan migration plans to a database.
//!
//! `sqlplan-migrate` takes the operations computed by `sqlplan-core` and
//! runs them:
//! - [`SqliteDialect`](dialect::SqliteDialect) renders the operations as SQLite DDL
//! - [`PlanExecutor`](executor::PlanExecutor) runs a plan in one transaction,
//!   rolling back on the first failed step
//! - [`schema_file`] loads and stores table registries as JSON
//!
//! # Example
//!
//! ```rust,ignore
//! use sqlplan_migrate::prelude::*;
//!
//! let pool = connect("sqlite::memory:", 1).await?;
//! let executor = PlanExecutor::new(pool, ExecutorConfig::new());
//!
//! let previous = load_tables("schema.previous.json")?;
//! let current = load_tables("schema.json")?;
//! let report = executor
//!     .migrate(&current, &previous, &SqliteDialect::new())
//!     .await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Print the plan between two schema files
//! sqlplan plan --current schema.json --previous schema.previous.json
//!
//! # Apply it
//! sqlplan --database sqlite:app.db apply --current schema.json --previous schema.previous.json
//! ```

pub mod config;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod placeholder;
pub mod schema_file;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::ExecutorConfig;
    pub use crate::connection::{connect, mask_password};
    pub use crate::dialect::SqliteDialect;
    pub use crate::error::{MigrateError, Result};
    pub use crate::executor::{ExecutionReport, PlanExecutor};
    pub use crate::placeholder::{interpolate_params, translate_placeholders};
    pub use crate::schema_file::{load_tables, write_tables};
    pub use sqlplan_core::{plan_migration, Dialect, SqlExpr, Table, Tables};
}
