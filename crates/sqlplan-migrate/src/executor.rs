//! Plan executor.
//!
//! This module applies a migration plan to a database inside a single
//! transaction, logging every statement.

use std::time::Instant;

use sqlplan_core::{plan_migration, Dialect, SqlExpr, SqlValue, Tables};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool};
use tracing::{debug, error, info, warn};

use crate::config::ExecutorConfig;
use crate::error::{MigrateError, Result};
use crate::placeholder::{interpolate_params, translate_placeholders};

/// What an execution did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Statements executed (or collected, in dry-run mode).
    pub executed: usize,
    /// Empty plan entries that were skipped.
    pub skipped: usize,
    /// The statements, as sent to the database.
    pub statements: Vec<String>,
}

/// Executes migration plans against a database.
pub struct PlanExecutor {
    pool: SqlitePool,
    config: ExecutorConfig,
}

impl PlanExecutor {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(pool: SqlitePool, config: ExecutorConfig) -> Self {
        Self { pool, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Returns the pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Plans the migration from `previous` to `current` and executes it.
    ///
    /// # Errors
    ///
    /// Fails if planning fails or if any step fails to execute.
    pub async fn migrate<D: Dialect + Sync + ?Sized>(
        &self,
        current: &Tables,
        previous: &Tables,
        dialect: &D,
    ) -> Result<ExecutionReport> {
        let plan = plan_migration(current, previous, dialect)?;
        self.execute(&plan).await
    }

    /// Executes `plan` in order inside one transaction.
    ///
    /// Empty expressions are skipped. On the first failure the transaction
    /// is rolled back and the remaining steps are not run.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::Execution`] for a failed step and
    /// [`MigrateError::Database`] if the transaction cannot be opened or
    /// committed.
    pub async fn execute(&self, plan: &[SqlExpr]) -> Result<ExecutionReport> {
        if self.config.dry_run {
            return Ok(self.dry_run(plan));
        }

        let mut report = ExecutionReport::default();

        debug!("=========== Beginning Transaction ===========");
        let mut tx = self.pool.begin().await.inspect_err(|err| {
            error!(error = %err, "Failed to begin transaction");
        })?;

        for (index, expr) in plan.iter().enumerate() {
            if expr.is_empty() {
                report.skipped += 1;
                continue;
            }

            let sql = self.render(expr);
            let started = Instant::now();
            let query = expr
                .args()
                .iter()
                .fold(sqlx::query(&sql), |query, value| bind_value(query, value));

            let result = match query.execute(&mut *tx).await {
                Ok(result) => result,
                Err(err) => {
                    let failure =
                        execution_failed(index, interpolate_params(&sql, expr.args()), err);
                    match tx.rollback().await {
                        Ok(()) => debug!("=========== Rollback Transaction ==========="),
                        Err(rollback_err) => {
                            debug!(error = %rollback_err, "Failed to rollback transaction");
                        }
                    }
                    return Err(failure);
                }
            };
            debug!(
                cost = ?started.elapsed(),
                rows = result.rows_affected(),
                "{}",
                interpolate_params(&sql, expr.args())
            );
            report.executed += 1;
            report.statements.push(sql);
        }

        tx.commit().await.inspect_err(|err| {
            debug!(error = %err, "Failed to commit transaction");
        })?;
        debug!("=========== Committed Transaction ===========");

        info!(
            executed = report.executed,
            skipped = report.skipped,
            "Migration plan applied"
        );
        Ok(report)
    }

    fn dry_run(&self, plan: &[SqlExpr]) -> ExecutionReport {
        let mut report = ExecutionReport::default();
        for expr in plan {
            if expr.is_empty() {
                report.skipped += 1;
                continue;
            }
            let sql = self.render(expr);
            info!("{}", interpolate_params(&sql, expr.args()));
            report.executed += 1;
            report.statements.push(sql);
        }
        report
    }

    fn render(&self, expr: &SqlExpr) -> String {
        if self.config.numbered_placeholders {
            translate_placeholders(expr.query())
        } else {
            expr.query().to_string()
        }
    }
}

/// Logs a failed step, at `warn` for unique violations.
fn execution_failed(index: usize, query: String, source: sqlx::Error) -> MigrateError {
    if is_unique_violation(&source) {
        warn!(error = %source, "failed exec: {query}");
    } else {
        error!(error = %source, "failed exec: {query}");
    }
    MigrateError::Execution {
        index,
        query,
        source,
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(None::<i64>),
        SqlValue::Bool(b) => query.bind(*b),
        SqlValue::Int(n) => query.bind(*n),
        SqlValue::Float(f) => query.bind(*f),
        SqlValue::Text(s) => query.bind(s.as_str()),
        SqlValue::Blob(b) => query.bind(b.as_slice()),
    }
}

/// Returns `true` for a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory SQLite pool")
    }

    async fn table_exists(pool: &SqlitePool, name: &str) -> bool {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name=?")
                .bind(name)
                .fetch_optional(pool)
                .await
                .unwrap();
        row.is_some()
    }

    #[tokio::test]
    async fn executes_plan_and_skips_empty() {
        let pool = create_test_pool().await;
        let executor = PlanExecutor::new(pool.clone(), ExecutorConfig::new());

        let report = executor
            .execute(&[
                SqlExpr::new("CREATE TABLE t (id INTEGER, name TEXT)"),
                SqlExpr::empty(),
                SqlExpr::with_args(
                    "INSERT INTO t (id, name) VALUES (?, ?)",
                    vec![SqlValue::Int(1), SqlValue::Text(String::from("a"))],
                ),
            ])
            .await
            .unwrap();

        assert_eq!(report.executed, 2);
        assert_eq!(report.skipped, 1);
        let row: (i64, String) = sqlx::query_as("SELECT id, name FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row, (1, String::from("a")));
    }

    #[tokio::test]
    async fn failure_rolls_back_and_stops() {
        let pool = create_test_pool().await;
        let executor = PlanExecutor::new(pool.clone(), ExecutorConfig::new());

        let err = executor
            .execute(&[
                SqlExpr::new("CREATE TABLE t (id INTEGER UNIQUE)"),
                SqlExpr::with_args("INSERT INTO t (id) VALUES (?)", vec![SqlValue::Int(1)]),
                SqlExpr::with_args("INSERT INTO t (id) VALUES (?)", vec![SqlValue::Int(1)]),
                SqlExpr::new("CREATE TABLE never (id INTEGER)"),
            ])
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        match err {
            MigrateError::Execution { index, query, .. } => {
                assert_eq!(index, 2);
                assert_eq!(query, "INSERT INTO t (id) VALUES (1)");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!table_exists(&pool, "t").await);
        assert!(!table_exists(&pool, "never").await);
    }

    #[tokio::test]
    async fn dry_run_executes_nothing() {
        let pool = create_test_pool().await;
        let executor = PlanExecutor::new(
            pool.clone(),
            ExecutorConfig::new().dry_run(true).numbered_placeholders(true),
        );

        let report = executor
            .execute(&[
                SqlExpr::new("CREATE TABLE t (id INTEGER)"),
                SqlExpr::with_args("INSERT INTO t (id) VALUES (?)", vec![SqlValue::Int(1)]),
            ])
            .await
            .unwrap();

        assert_eq!(
            report.statements,
            vec!["CREATE TABLE t (id INTEGER)", "INSERT INTO t (id) VALUES ($1)"]
        );
        assert!(!table_exists(&pool, "t").await);
    }
}
