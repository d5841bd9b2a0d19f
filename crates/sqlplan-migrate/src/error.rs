//! Error types for plan execution.

use sqlplan_core::SchemaError;

/// Errors that can occur while planning or applying a migration.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// The schemas could not be diffed.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Database error outside of a plan step (connecting, transactions).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A plan step failed; the remaining steps were not run.
    #[error("Migration step {index} failed: {query}: {source}")]
    Execution {
        /// Position of the failed step in the plan.
        index: usize,
        /// The statement, with arguments inlined.
        query: String,
        /// The driver error.
        source: sqlx::Error,
    },

    /// IO error (reading/writing schema files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MigrateError {
    /// Returns `true` if the failure is a unique constraint violation.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Execution { source, .. } | Self::Database(source) => {
                crate::executor::is_unique_violation(source)
            }
            _ => false,
        }
    }
}

/// Result type for plan execution.
pub type Result<T> = std::result::Result<T, MigrateError>;
