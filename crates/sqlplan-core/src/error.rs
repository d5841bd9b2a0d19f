//! Error types for schema planning.

/// Errors raised while planning a migration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A column is renamed to a name the current schema does not declare.
    #[error("Column '{column}' of table '{table}' is renamed to '{target}', which is not declared")]
    UndeclaredRenameTarget {
        /// Table being diffed.
        table: String,
        /// The deprecated column.
        column: String,
        /// The missing rename target.
        target: String,
    },
}

/// Result type for schema planning.
pub type Result<T> = std::result::Result<T, SchemaError>;
