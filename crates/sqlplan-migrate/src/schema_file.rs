//! JSON schema files.
//!
//! A schema file is a JSON array of tables, each in the serialized form of
//! [`Table`]. Registration order follows array order.

use std::fs;
use std::path::Path;

use sqlplan_core::{Table, Tables};
use tracing::debug;

use crate::error::Result;

/// Reads a registry from a schema file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a valid schema file.
pub fn load_tables(path: impl AsRef<Path>) -> Result<Tables> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let tables: Vec<Table> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), tables = tables.len(), "Loaded schema file");
    Ok(tables.into_iter().collect())
}

/// Writes a registry to a schema file.
///
/// # Errors
///
/// Fails if the file cannot be written.
pub fn write_tables(path: impl AsRef<Path>, tables: &Tables) -> Result<()> {
    let tables: Vec<&Table> = tables.iter().collect();
    fs::write(path, serde_json::to_string_pretty(&tables)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MigrateError;
    use sqlplan_core::{Column, Key, TableMember};

    #[test]
    fn round_trips_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");

        let tables: Tables = [
            Table::new(
                "users",
                vec![
                    TableMember::from(Column::new("id").data_type("INTEGER")),
                    Key::primary(["id"]).into(),
                ],
            ),
            Table::new("orders", [Column::new("id")]).model("Order"),
        ]
        .into_iter()
        .collect();

        write_tables(&path, &tables).unwrap();
        let loaded = load_tables(path).unwrap();

        assert_eq!(loaded.table_names(), vec!["users", "orders"]);
        assert_eq!(loaded.model("Order").map(|t| t.name.as_str()), Some("orders"));
        assert_eq!(loaded.table("users"), tables.table("users"));
    }

    #[test]
    fn rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_tables(path),
            Err(MigrateError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_tables(dir.path().join("nope.json")),
            Err(MigrateError::Io(_))
        ));
    }
}
