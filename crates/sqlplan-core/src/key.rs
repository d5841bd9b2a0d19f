//! Index and constraint definitions.

use serde::{Deserialize, Serialize};

use crate::column::TableRef;

/// Declared name of a primary key. Diffing addresses primary keys by the
/// dialect's canonical name instead.
pub const PRIMARY_KEY_NAME: &str = "primary";

/// An index or constraint over an ordered list of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Key name. Stored lower-cased once attached to a table.
    pub name: String,
    /// Member column names, in index order.
    pub columns: Vec<String>,
    /// Whether this is a UNIQUE index.
    #[serde(default)]
    pub is_unique: bool,
    /// Whether this is the table's primary key.
    #[serde(default)]
    pub is_primary: bool,
    /// Index method (`BTREE`, `GIN`, ...), if not the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip)]
    pub(crate) table: Option<TableRef>,
}

impl Key {
    fn with_columns<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            is_unique: false,
            is_primary: false,
            method: None,
            table: None,
        }
    }

    /// A plain secondary index.
    #[must_use]
    pub fn index<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_columns(name, columns)
    }

    /// A unique secondary index.
    #[must_use]
    pub fn unique_index<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut key = Self::with_columns(name, columns);
        key.is_unique = true;
        key
    }

    /// The primary key.
    #[must_use]
    pub fn primary<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut key = Self::with_columns(PRIMARY_KEY_NAME, columns);
        key.is_unique = true;
        key.is_primary = true;
        key
    }

    /// Sets the index method.
    #[must_use]
    pub fn using(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Returns `true` for the primary key.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Member columns as list text, e.g. `a, b`.
    #[must_use]
    pub fn columns_expr(&self) -> String {
        self.columns.join(", ")
    }

    /// The owning table, once attached.
    #[must_use]
    pub const fn table(&self) -> Option<&TableRef> {
        self.table.as_ref()
    }

    /// Returns a copy owned by `table`, with its name lower-cased.
    #[must_use]
    pub fn on(&self, table: &TableRef) -> Self {
        let mut key = self.clone();
        key.name = key.name.to_lowercase();
        key.table = Some(table.clone());
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_key_uses_fixed_name() {
        let key = Key::primary(["id"]);
        assert_eq!(key.name, PRIMARY_KEY_NAME);
        assert!(key.is_primary());
        assert!(key.is_unique);
    }

    #[test]
    fn columns_expr_joins_in_order() {
        let key = Key::unique_index("i_name", ["last", "first"]);
        assert_eq!(key.columns_expr(), "last, first");
    }

    #[test]
    fn on_lowercases_name() {
        let table = TableRef {
            name: String::from("users"),
            schema: None,
        };
        let key = Key::index("I_Email", ["email"]).on(&table);
        assert_eq!(key.name, "i_email");
        assert_eq!(key.table(), Some(&table));
    }
}
