//! Registry of table definitions.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::table::Table;

/// Ordered registry of tables, addressable by table name and model name.
///
/// Registering a name again replaces the old entry and moves it to the
/// end of iteration order. The registry is meant to be filled once at
/// startup and read afterwards; callers that register concurrently must
/// serialize `add` and `remove` themselves.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    entries: IndexMap<String, Table>,
    models: HashMap<String, String>,
}

impl Tables {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tables`, replacing same-named entries.
    pub fn add<I: IntoIterator<Item = Table>>(&mut self, tables: I) {
        for table in tables {
            if self.remove(&table.name).is_some() {
                debug!(table = %table.name, "Replacing registered table");
            }
            if let Some(model) = &table.model_name {
                self.models.insert(model.clone(), table.name.clone());
            }
            self.entries.insert(table.name.clone(), table);
        }
    }

    /// Looks a table up by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.entries.get(name)
    }

    /// Looks a table up by the name of the model it was declared from.
    #[must_use]
    pub fn model(&self, model_name: &str) -> Option<&Table> {
        self.models
            .get(model_name)
            .and_then(|name| self.entries.get(name))
    }

    /// Unregisters a table, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Table> {
        let table = self.entries.shift_remove(name)?;
        self.models.retain(|_, table_name| *table_name != name);
        Some(table)
    }

    /// Iterates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.entries.values()
    }

    /// Table names in registration order.
    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Table> for Tables {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        let mut tables = Self::new();
        tables.add(iter);
        tables
    }
}
