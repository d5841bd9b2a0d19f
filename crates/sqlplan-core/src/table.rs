//! The table aggregate.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::collection::{Columns, Keys};
use crate::column::{Assignment, Column, TableRef};
use crate::expr::SqlExpr;
use crate::key::Key;
use crate::value::{FieldValues, SqlValue};

/// `#FieldName` placeholders in [`Table::ex`] templates.
static FIELD_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("#[A-Z][A-Za-z0-9_]+").expect("valid placeholder pattern"));

/// A member passed to [`Table::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMember {
    /// A column definition.
    Column(Column),
    /// An index or constraint definition.
    Key(Key),
}

impl TableMember {
    /// Attaches the member to `table`, re-owning it.
    pub fn attach_to(self, table: &mut Table) {
        match self {
            Self::Column(col) => table.add_col(col),
            Self::Key(key) => table.add_key(key),
        }
    }

    const fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

impl From<Column> for TableMember {
    fn from(col: Column) -> Self {
        Self::Column(col)
    }
}

impl From<Key> for TableMember {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

/// A table description: name, optional schema, columns and keys.
///
/// Tables have value semantics. Every column and key holds a
/// [`TableRef`] to its owner, and operations that change the owner's
/// identity build a new table rather than touching existing members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TableDef", into = "TableDef")]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Documentation lines.
    pub description: Vec<String>,
    /// Optional schema qualifier.
    pub schema: Option<String>,
    /// Name of the model the table was declared from, for registry lookup.
    pub model_name: Option<String>,
    columns: Columns,
    keys: Keys,
}

impl Table {
    /// Builds a table from `members`. Columns are attached before keys.
    #[must_use]
    pub fn new<I>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TableMember>,
    {
        let mut table = Self {
            name: name.into(),
            ..Self::default()
        };
        let (cols, keys): (Vec<TableMember>, Vec<TableMember>) = members
            .into_iter()
            .map(Into::into)
            .partition(TableMember::is_column);
        for member in cols.into_iter().chain(keys) {
            member.attach_to(&mut table);
        }
        table
    }

    /// Sets the model name.
    #[must_use]
    pub fn model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Adds a documentation line.
    #[must_use]
    pub fn describe(mut self, line: impl Into<String>) -> Self {
        self.description.push(line.into());
        self
    }

    /// Returns a copy qualified by `schema`, with every member re-owned by
    /// the copy. `self` is left untouched.
    #[must_use]
    pub fn with_schema(&self, schema: impl Into<String>) -> Self {
        let mut table = Self {
            name: self.name.clone(),
            description: self.description.clone(),
            schema: Some(schema.into()),
            model_name: self.model_name.clone(),
            columns: Columns::new(),
            keys: Keys::new(),
        };
        let owner = table.table_ref();
        table.columns = self.columns.iter().map(|col| col.on(&owner)).collect();
        table.keys = self.keys.iter().map(|key| key.on(&owner)).collect();
        table
    }

    /// The reference members hold to this table.
    #[must_use]
    pub fn table_ref(&self) -> TableRef {
        TableRef {
            name: self.name.clone(),
            schema: self.schema.clone(),
        }
    }

    /// The table name, schema-qualified when a schema is set.
    #[must_use]
    pub fn expr(&self) -> SqlExpr {
        SqlExpr::new(self.table_ref().qualified_name())
    }

    /// Adds or replaces a column.
    pub fn add_col(&mut self, col: Column) {
        let owner = self.table_ref();
        self.columns.add(col.on(&owner));
    }

    /// Adds or replaces a key.
    pub fn add_key(&mut self, key: Key) {
        let owner = self.table_ref();
        self.keys.add(key.on(&owner));
    }

    /// The columns, in declaration order.
    #[must_use]
    pub const fn columns(&self) -> &Columns {
        &self.columns
    }

    /// The keys, in declaration order.
    #[must_use]
    pub const fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Column by stored name.
    #[must_use]
    pub fn col(&self, name: &str) -> Option<&Column> {
        self.columns.col(name)
    }

    /// Column by model field name.
    #[must_use]
    pub fn field(&self, field_name: &str) -> Option<&Column> {
        self.columns.field(field_name)
    }

    /// Key by name, ignoring case.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<&Key> {
        self.keys.key(name)
    }

    /// The primary key, if declared.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Key> {
        self.keys.iter().find(|key| key.is_primary())
    }

    /// Builds an expression from a template, replacing each `#FieldName`
    /// with the stored name of the column declared for that field.
    ///
    /// Placeholders without a matching column are left as written.
    ///
    /// ```
    /// use sqlplan_core::{Column, SqlValue, Table};
    ///
    /// let users = Table::new("t_user", [Column::new("f_name").field("Name")]);
    /// let expr = users.ex("#Name = ? AND #Unknown", vec![SqlValue::from("bob")]);
    /// assert_eq!(expr.query(), "f_name = ? AND #Unknown");
    /// ```
    #[must_use]
    pub fn ex(&self, template: &str, args: Vec<SqlValue>) -> SqlExpr {
        let query = FIELD_PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
            let placeholder = &caps[0];
            self.field(&placeholder[1..])
                .map_or_else(|| placeholder.to_string(), |col| col.name.clone())
        });
        SqlExpr::with_args(query, args)
    }

    /// Projects `values` onto the declared columns.
    ///
    /// Field names are visited in lexicographic order; fields without a
    /// column are skipped. Returns the matched columns and their values in
    /// the same order.
    #[must_use]
    pub fn columns_and_values_by_field_values(
        &self,
        values: &FieldValues,
    ) -> (Columns, Vec<SqlValue>) {
        let mut columns = Columns::new();
        let mut args = Vec::new();
        for (field_name, value) in values {
            if let Some(col) = self.field(field_name) {
                columns.add(col.clone());
                args.push(value.clone());
            }
        }
        (columns, args)
    }

    /// Projects `values` onto the declared columns as assignments.
    ///
    /// Order follows the iteration order of `values`.
    #[must_use]
    pub fn assignments_by_field_values(&self, values: &FieldValues) -> Vec<Assignment> {
        values
            .iter()
            .filter_map(|(field_name, value)| {
                self.field(field_name).map(|col| col.value_by(value.clone()))
            })
            .collect()
    }
}

/// Serialized form of a [`Table`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableDef {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    description: Vec<String>,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    keys: Vec<Key>,
}

impl From<TableDef> for Table {
    fn from(def: TableDef) -> Self {
        let mut table = Self {
            name: def.name,
            description: def.description,
            schema: def.schema,
            model_name: def.model,
            ..Self::default()
        };
        for col in def.columns {
            table.add_col(col);
        }
        for key in def.keys {
            table.add_key(key);
        }
        table
    }
}

impl From<Table> for TableDef {
    fn from(table: Table) -> Self {
        Self {
            columns: table.columns.iter().cloned().collect(),
            keys: table.keys.iter().cloned().collect(),
            name: table.name,
            schema: table.schema,
            model: table.model_name,
            description: table.description,
        }
    }
}
