//! Column definitions and deprecation metadata.

use serde::{Deserialize, Serialize};

use crate::expr::SqlExpr;
use crate::value::{SqlValue, ToSqlValue};

/// Identifies the table a column or key belongs to.
///
/// Members hold this by value; rebuilding a table under another schema
/// re-points every member instead of mutating shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Table name.
    pub name: String,
    /// Optional schema qualifier.
    pub schema: Option<String>,
}

impl TableRef {
    /// Returns `schema.name`, or just `name` when unqualified.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) if !schema.is_empty() => format!("{schema}.{}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Marks a column as scheduled for removal.
///
/// With a rename target the column is being renamed; without one it is
/// being dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecatedActions {
    /// New name of the column, if it is being renamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename_to: Option<String>,
}

impl DeprecatedActions {
    /// The rename target, ignoring empty names.
    #[must_use]
    pub fn rename_target(&self) -> Option<&str> {
        self.rename_to.as_deref().filter(|name| !name.is_empty())
    }
}

/// A single column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Stored column name.
    pub name: String,
    /// Model field name, used by `#Field` placeholders and field projections.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field_name: String,
    /// Dialect-specific type text. Never compared by the diff engine.
    #[serde(default)]
    pub data_type: String,
    /// Whether the column allows NULL values.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Default value as SQL text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Deprecation marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<DeprecatedActions>,
    #[serde(skip)]
    pub(crate) table: Option<TableRef>,
}

const fn default_nullable() -> bool {
    true
}

impl Column {
    /// Creates a nullable column whose field name equals its column name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            field_name: name.clone(),
            name,
            data_type: String::new(),
            nullable: true,
            default: None,
            comment: None,
            deprecated: None,
            table: None,
        }
    }

    /// Sets the model field name.
    #[must_use]
    pub fn field(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    /// Sets the type text.
    #[must_use]
    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Marks the column for removal.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = Some(DeprecatedActions::default());
        self
    }

    /// Marks the column as renamed to `target`.
    #[must_use]
    pub fn rename_to(mut self, target: impl Into<String>) -> Self {
        self.deprecated = Some(DeprecatedActions {
            rename_to: Some(target.into()),
        });
        self
    }

    /// Returns `true` if the column carries deprecation metadata.
    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    /// The rename target, if any.
    #[must_use]
    pub fn rename_target(&self) -> Option<&str> {
        self.deprecated
            .as_ref()
            .and_then(DeprecatedActions::rename_target)
    }

    /// The model field name, falling back to the column name.
    #[must_use]
    pub const fn field_name(&self) -> &str {
        if self.field_name.is_empty() {
            self.name.as_str()
        } else {
            self.field_name.as_str()
        }
    }

    /// The owning table, once attached.
    #[must_use]
    pub const fn table(&self) -> Option<&TableRef> {
        self.table.as_ref()
    }

    /// Returns a copy owned by `table`.
    #[must_use]
    pub fn on(&self, table: &TableRef) -> Self {
        let mut col = self.clone();
        if col.field_name.is_empty() {
            col.field_name.clone_from(&col.name);
        }
        col.table = Some(table.clone());
        col
    }

    /// Builds an assignment of `value` to this column.
    #[must_use]
    pub fn value_by(&self, value: impl ToSqlValue) -> Assignment {
        Assignment {
            column: self.clone(),
            value: value.to_sql_value(),
        }
    }
}

/// `column = value`, as used by update statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Target column.
    pub column: Column,
    /// Assigned value.
    pub value: SqlValue,
}

impl Assignment {
    /// Renders `name = ?` with the value as its argument.
    #[must_use]
    pub fn expr(&self) -> SqlExpr {
        SqlExpr::with_args(format!("{} = ?", self.column.name), vec![self.value.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let col = Column::new("user_name").field("UserName").data_type("TEXT");
        assert_eq!(col.field_name(), "UserName");
        assert!(col.nullable);
        assert!(!col.is_deprecated());
        assert!(col.table().is_none());
    }

    #[test]
    fn empty_rename_target_means_drop() {
        let col = Column::new("legacy").rename_to("");
        assert!(col.is_deprecated());
        assert_eq!(col.rename_target(), None);

        let col = Column::new("old").rename_to("new");
        assert_eq!(col.rename_target(), Some("new"));
    }

    #[test]
    fn on_sets_back_reference() {
        let table = TableRef {
            name: String::from("users"),
            schema: Some(String::from("app")),
        };
        let col = Column::new("id").on(&table);
        assert_eq!(col.table().map(TableRef::qualified_name).as_deref(), Some("app.users"));
    }

    #[test]
    fn assignment_expr() {
        let assignment = Column::new("name").value_by("bob");
        let expr = assignment.expr();
        assert_eq!(expr.query(), "name = ?");
        assert_eq!(expr.args(), &[SqlValue::Text(String::from("bob"))]);
    }

    #[test]
    fn deserialize_fills_defaults() {
        let col: Column = serde_json::from_str(r#"{"name":"email"}"#).unwrap();
        assert_eq!(col.field_name(), "email");
        assert!(col.nullable);
        assert_eq!(col.deprecated, None);
    }
}
