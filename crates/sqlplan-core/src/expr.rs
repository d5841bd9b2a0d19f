//! Renderable SQL units.

use std::fmt;

use crate::value::SqlValue;

/// A rendered SQL statement or fragment with its positional arguments.
///
/// This is the unit a [`Dialect`](crate::Dialect) produces for every
/// schema operation and the unit a migration plan is made of. The diff
/// engine never inspects it; it only sequences it. An empty expression is
/// a valid dialect answer meaning "nothing to do".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlExpr {
    query: String,
    args: Vec<SqlValue>,
}

impl SqlExpr {
    /// Creates an expression without arguments.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            args: Vec::new(),
        }
    }

    /// Creates an expression with positional arguments.
    #[must_use]
    pub fn with_args(query: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            query: query.into(),
            args,
        }
    }

    /// The no-op expression.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            query: String::new(),
            args: Vec::new(),
        }
    }

    /// Returns `true` if there is nothing to execute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// The query text, with `?` placeholders.
    #[must_use]
    pub const fn query(&self) -> &str {
        self.query.as_str()
    }

    /// The positional arguments, in placeholder order.
    #[must_use]
    pub const fn args(&self) -> &[SqlValue] {
        self.args.as_slice()
    }
}

impl fmt::Display for SqlExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}
