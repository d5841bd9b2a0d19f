//! Name-indexed, insertion-ordered member collections.
//!
//! Iteration order is what makes diff output reproducible, so every
//! collection here keeps the order members were first added in. Adding a
//! member under an existing name replaces it in place.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::column::Column;
use crate::key::Key;

/// Something stored by name in a [`Members`] collection.
pub trait Member {
    /// The lookup name.
    fn member_name(&self) -> &str;
}

impl Member for Column {
    fn member_name(&self) -> &str {
        &self.name
    }
}

impl Member for Key {
    fn member_name(&self) -> &str {
        &self.name
    }
}

/// Ordered collection of uniquely named members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Members<T> {
    items: IndexMap<String, T>,
}

impl<T> Default for Members<T> {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }
}

impl<T: Member> Members<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `member`, replacing a same-named one without moving it.
    ///
    /// Returns the replaced member, if any.
    pub fn add(&mut self, member: T) -> Option<T> {
        self.items.insert(member.member_name().to_string(), member)
    }

    /// Looks a member up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.get(name)
    }

    /// Removes a member, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.items.shift_remove(name)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    /// Member names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Member> FromIterator<T> for Members<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut members = Self::new();
        for member in iter {
            members.add(member);
        }
        members
    }
}

/// Keys of a table, addressed by lower-cased name.
pub type Keys = Members<Key>;

impl Keys {
    /// Looks a key up ignoring case.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<&Key> {
        self.get(&name.to_lowercase())
    }
}

/// Columns of a table, addressed by column name and by model field name.
///
/// When several columns declare the same field name, the field resolves to
/// the one added last. Removing that column hands the field back to the
/// earliest remaining column that declares it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    members: Members<Column>,
    fields: HashMap<String, String>,
}

impl Columns {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `col`, replacing a same-named one without moving it.
    pub fn add(&mut self, col: Column) -> Option<Column> {
        let field_name = col.field_name().to_string();
        let name = col.name.clone();
        let replaced = self.members.add(col);
        if let Some(old) = &replaced {
            self.unlink_field(old);
        }
        self.fields.insert(field_name, name);
        replaced
    }

    /// Looks a column up by its stored name.
    #[must_use]
    pub fn col(&self, name: &str) -> Option<&Column> {
        self.members.get(name)
    }

    /// Looks a column up by its model field name.
    #[must_use]
    pub fn field(&self, field_name: &str) -> Option<&Column> {
        self.fields
            .get(field_name)
            .and_then(|name| self.members.get(name))
    }

    /// Removes a column.
    pub fn remove(&mut self, name: &str) -> Option<Column> {
        let removed = self.members.remove(name)?;
        self.unlink_field(&removed);
        Some(removed)
    }

    /// Drops the field entry of `col` if it still resolves to `col`,
    /// falling back to another column declaring the same field.
    fn unlink_field(&mut self, col: &Column) {
        let field_name = col.field_name();
        if !self
            .fields
            .get(field_name)
            .is_some_and(|owner| *owner == col.name)
        {
            return;
        }
        self.fields.remove(field_name);
        if let Some(other) = self
            .members
            .iter()
            .find(|other| other.field_name() == field_name)
        {
            self.fields
                .insert(field_name.to_string(), other.name.clone());
        }
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.members.iter()
    }

    /// Column list text, e.g. `id, name`.
    #[must_use]
    pub fn expr(&self) -> String {
        self.members.names().collect::<Vec<_>>().join(", ")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<Column> for Columns {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        let mut cols = Self::new();
        for col in iter {
            cols.add(col);
        }
        cols
    }
}
