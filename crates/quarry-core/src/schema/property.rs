//! Column properties and the per-column property registry.

use std::fmt;

use crate::error::{CompileError, Result};
use crate::name::Name;
use crate::value::SqlValue;

/// The kind of a [`ColumnProperty`], used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKind {
    /// See [`ColumnProperty::Nullable`].
    Nullable,
    /// See [`ColumnProperty::AutoIncrement`].
    AutoIncrement,
    /// See [`ColumnProperty::PrimaryKey`].
    PrimaryKey,
    /// See [`ColumnProperty::Default`].
    Default,
    /// See [`ColumnProperty::References`].
    References,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nullable => "NULLABLE",
            Self::AutoIncrement => "AUTOINCREMENT",
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Default => "DEFAULT",
            Self::References => "REFERENCES",
        })
    }
}

/// An additional property of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnProperty {
    /// The column accepts NULL.
    Nullable,
    /// The database generates the column value.
    AutoIncrement,
    /// The column is part of the primary key.
    PrimaryKey,
    /// The value used when an insert omits the column.
    Default(SqlValue),
    /// The column references another column.
    References(Name),
}

impl ColumnProperty {
    /// Returns the registry key of this property.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Nullable => PropertyKind::Nullable,
            Self::AutoIncrement => PropertyKind::AutoIncrement,
            Self::PrimaryKey => PropertyKind::PrimaryKey,
            Self::Default(_) => PropertyKind::Default,
            Self::References(_) => PropertyKind::References,
        }
    }
}

/// Ordered set of column properties holding at most one property per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnProperties {
    entries: Vec<ColumnProperty>,
}

impl ColumnProperties {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Registers a property for `column`.
    ///
    /// Fails with [`CompileError::AmbiguousProperty`] when a property of the
    /// same kind is already present.
    pub fn insert(&mut self, column: &Name, property: ColumnProperty) -> Result<()> {
        let kind = property.kind();
        if self.has(kind) {
            return Err(CompileError::AmbiguousProperty {
                column: column.to_string(),
                kind,
            });
        }
        self.entries.push(property);
        Ok(())
    }

    /// Returns the property of the given kind.
    #[must_use]
    pub fn get(&self, kind: PropertyKind) -> Option<&ColumnProperty> {
        self.entries.iter().find(|p| p.kind() == kind)
    }

    /// Returns whether a property of the given kind is present.
    #[must_use]
    pub fn has(&self, kind: PropertyKind) -> bool {
        self.get(kind).is_some()
    }

    /// Returns the default value, if declared.
    #[must_use]
    pub fn default_value(&self) -> Option<&SqlValue> {
        match self.get(PropertyKind::Default) {
            Some(ColumnProperty::Default(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the referenced column, if declared.
    #[must_use]
    pub fn references(&self) -> Option<&Name> {
        match self.get(PropertyKind::References) {
            Some(ColumnProperty::References(name)) => Some(name),
            _ => None,
        }
    }

    /// Iterates over the properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnProperty> {
        self.entries.iter()
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no property is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
