//! Column types, column definitions and typed column handles.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::name::Name;

use super::property::{ColumnProperties, PropertyKind};

/// The database type of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// Fixed-point number.
    Decimal {
        /// Total number of digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: u8,
    },
    /// Variable-length string with a maximum length.
    Varchar(u32),
    /// Single character.
    Char,
    /// Unbounded text.
    Text,
    /// Boolean.
    Bool,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// Time of day.
    Time,
    /// UUID.
    Uuid,
    /// Fixed-size binary string.
    Binary(u32),
    /// Binary large object.
    Blob,
    /// Enumeration stored as its ordinal.
    Enumeration,
    /// Column typed after the column it references.
    Reference(Box<ColumnType>),
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("INT"),
            Self::Long => f.write_str("LONG"),
            Self::Decimal { precision, scale } => write!(f, "DECIMAL({precision}, {scale})"),
            Self::Varchar(len) => write!(f, "VARCHAR({len})"),
            Self::Char => f.write_str("CHAR"),
            Self::Text => f.write_str("TEXT"),
            Self::Bool => f.write_str("BOOL"),
            Self::Date => f.write_str("DATE"),
            Self::DateTime => f.write_str("DATETIME"),
            Self::Time => f.write_str("TIME"),
            Self::Uuid => f.write_str("UUID"),
            Self::Binary(len) => write!(f, "BINARY({len})"),
            Self::Blob => f.write_str("BLOB"),
            Self::Enumeration => f.write_str("ENUM"),
            Self::Reference(inner) => write!(f, "&{inner}"),
        }
    }
}

/// The declaration of a column, owned by its table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    name: Name,
    column_type: ColumnType,
    properties: ColumnProperties,
}

impl ColumnDefinition {
    pub(crate) const fn new(name: Name, column_type: ColumnType, properties: ColumnProperties) -> Self {
        Self {
            name,
            column_type,
            properties,
        }
    }

    /// Returns the qualified name, `table.column`.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the unqualified column identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.name.id()
    }

    /// Returns the name of the owning table.
    #[must_use]
    pub fn compound(&self) -> Option<&Name> {
        self.name.parent()
    }

    /// Returns the column type.
    #[must_use]
    pub const fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    /// Returns the declared properties.
    #[must_use]
    pub const fn properties(&self) -> &ColumnProperties {
        &self.properties
    }

    /// Returns whether the column accepts NULL.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.properties.has(PropertyKind::Nullable)
    }

    /// Returns whether the column value is generated by the database.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.properties.has(PropertyKind::AutoIncrement)
    }

    /// Returns whether the column is part of the primary key.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.properties.has(PropertyKind::PrimaryKey)
    }
}

/// A typed handle to a column declared on a [`Table`](super::Table).
///
/// `T` is the Rust value type of the column; it only drives compile-time
/// expression typing.
pub struct Column<T> {
    definition: Arc<ColumnDefinition>,
    _type: PhantomData<fn() -> T>,
}

impl<T> Column<T> {
    pub(crate) const fn new(definition: Arc<ColumnDefinition>) -> Self {
        Self {
            definition,
            _type: PhantomData,
        }
    }

    /// Returns the column declaration.
    #[must_use]
    pub fn definition(&self) -> &ColumnDefinition {
        &self.definition
    }

    /// Returns the qualified name, `table.column`.
    #[must_use]
    pub fn name(&self) -> &Name {
        self.definition.name()
    }

    /// Returns the unqualified column identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.definition.identifier()
    }

    /// Returns the column type.
    #[must_use]
    pub fn column_type(&self) -> &ColumnType {
        self.definition.column_type()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.definition))
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.definition.name, self.definition.column_type)
    }
}
