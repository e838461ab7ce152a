//! Qualified SQL names.

use std::fmt;

/// A possibly qualified identifier naming a table, column or alias.
///
/// Names are compared structurally: `Cities.id` equals `Cities.id` no matter
/// where either value was built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Name {
    /// A bare identifier.
    Identifier(String),
    /// An identifier scoped by a parent name, such as `table.column`.
    Qualified {
        /// The enclosing name.
        parent: Box<Name>,
        /// The final identifier.
        identifier: String,
    },
}

impl Name {
    /// Creates a bare identifier.
    #[must_use]
    pub fn identifier(id: impl Into<String>) -> Self {
        Self::Identifier(id.into())
    }

    /// Creates `parent.identifier`.
    #[must_use]
    pub fn qualified(parent: Self, identifier: impl Into<String>) -> Self {
        Self::Qualified {
            parent: Box::new(parent),
            identifier: identifier.into(),
        }
    }

    /// Returns the last identifier of the name.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Identifier(id) => id,
            Self::Qualified { identifier, .. } => identifier,
        }
    }

    /// Returns the parent name, if qualified.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        match self {
            Self::Identifier(_) => None,
            Self::Qualified { parent, .. } => Some(parent),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => f.write_str(id),
            Self::Qualified { parent, identifier } => write!(f, "{parent}.{identifier}"),
        }
    }
}

impl From<&str> for Name {
    fn from(id: &str) -> Self {
        Self::identifier(id)
    }
}

impl From<String> for Name {
    fn from(id: String) -> Self {
        Self::Identifier(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_display() {
        let name = Name::qualified(Name::identifier("Cities"), "id");
        assert_eq!(name.to_string(), "Cities.id");
        assert_eq!(name.id(), "id");
        assert_eq!(name.parent(), Some(&Name::identifier("Cities")));
    }

    #[test]
    fn test_structural_equality() {
        let a = Name::qualified("Cities".into(), "name");
        let b = Name::qualified(Name::identifier("Cities"), String::from("name"));
        assert_eq!(a, b);
        assert_ne!(a, Name::identifier("name"));
    }
}
