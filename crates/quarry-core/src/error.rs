//! Compilation errors.

use thiserror::Error;

use crate::schema::PropertyKind;
use crate::time::TimeUnit;

/// Errors raised while declaring a schema or compiling a statement.
///
/// Compilation is deterministic, so none of these are worth retrying: the
/// input tree or the dialect has to change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The dialect has no rendering rule for a construct.
    #[error("{construct} is not supported by SQL dialect '{dialect}'")]
    Unsupported {
        /// Name of the dialect that rejected the construct.
        dialect: &'static str,
        /// Description of the offending node.
        construct: String,
    },

    /// A column already carries a property of this kind.
    #[error("column '{column}' already has a {kind} property")]
    AmbiguousProperty {
        /// Qualified column name.
        column: String,
        /// The duplicated property kind.
        kind: PropertyKind,
    },

    /// The column type cannot back a generated id column in this dialect.
    #[error("column type {column_type} cannot be used as an id column by SQL dialect '{dialect}'")]
    UnsupportedIdColumnType {
        /// Name of the dialect.
        dialect: &'static str,
        /// Description of the column type.
        column_type: String,
    },

    /// The time unit is too fine or too coarse for the requested operation.
    #[error("time unit {unit} is not supported by {context}")]
    UnsupportedTimeUnit {
        /// The rejected unit.
        unit: TimeUnit,
        /// The operation that rejected it.
        context: &'static str,
    },
}

impl CompileError {
    /// Creates an [`CompileError::Unsupported`] error and logs it.
    pub fn unsupported(dialect: &'static str, construct: impl Into<String>) -> Self {
        let construct = construct.into();
        tracing::debug!(dialect, construct = %construct, "unsupported construct");
        Self::Unsupported { dialect, construct }
    }
}

/// Result type alias for schema declaration and compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message() {
        let err = CompileError::unsupported("generic", "NULL comparison with '<'");
        assert_eq!(
            err.to_string(),
            "NULL comparison with '<' is not supported by SQL dialect 'generic'"
        );
    }

    #[test]
    fn test_ambiguous_property_message() {
        let err = CompileError::AmbiguousProperty {
            column: String::from("Cities.id"),
            kind: PropertyKind::PrimaryKey,
        };
        assert_eq!(
            err.to_string(),
            "column 'Cities.id' already has a PRIMARY KEY property"
        );
    }
}
