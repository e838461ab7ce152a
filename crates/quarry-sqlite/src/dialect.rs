//! SQLite dialect implementation.

use quarry_core::dialect::ansi;
use quarry_core::query::UnionKind;
use quarry_core::schema::ColumnType;
use quarry_core::{Dialect, Result};

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn supports_dml_limit(&self) -> bool {
        false
    }

    fn supports_dml_offset(&self) -> bool {
        false
    }

    fn union_operator_sql(&self, kind: UnionKind) -> &'static str {
        match kind {
            UnionKind::Distinct => "UNION",
            UnionKind::All => "UNION ALL",
        }
    }

    fn column_type_sql(&self, column_type: &ColumnType) -> Result<String> {
        let affinity = match column_type {
            ColumnType::Int | ColumnType::Long | ColumnType::Bool | ColumnType::Enumeration => {
                "INTEGER"
            }
            ColumnType::Decimal { .. } => "NUMERIC",
            ColumnType::Varchar(_)
            | ColumnType::Char
            | ColumnType::Text
            | ColumnType::Uuid
            | ColumnType::Date
            | ColumnType::DateTime
            | ColumnType::Time => "TEXT",
            ColumnType::Binary(_) | ColumnType::Blob => "BLOB",
            ColumnType::Reference(inner) => return self.column_type_sql(inner),
        };
        Ok(String::from(affinity))
    }

    fn id_column_type_sql(&self, column_type: &ColumnType) -> Result<String> {
        match column_type {
            ColumnType::Int | ColumnType::Long => {
                Ok(String::from("INTEGER PRIMARY KEY AUTOINCREMENT"))
            }
            other => Err(ansi::unsupported_id_column(self, other)),
        }
    }
}
