//! MySQL dialect implementation.

use quarry_core::dialect::{ansi, SqlBuilder};
use quarry_core::query::QueryOrder;
use quarry_core::schema::ColumnType;
use quarry_core::statement::InsertValues;
use quarry_core::{Dialect, Result};

/// MySQL dialect.
///
/// Identifiers are quoted with backticks unless the server runs with the
/// `ANSI_QUOTES` SQL mode, see [`MySqlDialect::with_ansi_quotes`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect {
    ansi_quotes: bool,
}

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self { ansi_quotes: false }
    }

    /// Creates a MySQL dialect for servers running in `ANSI_QUOTES` mode.
    #[must_use]
    pub const fn with_ansi_quotes() -> Self {
        Self { ansi_quotes: true }
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        if self.ansi_quotes {
            '"'
        } else {
            '`'
        }
    }

    fn supports_dml_offset(&self) -> bool {
        false
    }

    // MySQL sorts NULL first and has no NULLS LAST.
    fn order_expression_sql(&self, builder: &mut SqlBuilder, order: &QueryOrder) -> Result<()> {
        builder.push_str("ISNULL(");
        self.expression_sql(builder, order.expression())?;
        builder.push_str("), ");
        self.expression_sql(builder, order.expression())?;
        if order.is_descending() {
            builder.push_str(" DESC");
        }
        Ok(())
    }

    fn insert_values_sql(&self, builder: &mut SqlBuilder, insert: &InsertValues) -> Result<()> {
        if insert.values().is_empty() {
            builder
                .push_str("INSERT INTO ")
                .push_str(&self.name_sql(insert.table()))
                .push_str(" () VALUES ()");
            return Ok(());
        }
        ansi::insert_values_sql(self, builder, insert)
    }

    fn column_type_sql(&self, column_type: &ColumnType) -> Result<String> {
        match column_type {
            ColumnType::DateTime => Ok(String::from("DATETIME")),
            ColumnType::Uuid => Ok(String::from("CHAR(36)")),
            other => ansi::column_type_sql(self, other),
        }
    }

    fn id_column_type_sql(&self, column_type: &ColumnType) -> Result<String> {
        match column_type {
            ColumnType::Int => Ok(String::from("INT NOT NULL AUTO_INCREMENT")),
            ColumnType::Long => Ok(String::from("BIGINT NOT NULL AUTO_INCREMENT")),
            other => Err(ansi::unsupported_id_column(self, other)),
        }
    }
}
