//! `GROUP_CONCAT` aggregate.

use quarry_core::dialect::{Dialect, DialectExtension, SqlBuilder};
use quarry_core::expr::Expr;
use quarry_core::query::{IntoSelection, QueryOrder, SelectionItem};
use quarry_core::{Expression, IntoExpression, Result, SqlValue};

const DEFAULT_SEPARATOR: &str = ",";

/// Starts a `GROUP_CONCAT` over one or more expressions.
///
/// ```rust
/// use quarry_core::{Dialect, Table};
/// use quarry_mysql::expressions::group_concat;
/// use quarry_mysql::MySqlDialect;
///
/// let mut citizens = Table::new("Citizens");
/// let name = citizens.varchar("name", 50).add()?;
///
/// let names = group_concat(&name).distinct().separator(";").order_by(&name);
/// let stmt = MySqlDialect::new().compile(citizens.select(names.end()))?;
/// assert_eq!(
///     stmt.sql(),
///     "SELECT GROUP_CONCAT(DISTINCT Citizens.name ORDER BY Citizens.name SEPARATOR ?) FROM Citizens"
/// );
/// # Ok::<(), quarry_core::CompileError>(())
/// ```
pub fn group_concat(columns: impl IntoSelection) -> GroupConcat {
    GroupConcat {
        columns: columns.into_selection(),
        distinct: false,
        separator: String::from(DEFAULT_SEPARATOR),
        order: vec![],
    }
}

/// A `GROUP_CONCAT([DISTINCT] x, ... [ORDER BY ...] [SEPARATOR ?])` aggregate.
#[derive(Debug, Clone)]
pub struct GroupConcat {
    columns: Vec<Expr>,
    distinct: bool,
    separator: String,
    order: Vec<QueryOrder>,
}

impl GroupConcat {
    /// Concatenates distinct values only.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Sets the separator; `,` is the server default and is not rendered.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Orders the concatenated values ascending by `item`.
    #[must_use]
    pub fn order_by(mut self, item: impl SelectionItem) -> Self {
        self.order
            .push(QueryOrder::Ascending(item.into_selection_expr()));
        self
    }

    /// Orders the concatenated values descending by `item`.
    #[must_use]
    pub fn order_by_desc(mut self, item: impl SelectionItem) -> Self {
        self.order
            .push(QueryOrder::Descending(item.into_selection_expr()));
        self
    }

    /// Finishes the aggregate.
    #[must_use]
    pub fn end(self) -> Expression<String> {
        Expression::extension(self)
    }
}

impl IntoExpression<String> for GroupConcat {
    fn into_expression(self) -> Expression<String> {
        self.end()
    }
}

impl DialectExtension for GroupConcat {
    fn append_to(&self, builder: &mut SqlBuilder, dialect: &dyn Dialect) -> Result<()> {
        builder.push_str("GROUP_CONCAT(");
        if self.distinct {
            builder.push_str("DISTINCT ");
        }
        for (index, column) in self.columns.iter().enumerate() {
            if index > 0 {
                builder.push_str(", ");
            }
            dialect.expression_sql(builder, column)?;
        }
        if !self.order.is_empty() {
            builder.push_str(" ORDER BY ");
            for (index, order) in self.order.iter().enumerate() {
                if index > 0 {
                    builder.push_str(", ");
                }
                dialect.expression_sql(builder, order.expression())?;
                if order.is_descending() {
                    builder.push_str(" DESC");
                }
            }
        }
        if self.separator != DEFAULT_SEPARATOR {
            builder.push_str(" SEPARATOR ");
            dialect.literal_sql(builder, &SqlValue::Text(self.separator.clone()));
        }
        builder.push(')');
        Ok(())
    }
}
