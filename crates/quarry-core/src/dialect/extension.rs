//! Self-rendering expression and modifier nodes.

use std::fmt;

use crate::error::Result;

use super::{Dialect, SqlBuilder};

/// A dialect-specific node that renders itself.
///
/// Vendor constructs such as interval arithmetic or ordered aggregates
/// implement this trait instead of extending the core expression enum. The
/// active dialect is passed in so sub-expressions render with the same
/// quoting and parameter binding:
///
/// ```rust
/// use quarry_core::dialect::{Dialect, DialectExtension, SqlBuilder};
/// use quarry_core::expr::Expr;
/// use quarry_core::Result;
///
/// #[derive(Debug)]
/// struct Negate(Expr);
///
/// impl DialectExtension for Negate {
///     fn append_to(&self, builder: &mut SqlBuilder, dialect: &dyn Dialect) -> Result<()> {
///         builder.push_str("-(");
///         dialect.expression_sql(builder, &self.0)?;
///         builder.push(')');
///         Ok(())
///     }
/// }
/// ```
pub trait DialectExtension: fmt::Debug + Send + Sync {
    /// Appends the SQL of this node to `builder`.
    fn append_to(&self, builder: &mut SqlBuilder, dialect: &dyn Dialect) -> Result<()>;
}
