//! # quarry-mysql
//!
//! MySQL dialect and MySQL-only expressions for `quarry-core`.
//!
//! # How MySQL differs from the generic dialect
//!
//! - **Identifier quoting**: identifiers are quoted with backticks unless the
//!   server runs in [`ANSI_QUOTES`] mode.
//! - **NULL ordering**: MySQL has no `NULLS LAST`; ordering by `ISNULL(x)`
//!   first sorts `NULL` after every value in either direction.
//! - **[`AUTO_INCREMENT`]**: generated ids are `INT` or `BIGINT` columns
//!   declared `NOT NULL AUTO_INCREMENT`.
//! - **UPDATE/DELETE**: `ORDER BY` and `LIMIT` are accepted, `OFFSET` is not.
//!
//! The [`expressions`] module adds date arithmetic, timezone conversion,
//! `GROUP_CONCAT` and other functions only MySQL spells this way.
//!
//! [`ANSI_QUOTES`]: https://dev.mysql.com/doc/refman/8.0/en/sql-mode.html#sqlmode_ansi_quotes
//! [`AUTO_INCREMENT`]: https://dev.mysql.com/doc/refman/8.0/en/example-auto-increment.html
//!
//! ## Example
//!
//! ```rust
//! use quarry_core::{Dialect, ExpressionOps, Table};
//! use quarry_mysql::MySqlDialect;
//!
//! let mut orders = Table::new("Orders");
//! let id = orders.integer("id").auto_increment().primary_key().add()?;
//! let date = orders.date("date").nullable().add()?;
//!
//! let stmt = MySqlDialect::new().compile(orders.select(&date).where_clause(id.gt(10)).order_by(&date))?;
//! assert_eq!(
//!     stmt.sql(),
//!     "SELECT Orders.`date` FROM Orders WHERE Orders.id > ? ORDER BY ISNULL(Orders.`date`), Orders.`date`"
//! );
//! # Ok::<(), quarry_core::CompileError>(())
//! ```

mod dialect;
pub mod expressions;

pub use dialect::MySqlDialect;
