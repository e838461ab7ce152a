//! # quarry-core
//!
//! A typed SQL query and statement builder with a dialect-driven compiler.
//!
//! This crate provides:
//! - Schema declarations producing typed column handles
//! - An expression model typed by the Rust value of each SQL expression
//! - Query and DML statement builders
//! - A [`Dialect`] trait that compiles them into parameterized SQL
//!
//! ## Building and Compiling
//!
//! ```rust
//! use quarry_core::dialect::{Dialect, GenericDialect};
//! use quarry_core::expr::ExpressionOps;
//! use quarry_core::schema::Table;
//! use quarry_core::SqlValue;
//!
//! let mut cities = Table::new("Cities");
//! let id = cities.integer("id").add()?;
//! let name = cities.varchar("name", 50).add()?;
//!
//! let query = cities
//!     .select(&name)
//!     .where_clause(id.eq(5))
//!     .order_by_desc(&name);
//!
//! let stmt = GenericDialect.compile(query)?;
//! assert_eq!(
//!     stmt.sql(),
//!     "SELECT Cities.name FROM Cities WHERE Cities.id = ? ORDER BY Cities.name DESC NULLS LAST"
//! );
//! assert_eq!(stmt.arguments(), &[SqlValue::Int(5)]);
//! # Ok::<(), quarry_core::CompileError>(())
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values never reach the SQL text. Every literal is bound through a `?`
//! placeholder; only `NULL` is written inline.

pub mod dialect;
pub mod error;
pub mod expr;
pub mod name;
pub mod query;
pub mod schema;
pub mod statement;
pub mod time;
pub mod value;

pub use dialect::{Dialect, DialectExtension, GenericDialect, SqlBuilder, SqlStatement};
pub use error::{CompileError, Result};
pub use expr::{Expr, Expression, ExpressionOps, IntoExpression};
pub use name::Name;
pub use query::Query;
pub use schema::{Column, ColumnType, Table};
pub use statement::Statement;
pub use time::TimeUnit;
pub use value::{SqlValue, ToSqlValue};
