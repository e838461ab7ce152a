//! # quarry-sqlite
//!
//! SQLite dialect for `quarry-core`.
//!
//! # How SQLite differs from the generic dialect
//!
//! - **[Type affinity]**: SQLite uses a type-affinity system rather
//!   than strict column types. Column types are declared with the
//!   affinity names `INTEGER`, `NUMERIC`, `TEXT` and `BLOB`.
//! - **[AUTOINCREMENT]**: generated ids are declared as
//!   `INTEGER PRIMARY KEY AUTOINCREMENT`, which only exists for
//!   integer columns.
//! - **Compound selects**: SQLite spells the distinct union plain
//!   `UNION`. See [compound select].
//! - **UPDATE/DELETE**: `LIMIT` and `ORDER BY` on UPDATE and DELETE
//!   need a SQLite build with `SQLITE_ENABLE_UPDATE_DELETE_LIMIT`;
//!   the dialect rejects them.
//!
//! [Type affinity]: https://www.sqlite.org/datatype3.html
//! [AUTOINCREMENT]: https://www.sqlite.org/autoinc.html
//! [compound select]: https://www.sqlite.org/lang_select.html#compound_select_statements
//!
//! ## Example
//!
//! ```rust
//! use quarry_core::{Dialect, ExpressionOps, Table};
//! use quarry_sqlite::SqliteDialect;
//!
//! let mut cities = Table::new("Cities");
//! let id = cities.integer("id").auto_increment().primary_key().add()?;
//! let name = cities.varchar("name", 50).add()?;
//!
//! let stmt = SqliteDialect.compile(cities.select(&name).where_clause(id.eq(1)))?;
//! assert_eq!(stmt.sql(), "SELECT Cities.name FROM Cities WHERE Cities.id = ?");
//! # Ok::<(), quarry_core::CompileError>(())
//! ```

mod dialect;

pub use dialect::SqliteDialect;
