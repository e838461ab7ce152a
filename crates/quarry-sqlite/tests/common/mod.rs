#![allow(dead_code)]

use quarry_core::schema::{Column, Table};
use quarry_core::{Dialect, SqlStatement, SqlValue, Statement};
use quarry_sqlite::SqliteDialect;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Sqlite;

pub struct Cities {
    pub table: Table,
    pub id: Column<i32>,
    pub name: Column<String>,
}

pub struct Citizens {
    pub table: Table,
    pub id: Column<String>,
    pub name: Column<String>,
    pub city_id: Column<Option<i32>>,
}

pub fn cities() -> Cities {
    let mut table = Table::new("Cities");
    let id = table
        .integer("id")
        .auto_increment()
        .primary_key()
        .add()
        .unwrap();
    let name = table.varchar("name", 50).add().unwrap();
    Cities { table, id, name }
}

pub fn citizens(cities: &Cities) -> Citizens {
    let mut table = Table::new("Citizens");
    let id = table.varchar("id", 10).primary_key().add().unwrap();
    let name = table.varchar("name", 50).add().unwrap();
    let city_id = table
        .reference("city_id", &cities.id)
        .nullable()
        .add()
        .unwrap();
    Citizens {
        table,
        id,
        name,
        city_id,
    }
}

pub async fn create_test_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create in-memory SQLite pool")
}

/// Renders `CREATE TABLE` from the per-column declarations of the dialect.
pub fn create_table_sql(table: &Table) -> String {
    let dialect = SqliteDialect;
    let columns: Vec<String> = table
        .columns()
        .map(|column| {
            let declaration = dialect
                .column_declaration_sql(column)
                .unwrap_or_else(|e| panic!("Failed to declare {}: {e}", column.name()));
            format!("{} {declaration}", dialect.id_sql(column.identifier()))
        })
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        dialect.name_sql(table.name()),
        columns.join(", ")
    )
}

pub async fn create_tables(pool: &SqlitePool, tables: &[&Table]) {
    for table in tables {
        let sql = create_table_sql(table);
        sqlx::query(&sql)
            .execute(pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to execute: {sql}\nError: {e}"));
    }
}

pub fn compile(statement: impl Into<Statement>) -> SqlStatement {
    let statement = statement.into();
    let compiled = SqliteDialect
        .compile(statement.clone())
        .unwrap_or_else(|e| panic!("Failed to compile: {statement:?}\nError: {e}"));
    assert_eq!(
        compiled.placeholder_count(),
        compiled.arguments().len(),
        "Placeholder/argument mismatch in: {}",
        compiled.sql()
    );
    compiled
}

/// Binds every argument of `stmt` in placeholder order.
pub fn bind(stmt: &SqlStatement) -> sqlx::query::Query<'_, Sqlite, SqliteArguments<'_>> {
    let mut query = sqlx::query(stmt.sql());
    for value in stmt.arguments() {
        query = match value {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(n) => query.bind(*n),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.as_str()),
            SqlValue::Blob(b) => query.bind(b.as_slice()),
            SqlValue::Date(d) => query.bind(*d),
            SqlValue::DateTime(dt) => query.bind(*dt),
            SqlValue::Time(t) => query.bind(*t),
        };
    }
    query
}

/// Compiles and executes a statement, returning the affected row count.
pub async fn execute(pool: &SqlitePool, statement: impl Into<Statement>) -> u64 {
    let stmt = compile(statement);
    bind(&stmt)
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to execute: {}\nError: {e}", stmt.sql()))
        .rows_affected()
}

/// Compiles and runs a query, returning every row.
pub async fn fetch_all(pool: &SqlitePool, statement: impl Into<Statement>) -> Vec<SqliteRow> {
    let stmt = compile(statement);
    bind(&stmt)
        .fetch_all(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to fetch: {}\nError: {e}", stmt.sql()))
}
