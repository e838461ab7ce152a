#![allow(dead_code)]

use quarry_core::schema::{Column, Table};
use quarry_core::{CompileError, Dialect, GenericDialect, SqlStatement, Statement};

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

pub fn compile(statement: impl Into<Statement>) -> SqlStatement {
    let statement = statement.into();
    GenericDialect
        .compile(statement.clone())
        .unwrap_or_else(|e| panic!("Failed to compile: {statement:?}\nError: {e}"))
}

pub fn compile_err(statement: impl Into<Statement>) -> CompileError {
    let statement = statement.into();
    GenericDialect
        .compile(statement.clone())
        .expect_err(&format!("Expected compile error for: {statement:?}"))
}

/// Asserts the SQL text and checks that every placeholder has an argument.
pub fn assert_sql(statement: &SqlStatement, sql: &str) {
    assert_eq!(statement.sql(), sql);
    assert_eq!(
        statement.placeholder_count(),
        statement.arguments().len(),
        "Placeholder/argument mismatch in: {}",
        statement.sql()
    );
}

/// Routes compiler debug events to the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
