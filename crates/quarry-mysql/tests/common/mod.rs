#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use quarry_core::schema::{Column, Table};
use quarry_core::{CompileError, Dialect, SqlStatement, Statement};
use quarry_mysql::MySqlDialect;

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

pub struct AllColumnTypes {
    pub table: Table,
    pub date: Column<NaiveDate>,
    pub datetime: Column<NaiveDateTime>,
    pub amount: Column<f64>,
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

pub fn all_column_types() -> AllColumnTypes {
    let mut table = Table::new("AllColumnTypes");
    let date = table.date("date").add().unwrap();
    let datetime = table.datetime("datetime").add().unwrap();
    let amount = table.decimal("amount", 10, 2).add().unwrap();
    AllColumnTypes {
        table,
        date,
        datetime,
        amount,
    }
}

pub fn compile(statement: impl Into<Statement>) -> SqlStatement {
    let statement = statement.into();
    let compiled = MySqlDialect::new()
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

pub fn compile_err(statement: impl Into<Statement>) -> CompileError {
    let statement = statement.into();
    MySqlDialect::new()
        .compile(statement.clone())
        .expect_err(&format!("Expected compile error for: {statement:?}"))
}
