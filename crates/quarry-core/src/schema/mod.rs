//! Schema declaration: tables, columns and their properties.
//!
//! A [`Table`] owns its column definitions. Declaring a column hands back a
//! typed [`Column`] handle that can be used anywhere an expression is
//! expected.
//!
//! ```rust
//! use quarry_core::schema::Table;
//!
//! let mut cities = Table::new("Cities");
//! let id = cities.integer("id").auto_increment().primary_key().add().unwrap();
//! let name = cities.varchar("name", 50).add().unwrap();
//!
//! assert_eq!(id.name().to_string(), "Cities.id");
//! assert_eq!(cities.primary_key().len(), 1);
//! # let _ = name;
//! ```

mod column;
mod property;

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Result;
use crate::name::Name;
use crate::query::{CompoundAlias, IntoSelection, Query};
use crate::value::ToSqlValue;

pub use column::{Column, ColumnDefinition, ColumnType};
pub use property::{ColumnProperties, ColumnProperty, PropertyKind};

/// A table declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: Name,
    columns: Vec<Arc<ColumnDefinition>>,
}

impl Table {
    /// Creates a table without columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Name::identifier(name),
            columns: vec![],
        }
    }

    /// Returns the table name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the declared columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().map(AsRef::as_ref)
    }

    /// Returns the primary key columns in declaration order.
    #[must_use]
    pub fn primary_key(&self) -> Vec<&ColumnDefinition> {
        self.columns().filter(|c| c.is_primary_key()).collect()
    }

    /// Starts declaring a column of an arbitrary type.
    pub fn column<T>(&mut self, name: impl Into<String>, column_type: ColumnType) -> ColumnBuilder<'_, T> {
        ColumnBuilder::new(self, name.into(), column_type)
    }

    /// Starts declaring an `INT` column.
    pub fn integer(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, i32> {
        self.column(name, ColumnType::Int)
    }

    /// Starts declaring a `BIGINT` column.
    pub fn long(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, i64> {
        self.column(name, ColumnType::Long)
    }

    /// Starts declaring a fixed-point column.
    pub fn decimal(&mut self, name: impl Into<String>, precision: u8, scale: u8) -> ColumnBuilder<'_, f64> {
        self.column(name, ColumnType::Decimal { precision, scale })
    }

    /// Starts declaring a `VARCHAR(length)` column.
    pub fn varchar(&mut self, name: impl Into<String>, length: u32) -> ColumnBuilder<'_, String> {
        self.column(name, ColumnType::Varchar(length))
    }

    /// Starts declaring a single-character column.
    pub fn char(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, String> {
        self.column(name, ColumnType::Char)
    }

    /// Starts declaring a text column.
    pub fn text(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, String> {
        self.column(name, ColumnType::Text)
    }

    /// Starts declaring a boolean column.
    pub fn bool(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, bool> {
        self.column(name, ColumnType::Bool)
    }

    /// Starts declaring a date column.
    pub fn date(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, NaiveDate> {
        self.column(name, ColumnType::Date)
    }

    /// Starts declaring a date-time column.
    pub fn datetime(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, NaiveDateTime> {
        self.column(name, ColumnType::DateTime)
    }

    /// Starts declaring a time-of-day column.
    pub fn time(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, NaiveTime> {
        self.column(name, ColumnType::Time)
    }

    /// Starts declaring a UUID column, bound as its hyphenated text form.
    pub fn uuid(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, String> {
        self.column(name, ColumnType::Uuid)
    }

    /// Starts declaring a fixed-size binary column.
    pub fn binary(&mut self, name: impl Into<String>, length: u32) -> ColumnBuilder<'_, Vec<u8>> {
        self.column(name, ColumnType::Binary(length))
    }

    /// Starts declaring a blob column.
    pub fn blob(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, Vec<u8>> {
        self.column(name, ColumnType::Blob)
    }

    /// Starts declaring an enumeration column stored as its ordinal.
    pub fn enumeration(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, i32> {
        self.column(name, ColumnType::Enumeration)
    }

    /// Starts declaring a column referencing `target`, typed after it.
    pub fn reference<T>(&mut self, name: impl Into<String>, target: &Column<T>) -> ColumnBuilder<'_, T> {
        let column_type = ColumnType::Reference(Box::new(target.column_type().clone()));
        let mut builder = self.column(name, column_type);
        builder
            .properties
            .push(ColumnProperty::References(target.name().clone()));
        builder
    }

    /// Starts a query selecting from this table.
    #[must_use]
    pub fn query(&self) -> Query {
        Query::new().from(self)
    }

    /// Starts a query selecting `selection` from this table.
    #[must_use]
    pub fn select(&self, selection: impl IntoSelection) -> Query {
        self.query().select(selection)
    }

    /// Aliases the table for use in FROM/JOIN, e.g. `Cities AS c`.
    #[must_use]
    pub fn alias(&self, label: impl Into<String>) -> CompoundAlias {
        CompoundAlias::new(self.into(), Name::identifier(label))
    }

    fn register(&mut self, definition: ColumnDefinition) -> Arc<ColumnDefinition> {
        let definition = Arc::new(definition);
        self.columns.push(Arc::clone(&definition));
        definition
    }
}

/// Fluent builder for a column declaration.
///
/// Properties are checked when the column is registered with [`add`](Self::add).
#[derive(Debug)]
#[must_use = "a column is only declared once `add` is called"]
pub struct ColumnBuilder<'t, T> {
    table: &'t mut Table,
    identifier: String,
    column_type: ColumnType,
    properties: Vec<ColumnProperty>,
    _type: PhantomData<fn() -> T>,
}

impl<'t, T> ColumnBuilder<'t, T> {
    fn new(table: &'t mut Table, identifier: String, column_type: ColumnType) -> Self {
        Self {
            table,
            identifier,
            column_type,
            properties: vec![],
            _type: PhantomData,
        }
    }

    /// Marks the column nullable; its values become `Option<T>`.
    pub fn nullable(mut self) -> ColumnBuilder<'t, Option<T>> {
        self.properties.push(ColumnProperty::Nullable);
        ColumnBuilder {
            table: self.table,
            identifier: self.identifier,
            column_type: self.column_type,
            properties: self.properties,
            _type: PhantomData,
        }
    }

    /// Marks the column as generated by the database.
    pub fn auto_increment(mut self) -> Self {
        self.properties.push(ColumnProperty::AutoIncrement);
        self
    }

    /// Marks the column as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.properties.push(ColumnProperty::PrimaryKey);
        self
    }

    /// Declares the value used when an insert omits the column.
    pub fn default(mut self, value: impl ToSqlValue) -> Self {
        self.properties
            .push(ColumnProperty::Default(value.to_sql_value()));
        self
    }

    /// Declares that the column references `target`.
    pub fn references<R>(mut self, target: &Column<R>) -> Self {
        self.properties
            .push(ColumnProperty::References(target.name().clone()));
        self
    }

    /// Registers the column with its table.
    ///
    /// Fails with [`CompileError::AmbiguousProperty`](crate::CompileError::AmbiguousProperty)
    /// when a property kind was declared twice.
    pub fn add(self) -> Result<Column<T>> {
        let name = Name::qualified(self.table.name.clone(), self.identifier);
        let mut properties = ColumnProperties::new();
        for property in self.properties {
            properties.insert(&name, property)?;
        }
        let definition = self
            .table
            .register(ColumnDefinition::new(name, self.column_type, properties));
        Ok(Column::new(definition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use crate::value::SqlValue;

    #[test]
    fn test_declare_columns() {
        let mut cities = Table::new("Cities");
        let id = cities.integer("id").auto_increment().primary_key().add().unwrap();
        let name = cities.varchar("name", 50).add().unwrap();

        assert_eq!(id.name(), &Name::qualified("Cities".into(), "id"));
        assert_eq!(name.identifier(), "name");
        assert_eq!(name.column_type(), &ColumnType::Varchar(50));
        assert!(id.definition().is_auto_increment());
        assert_eq!(cities.columns().count(), 2);
        assert_eq!(cities.primary_key()[0].identifier(), "id");
    }

    #[test]
    fn test_nullable_and_default() {
        let mut t = Table::new("t");
        let c: Column<Option<i64>> = t.long("c").nullable().default(7_i64).add().unwrap();
        assert!(c.definition().is_nullable());
        assert_eq!(
            c.definition().properties().default_value(),
            Some(&SqlValue::Int(7))
        );
    }

    #[test]
    fn test_reference_column() {
        let mut cities = Table::new("Cities");
        let id = cities.integer("id").primary_key().add().unwrap();
        let mut citizens = Table::new("Citizens");
        let city_id = citizens.reference("city_id", &id).add().unwrap();

        assert_eq!(
            city_id.column_type(),
            &ColumnType::Reference(Box::new(ColumnType::Int))
        );
        assert_eq!(city_id.definition().properties().references(), Some(id.name()));
        assert_eq!(city_id.definition().compound(), Some(citizens.name()));
    }

    #[test]
    fn test_duplicate_property_fails_on_add() {
        let mut t = Table::new("t");
        let err = t
            .integer("id")
            .primary_key()
            .primary_key()
            .add()
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::AmbiguousProperty { kind: PropertyKind::PrimaryKey, .. }
        ));
        assert_eq!(t.columns().count(), 0);
    }

    #[test]
    fn test_reference_plus_explicit_reference_is_ambiguous() {
        let mut a = Table::new("a");
        let id = a.integer("id").add().unwrap();
        let mut b = Table::new("b");
        let err = b.reference("a_id", &id).references(&id).add().unwrap_err();
        assert!(matches!(
            err,
            CompileError::AmbiguousProperty { kind: PropertyKind::References, .. }
        ));
    }
}
