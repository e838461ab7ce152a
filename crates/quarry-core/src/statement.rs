//! Statement model: queries and the DML statements.
//!
//! ```rust
//! use quarry_core::expr::ExpressionOps;
//! use quarry_core::schema::Table;
//! use quarry_core::statement::{delete_from, insert_into, update};
//!
//! let mut cities = Table::new("Cities");
//! let id = cities.integer("id").add().unwrap();
//! let name = cities.varchar("name", 50).add().unwrap();
//!
//! let insert = insert_into(&cities).set(&id, 1).set(&name, "Paris");
//! let rename = update(&cities).set(&name, "Lutetia").where_clause(id.eq(1));
//! let purge = delete_from(&cities).where_clause(name.is_null());
//! # let _ = (insert, rename, purge);
//! ```

use crate::expr::{Expr, IntoExpression};
use crate::name::Name;
use crate::query::{Query, SelectionItem};
use crate::schema::{Column, Table};
use crate::value::{SqlValue, ToSqlValue};

/// Any compilable statement.
#[derive(Debug, Clone)]
pub enum Statement {
    /// SELECT
    Query(Query),
    /// INSERT ... VALUES
    InsertValues(InsertValues),
    /// INSERT ... SELECT
    InsertQuery(InsertQuery),
    /// UPDATE
    Update(Update),
    /// DELETE
    Delete(Delete),
}

impl From<Query> for Statement {
    fn from(query: Query) -> Self {
        Self::Query(query)
    }
}

impl From<InsertValues> for Statement {
    fn from(insert: InsertValues) -> Self {
        Self::InsertValues(insert)
    }
}

impl From<InsertQuery> for Statement {
    fn from(insert: InsertQuery) -> Self {
        Self::InsertQuery(insert)
    }
}

impl From<Update> for Statement {
    fn from(update: Update) -> Self {
        Self::Update(update)
    }
}

impl From<Delete> for Statement {
    fn from(delete: Delete) -> Self {
        Self::Delete(delete)
    }
}

/// Starts an INSERT into `table`.
#[must_use]
pub fn insert_into(table: &Table) -> InsertValues {
    InsertValues::new(table)
}

/// Starts an UPDATE of `table`.
#[must_use]
pub fn update(table: &Table) -> Update {
    Update::new(table)
}

/// Starts a DELETE from `table`.
#[must_use]
pub fn delete_from(table: &Table) -> Delete {
    Delete::new(table)
}

/// `INSERT INTO table (columns) VALUES (values)`.
///
/// Columns and values are kept as one ordered list of pairs, so the column
/// list and the value list always render in the same order.
#[derive(Debug, Clone)]
pub struct InsertValues {
    table: Name,
    values: Vec<(Name, SqlValue)>,
}

impl InsertValues {
    /// Creates an insert without values.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.name().clone(),
            values: vec![],
        }
    }

    /// Assigns a value to a column. Assigning a column twice keeps its
    /// position and replaces the value.
    #[must_use]
    pub fn set<T>(mut self, column: &Column<T>, value: impl ToSqlValue) -> Self {
        let value = value.to_sql_value();
        match self.values.iter_mut().find(|(name, _)| name == column.name()) {
            Some(entry) => entry.1 = value,
            None => self.values.push((column.name().clone(), value)),
        }
        self
    }

    /// Turns the statement into `INSERT INTO table SELECT ...`.
    #[must_use]
    pub fn query(self, query: Query) -> InsertQuery {
        InsertQuery {
            table: self.table,
            query,
        }
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &Name {
        &self.table
    }

    /// Returns the column/value pairs in assignment order.
    #[must_use]
    pub fn values(&self) -> &[(Name, SqlValue)] {
        &self.values
    }
}

/// `INSERT INTO table SELECT ...`.
#[derive(Debug, Clone)]
pub struct InsertQuery {
    table: Name,
    query: Query,
}

impl InsertQuery {
    /// Creates an insert of the rows selected by `query`.
    #[must_use]
    pub fn new(table: &Table, query: Query) -> Self {
        Self {
            table: table.name().clone(),
            query,
        }
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &Name {
        &self.table
    }

    /// Returns the inner query.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }
}

/// `UPDATE table SET column = expr, ... [WHERE ...] [ORDER BY ...] [LIMIT ?]`.
#[derive(Debug, Clone)]
pub struct Update {
    table: Name,
    values: Vec<(Name, Expr)>,
    query: Query,
}

impl Update {
    /// Creates an update without assignments.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.name().clone(),
            values: vec![],
            query: Query::new(),
        }
    }

    /// Assigns an expression to a column. Assigning a column twice keeps
    /// its position and replaces the expression.
    #[must_use]
    pub fn set<T>(mut self, column: &Column<T>, value: impl IntoExpression<T>) -> Self {
        let value = value.into_expression().into_expr();
        match self.values.iter_mut().find(|(name, _)| name == column.name()) {
            Some(entry) => entry.1 = value,
            None => self.values.push((column.name().clone(), value)),
        }
        self
    }

    /// Appends a filter predicate.
    #[must_use]
    pub fn where_clause(mut self, predicate: impl IntoExpression<bool>) -> Self {
        self.query = self.query.where_clause(predicate);
        self
    }

    /// Appends an ascending ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, item: impl SelectionItem) -> Self {
        self.query = self.query.order_by(item);
        self
    }

    /// Appends a descending ORDER BY entry.
    #[must_use]
    pub fn order_by_desc(mut self, item: impl SelectionItem) -> Self {
        self.query = self.query.order_by_desc(item);
        self
    }

    /// Limits the number of updated rows.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.query = self.query.limit(limit);
        self
    }

    /// Limits the updated rows with an offset.
    #[must_use]
    pub fn limit_offset(mut self, limit: u64, offset: u64) -> Self {
        self.query = self.query.limit_offset(limit, offset);
        self
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &Name {
        &self.table
    }

    /// Returns the column/expression pairs in assignment order.
    #[must_use]
    pub fn values(&self) -> &[(Name, Expr)] {
        &self.values
    }

    /// Returns the clauses selecting the updated rows.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }
}

/// `DELETE FROM table [WHERE ...] [ORDER BY ...] [LIMIT ?]`.
#[derive(Debug, Clone)]
pub struct Delete {
    table: Name,
    query: Query,
}

impl Delete {
    /// Creates a delete of every row.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.name().clone(),
            query: Query::new(),
        }
    }

    /// Appends a filter predicate.
    #[must_use]
    pub fn where_clause(mut self, predicate: impl IntoExpression<bool>) -> Self {
        self.query = self.query.where_clause(predicate);
        self
    }

    /// Appends an ascending ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, item: impl SelectionItem) -> Self {
        self.query = self.query.order_by(item);
        self
    }

    /// Appends a descending ORDER BY entry.
    #[must_use]
    pub fn order_by_desc(mut self, item: impl SelectionItem) -> Self {
        self.query = self.query.order_by_desc(item);
        self
    }

    /// Limits the number of deleted rows.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.query = self.query.limit(limit);
        self
    }

    /// Limits the deleted rows with an offset.
    #[must_use]
    pub fn limit_offset(mut self, limit: u64, offset: u64) -> Self {
        self.query = self.query.limit_offset(limit, offset);
        self
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &Name {
        &self.table
    }

    /// Returns the clauses selecting the deleted rows.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ExpressionOps;

    #[test]
    fn test_insert_keeps_assignment_order() {
        let mut t = Table::new("t");
        let a = t.integer("a").add().unwrap();
        let b = t.text("b").add().unwrap();
        let c = t.integer("c").nullable().add().unwrap();

        let insert = insert_into(&t).set(&a, 1).set(&b, "x").set(&c, None::<i32>);
        let ids: Vec<&str> = insert.values().iter().map(|(n, _)| n.id()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(insert.values()[2].1, SqlValue::Null);
    }

    #[test]
    fn test_insert_reassignment_replaces_in_place() {
        let mut t = Table::new("t");
        let a = t.integer("a").add().unwrap();
        let b = t.integer("b").add().unwrap();

        let insert = insert_into(&t).set(&a, 1).set(&b, 2).set(&a, 3);
        assert_eq!(insert.values().len(), 2);
        assert_eq!(insert.values()[0].0.id(), "a");
        assert_eq!(insert.values()[0].1, SqlValue::Int(3));
    }

    #[test]
    fn test_update_and_delete_collect_clauses() {
        let mut t = Table::new("t");
        let a = t.integer("a").add().unwrap();

        let upd = update(&t).set(&a, a.plus(1)).where_clause(a.gt(0)).limit(5);
        assert_eq!(upd.values().len(), 1);
        assert_eq!(upd.query().filter().len(), 1);
        assert_eq!(upd.query().modifiers().len(), 1);
        assert!(upd.query().source().is_none());

        let del = delete_from(&t).where_clause(a.lt(0)).order_by(&a);
        assert_eq!(del.query().order().len(), 1);
        assert!(matches!(Statement::from(del), Statement::Delete(_)));
    }
}
