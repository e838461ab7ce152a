//! SQL dialect support.
//!
//! A [`Dialect`] compiles expression, query and statement trees into a
//! [`SqlStatement`]. Every rendering step is a trait method with an ANSI
//! default from [`ansi`]; a vendor dialect overrides the steps its database
//! spells differently and inherits the rest.

pub mod ansi;
mod builder;
mod extension;
mod generic;
mod keywords;

use std::fmt;

use crate::error::Result;
use crate::expr::{BinaryOp, CaseExpr, Expr, FunctionCall};
use crate::name::Name;
use crate::query::{CompoundElement, Query, QueryModifier, QueryOrder, UnionKind};
use crate::schema::{ColumnDefinition, ColumnType};
use crate::statement::{Delete, InsertQuery, InsertValues, Statement, Update};
use crate::value::SqlValue;

pub use builder::{SqlBuilder, SqlStatement};
pub use extension::DialectExtension;
pub use generic::GenericDialect;
pub use keywords::is_reserved_word;

/// Access to a dialect as a trait object.
///
/// Implemented for every sized [`Dialect`]; default methods use it to hand
/// `self` to the [`ansi`] renderers and to extensions.
pub trait AsDialect {
    /// Returns `self` as a dialect trait object.
    fn as_dialect(&self) -> &dyn Dialect;
}

impl<D: Dialect> AsDialect for D {
    fn as_dialect(&self) -> &dyn Dialect {
        self
    }
}

/// Trait for SQL dialect-specific behavior.
///
/// Dialects are stateless apart from their configuration and can be shared
/// across threads.
pub trait Dialect: AsDialect + fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the parameter placeholder style.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Returns whether `word` is reserved and must be quoted as an identifier.
    fn is_reserved_word(&self, word: &str) -> bool {
        is_reserved_word(word)
    }

    /// Returns whether UPDATE and DELETE accept LIMIT.
    fn supports_dml_limit(&self) -> bool {
        true
    }

    /// Returns whether UPDATE and DELETE accept OFFSET.
    fn supports_dml_offset(&self) -> bool {
        true
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, id: &str) -> String {
        ansi::quote_identifier(self.as_dialect(), id)
    }

    /// Returns whether `id` can be emitted without quotes.
    fn is_sql_identifier(&self, id: &str) -> bool {
        ansi::is_sql_identifier(self.as_dialect(), id)
    }

    /// Renders a single identifier, quoted when necessary.
    fn id_sql(&self, id: &str) -> String {
        ansi::id_sql(self.as_dialect(), id)
    }

    /// Renders a possibly qualified name.
    fn name_sql(&self, name: &Name) -> String {
        ansi::name_sql(self.as_dialect(), name)
    }

    /// Binds a literal value.
    fn literal_sql(&self, builder: &mut SqlBuilder, value: &SqlValue) {
        ansi::literal_sql(self.as_dialect(), builder, value);
    }

    /// Renders one selection-list entry.
    fn declaration_sql(&self, builder: &mut SqlBuilder, expr: &Expr) -> Result<()> {
        ansi::declaration_sql(self.as_dialect(), builder, expr)
    }

    /// Renders any expression.
    fn expression_sql(&self, builder: &mut SqlBuilder, expr: &Expr) -> Result<()> {
        ansi::expression_sql(self.as_dialect(), builder, expr)
    }

    /// Renders a binary operation.
    fn binary_expression_sql(
        &self,
        builder: &mut SqlBuilder,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
    ) -> Result<()> {
        ansi::binary_expression_sql(self.as_dialect(), builder, left, op, right)
    }

    /// Returns the spelling of a binary operator.
    fn binary_operator_sql(&self, op: BinaryOp) -> Result<&'static str> {
        ansi::binary_operator_sql(self.as_dialect(), op)
    }

    /// Renders a CASE expression.
    fn case_expression_sql(&self, builder: &mut SqlBuilder, case: &CaseExpr) -> Result<()> {
        ansi::case_expression_sql(self.as_dialect(), builder, case)
    }

    /// Renders a function call.
    fn function_expression_sql(&self, builder: &mut SqlBuilder, function: &FunctionCall) -> Result<()> {
        ansi::function_expression_sql(self.as_dialect(), builder, function)
    }

    /// Renders a complete SELECT.
    fn select_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::select_sql(self.as_dialect(), builder, query)
    }

    /// Renders the clauses following the selection list.
    fn query_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::query_sql(self.as_dialect(), builder, query)
    }

    /// Renders FROM and JOIN.
    fn compound_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::compound_sql(self.as_dialect(), builder, query)
    }

    /// Renders a FROM/JOIN element.
    fn compound_element_sql(&self, builder: &mut SqlBuilder, element: &CompoundElement) -> Result<()> {
        ansi::compound_element_sql(self.as_dialect(), builder, element)
    }

    /// Renders WHERE.
    fn filter_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::filter_sql(self.as_dialect(), builder, query)
    }

    /// Renders GROUP BY.
    fn grouping_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::grouping_sql(self.as_dialect(), builder, query)
    }

    /// Renders HAVING.
    fn having_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::having_sql(self.as_dialect(), builder, query)
    }

    /// Renders ORDER BY.
    fn order_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::order_sql(self.as_dialect(), builder, query)
    }

    /// Renders one ORDER BY entry.
    fn order_expression_sql(&self, builder: &mut SqlBuilder, order: &QueryOrder) -> Result<()> {
        ansi::order_expression_sql(self.as_dialect(), builder, order)
    }

    /// Renders the query modifiers.
    fn modifiers_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::modifiers_sql(self.as_dialect(), builder, query)
    }

    /// Renders one modifier.
    fn modifier_sql(&self, builder: &mut SqlBuilder, modifier: &QueryModifier) -> Result<()> {
        ansi::modifier_sql(self.as_dialect(), builder, modifier)
    }

    /// Renders the UNION clauses.
    fn union_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::union_sql(self.as_dialect(), builder, query)
    }

    /// Returns the spelling of a set operation.
    fn union_operator_sql(&self, kind: UnionKind) -> &'static str {
        ansi::union_operator_sql(self.as_dialect(), kind)
    }

    /// Compiles a statement.
    fn statement_sql(&self, statement: &Statement) -> Result<SqlStatement> {
        ansi::statement_sql(self.as_dialect(), statement)
    }

    /// Renders a query statement.
    fn query_statement_sql(&self, builder: &mut SqlBuilder, query: &Query) -> Result<()> {
        ansi::query_statement_sql(self.as_dialect(), builder, query)
    }

    /// Renders an INSERT ... VALUES statement.
    fn insert_values_sql(&self, builder: &mut SqlBuilder, insert: &InsertValues) -> Result<()> {
        ansi::insert_values_sql(self.as_dialect(), builder, insert)
    }

    /// Renders an INSERT ... SELECT statement.
    fn insert_query_sql(&self, builder: &mut SqlBuilder, insert: &InsertQuery) -> Result<()> {
        ansi::insert_query_sql(self.as_dialect(), builder, insert)
    }

    /// Renders an UPDATE statement.
    fn update_sql(&self, builder: &mut SqlBuilder, update: &Update) -> Result<()> {
        ansi::update_sql(self.as_dialect(), builder, update)
    }

    /// Renders a DELETE statement.
    fn delete_sql(&self, builder: &mut SqlBuilder, delete: &Delete) -> Result<()> {
        ansi::delete_sql(self.as_dialect(), builder, delete)
    }

    /// Maps a column type to its SQL type name.
    fn column_type_sql(&self, column_type: &ColumnType) -> Result<String> {
        ansi::column_type_sql(self.as_dialect(), column_type)
    }

    /// Maps the type of a generated id column to its declaration.
    fn id_column_type_sql(&self, column_type: &ColumnType) -> Result<String> {
        ansi::id_column_type_sql(self.as_dialect(), column_type)
    }

    /// Renders the type declaration of a column.
    fn column_declaration_sql(&self, column: &ColumnDefinition) -> Result<String> {
        ansi::column_declaration_sql(self.as_dialect(), column)
    }

    /// Compiles anything convertible into a [`Statement`].
    fn compile(&self, statement: impl Into<Statement>) -> Result<SqlStatement>
    where
        Self: Sized,
    {
        self.statement_sql(&statement.into())
    }
}
