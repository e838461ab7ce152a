//! Typed expressions.
//!
//! [`Expression<T>`] pairs an [`Expr`] with the Rust type of its SQL value.
//! The type parameter has no runtime representation; it only lets the
//! compiler reject comparisons such as `id = 'Paris'` before any SQL exists.

use std::fmt;
use std::marker::PhantomData;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::dialect::DialectExtension;
use crate::name::Name;
use crate::query::{CompoundElement, Query};
use crate::schema::Column;
use crate::value::{SqlValue, ToSqlValue};

use super::{BinaryOp, CaseExpr, Expr, FunctionArg, FunctionCall, WhenThen};

/// An expression producing values of type `T`.
pub struct Expression<T> {
    expr: Expr,
    _type: PhantomData<fn() -> T>,
}

impl<T> Expression<T> {
    /// Wraps an untyped expression.
    #[must_use]
    pub const fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _type: PhantomData,
        }
    }

    /// Wraps a dialect extension node.
    pub fn extension(extension: impl DialectExtension + 'static) -> Self {
        Self::from_expr(Expr::extension(extension))
    }

    /// Returns the untyped expression.
    #[must_use]
    pub const fn as_expr(&self) -> &Expr {
        &self.expr
    }

    /// Unwraps the untyped expression.
    #[must_use]
    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// Reinterprets the value type, e.g. to compare an enumeration with its ordinal.
    #[must_use]
    pub fn cast<U>(self) -> Expression<U> {
        Expression::from_expr(self.expr)
    }
}

impl Expression<bool> {
    /// Creates `self AND other`.
    #[must_use]
    pub fn and(self, other: impl IntoExpression<bool>) -> Self {
        binary(self, BinaryOp::And, other.into_expression())
    }

    /// Creates `self OR other`.
    #[must_use]
    pub fn or(self, other: impl IntoExpression<bool>) -> Self {
        binary(self, BinaryOp::Or, other.into_expression())
    }

    /// Creates `NOT self`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        not(self)
    }
}

impl<T> Clone for Expression<T> {
    fn clone(&self) -> Self {
        Self::from_expr(self.expr.clone())
    }
}

impl<T> fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression").field(&self.expr).finish()
    }
}

/// Conversion into an expression of type `T`.
///
/// Implemented by expressions, column handles and plain Rust values. A value
/// of type `T` also converts into `Option<T>`, so nullable columns compare
/// with non-null operands.
pub trait IntoExpression<T> {
    /// Performs the conversion.
    fn into_expression(self) -> Expression<T>;
}

impl<T> IntoExpression<T> for Expression<T> {
    fn into_expression(self) -> Expression<T> {
        self
    }
}

impl<T> IntoExpression<Option<T>> for Expression<T> {
    fn into_expression(self) -> Expression<Option<T>> {
        self.cast()
    }
}

/// The `NULL` literal, returned by [`null`].
///
/// It converts into an expression of any type, so the same value serves
/// nullable and non-null operands alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Null;

impl<T> IntoExpression<T> for Null {
    fn into_expression(self) -> Expression<T> {
        Expression::from_expr(Expr::Literal(SqlValue::Null))
    }
}

impl<T> IntoExpression<T> for &Column<T> {
    fn into_expression(self) -> Expression<T> {
        Expression::from_expr(Expr::from(self))
    }
}

impl<T> IntoExpression<Option<T>> for &Column<T> {
    fn into_expression(self) -> Expression<Option<T>> {
        Expression::from_expr(Expr::from(self))
    }
}

macro_rules! impl_literal_expression {
    ($($target:ty => [$($source:ty),+ $(,)?]);+ $(;)?) => {
        $($(
            impl IntoExpression<$target> for $source {
                fn into_expression(self) -> Expression<$target> {
                    Expression::from_expr(Expr::Literal(self.to_sql_value()))
                }
            }

            impl IntoExpression<Option<$target>> for $source {
                fn into_expression(self) -> Expression<Option<$target>> {
                    Expression::from_expr(Expr::Literal(self.to_sql_value()))
                }
            }

            impl IntoExpression<Option<$target>> for Option<$source> {
                fn into_expression(self) -> Expression<Option<$target>> {
                    Expression::from_expr(Expr::Literal(self.to_sql_value()))
                }
            }
        )+)+
    };
}

impl_literal_expression! {
    bool => [bool];
    i32 => [i32, i16, i8, u16, u8];
    i64 => [i64, i32, i16, i8, u32, u16, u8];
    f64 => [f64, f32, i32];
    String => [String, &str, &String];
    NaiveDate => [NaiveDate];
    NaiveDateTime => [NaiveDateTime];
    NaiveTime => [NaiveTime];
    Vec<u8> => [Vec<u8>, &[u8]];
}

fn binary<L, R, O>(left: Expression<L>, op: BinaryOp, right: Expression<R>) -> Expression<O> {
    Expression::from_expr(Expr::binary(left.into_expr(), op, right.into_expr()))
}

fn column_function<T, U>(name: &str, arg: Expression<T>) -> Expression<U> {
    Expression::from_expr(Expr::Function(FunctionCall::Column {
        name: String::from(name),
        arg: Box::new(arg.into_expr()),
    }))
}

/// Operators available on every typed expression and column handle.
///
/// ```rust
/// use quarry_core::expr::ExpressionOps;
/// use quarry_core::schema::Table;
///
/// let mut cities = Table::new("Cities");
/// let id = cities.integer("id").add().unwrap();
/// let name = cities.varchar("name", 50).add().unwrap();
///
/// let predicate = id.gt(3).and(name.like("Par%"));
/// # let _ = predicate;
/// ```
pub trait ExpressionOps<T>: IntoExpression<T> + Sized {
    /// Converts `self` into a typed expression.
    fn expression(self) -> Expression<T> {
        self.into_expression()
    }

    /// Creates `self = other`. Comparing with NULL renders `IS NULL`.
    fn eq(self, other: impl IntoExpression<T>) -> Expression<bool> {
        binary(self.into_expression(), BinaryOp::Eq, other.into_expression())
    }

    /// Creates `self <> other`. Comparing with NULL renders `IS NOT NULL`.
    fn not_eq(self, other: impl IntoExpression<T>) -> Expression<bool> {
        binary(self.into_expression(), BinaryOp::NotEq, other.into_expression())
    }

    /// Creates `self < other`.
    fn lt(self, other: impl IntoExpression<T>) -> Expression<bool> {
        binary(self.into_expression(), BinaryOp::Lt, other.into_expression())
    }

    /// Creates `self <= other`.
    fn lt_eq(self, other: impl IntoExpression<T>) -> Expression<bool> {
        binary(self.into_expression(), BinaryOp::LtEq, other.into_expression())
    }

    /// Creates `self > other`.
    fn gt(self, other: impl IntoExpression<T>) -> Expression<bool> {
        binary(self.into_expression(), BinaryOp::Gt, other.into_expression())
    }

    /// Creates `self >= other`.
    fn gt_eq(self, other: impl IntoExpression<T>) -> Expression<bool> {
        binary(self.into_expression(), BinaryOp::GtEq, other.into_expression())
    }

    /// Creates `self LIKE pattern`.
    fn like(self, pattern: impl IntoExpression<T>) -> Expression<bool> {
        binary(self.into_expression(), BinaryOp::Like, pattern.into_expression())
    }

    /// Creates `self IN (?, ...)`.
    fn in_list<V: ToSqlValue>(self, values: impl IntoIterator<Item = V>) -> Expression<bool> {
        Expression::from_expr(Expr::InList {
            operand: Box::new(self.into_expression().into_expr()),
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: false,
        })
    }

    /// Creates `self NOT IN (?, ...)`.
    fn not_in_list<V: ToSqlValue>(self, values: impl IntoIterator<Item = V>) -> Expression<bool> {
        Expression::from_expr(Expr::InList {
            operand: Box::new(self.into_expression().into_expr()),
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: true,
        })
    }

    /// Creates `self IN (SELECT ...)`.
    fn in_query(self, query: Query) -> Expression<bool> {
        Expression::from_expr(Expr::InQuery {
            operand: Box::new(self.into_expression().into_expr()),
            query: Box::new(query),
            negated: false,
        })
    }

    /// Creates `self NOT IN (SELECT ...)`.
    fn not_in_query(self, query: Query) -> Expression<bool> {
        Expression::from_expr(Expr::InQuery {
            operand: Box::new(self.into_expression().into_expr()),
            query: Box::new(query),
            negated: true,
        })
    }

    /// Creates `self IS NULL`.
    fn is_null(self) -> Expression<bool> {
        Expression::from_expr(Expr::IsNull {
            operand: Box::new(self.into_expression().into_expr()),
            negated: false,
        })
    }

    /// Creates `self IS NOT NULL`.
    fn is_not_null(self) -> Expression<bool> {
        Expression::from_expr(Expr::IsNull {
            operand: Box::new(self.into_expression().into_expr()),
            negated: true,
        })
    }

    /// Creates `self + other`.
    fn plus(self, other: impl IntoExpression<T>) -> Expression<T> {
        binary(self.into_expression(), BinaryOp::Add, other.into_expression())
    }

    /// Creates `self - other`.
    fn minus(self, other: impl IntoExpression<T>) -> Expression<T> {
        binary(self.into_expression(), BinaryOp::Sub, other.into_expression())
    }

    /// Creates `self * other`.
    fn times(self, other: impl IntoExpression<T>) -> Expression<T> {
        binary(self.into_expression(), BinaryOp::Mul, other.into_expression())
    }

    /// Creates `self / other`.
    fn divide(self, other: impl IntoExpression<T>) -> Expression<T> {
        binary(self.into_expression(), BinaryOp::Div, other.into_expression())
    }

    /// Names the expression. Selected as `expr AS name`, referenced as `name`.
    fn alias(self, name: impl Into<String>) -> Expression<T> {
        Expression::from_expr(Expr::Alias {
            expr: Box::new(self.into_expression().into_expr()),
            name: Name::identifier(name),
        })
    }

    /// Creates `COUNT(self)`.
    fn count(self) -> Expression<i64> {
        Expression::from_expr(Expr::Function(FunctionCall::Count(Some(Box::new(
            self.into_expression().into_expr(),
        )))))
    }

    /// Creates `COUNT(DISTINCT self)`.
    fn count_distinct(self) -> Expression<i64> {
        Expression::from_expr(Expr::Function(FunctionCall::CountDistinct(Some(Box::new(
            self.into_expression().into_expr(),
        )))))
    }

    /// Creates `MIN(self)`.
    fn min(self) -> Expression<T> {
        column_function("MIN", self.into_expression())
    }

    /// Creates `MAX(self)`.
    fn max(self) -> Expression<T> {
        column_function("MAX", self.into_expression())
    }

    /// Creates `SUM(self)`.
    fn sum(self) -> Expression<T> {
        column_function("SUM", self.into_expression())
    }

    /// Creates `AVG(self)`.
    fn average(self) -> Expression<f64> {
        column_function("AVG", self.into_expression())
    }
}

impl<T> ExpressionOps<T> for Expression<T> {}

impl<T> ExpressionOps<T> for &Column<T> {}

/// Creates a literal expression bound through a placeholder.
pub fn literal<T>(value: impl IntoExpression<T>) -> Expression<T> {
    value.into_expression()
}

/// Creates the `NULL` literal. Use `literal::<T>(null())` for a typed `NULL` operand.
#[must_use]
pub const fn null() -> Null {
    Null
}

/// Creates `COUNT(*)`.
#[must_use]
pub const fn count_all() -> Expression<i64> {
    Expression::from_expr(Expr::Function(FunctionCall::Count(None)))
}

/// Creates `NAME(arg, ...)`.
///
/// Expression arguments render in place; [`FunctionArg::Value`] arguments
/// are bound through placeholders.
pub fn function<T>(
    name: impl Into<String>,
    args: impl IntoIterator<Item = FunctionArg>,
) -> Expression<T> {
    Expression::from_expr(Expr::Function(FunctionCall::General {
        name: name.into(),
        args: args.into_iter().collect(),
    }))
}

/// Creates `NOT predicate`.
pub fn not(predicate: impl IntoExpression<bool>) -> Expression<bool> {
    Expression::from_expr(Expr::Not(Box::new(predicate.into_expression().into_expr())))
}

/// Uses a query as a scalar value, `(SELECT ...)`.
#[must_use]
pub fn subquery<T>(query: Query) -> Expression<T> {
    Expression::from_expr(Expr::SubQuery(Box::new(query)))
}

/// Selects every column of `element`, `T.*`.
pub fn all_columns(element: impl Into<CompoundElement>) -> Expr {
    Expr::AllColumns(element.into())
}

/// Builder for a CASE expression producing values of type `T`.
///
/// ```rust
/// use quarry_core::expr::{Case, ExpressionOps};
/// use quarry_core::schema::Table;
///
/// let mut cities = Table::new("Cities");
/// let id = cities.integer("id").add().unwrap();
///
/// let size: quarry_core::expr::Expression<String> = Case::new()
///     .when(id.lt(10), "small")
///     .otherwise("large");
/// # let _ = size;
/// ```
pub struct Case<T> {
    case: CaseExpr,
    _type: PhantomData<fn() -> T>,
}

impl<T> Case<T> {
    /// Starts a searched CASE, `CASE WHEN condition THEN ...`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            case: CaseExpr::default(),
            _type: PhantomData,
        }
    }

    /// Starts a simple CASE comparing `target` with each WHEN value.
    pub fn on(target: impl Into<Expr>) -> Self {
        let mut case = Self::new();
        case.case.target = Some(Box::new(target.into()));
        case
    }

    /// Adds a `WHEN when THEN then` pair.
    #[must_use]
    pub fn when(mut self, when: impl Into<Expr>, then: impl IntoExpression<T>) -> Self {
        self.case.clauses.push(WhenThen {
            when: when.into(),
            then: then.into_expression().into_expr(),
        });
        self
    }

    /// Finishes the expression with an ELSE result.
    pub fn otherwise(mut self, value: impl IntoExpression<T>) -> Expression<T> {
        self.case.otherwise = Some(Box::new(value.into_expression().into_expr()));
        self.end()
    }

    /// Finishes the expression without an ELSE result.
    #[must_use]
    pub fn end(self) -> Expression<T> {
        Expression::from_expr(Expr::Case(self.case))
    }
}

impl<T> Default for Case<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Case<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Case").field(&self.case).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Table;

    fn cities() -> (Table, Column<i32>, Column<String>, Column<Option<i64>>) {
        let mut table = Table::new("Cities");
        let id = table.integer("id").add().unwrap();
        let name = table.varchar("name", 50).add().unwrap();
        let population = table.long("population").nullable().add().unwrap();
        (table, id, name, population)
    }

    #[test]
    fn test_comparison_builds_binary_node() {
        let (_, id, _, _) = cities();
        let expr = id.eq(5).into_expr();
        match expr {
            Expr::Binary { left, op, right } => {
                assert_eq!(op, BinaryOp::Eq);
                assert!(matches!(*left, Expr::Named(ref n) if n.to_string() == "Cities.id"));
                assert!(matches!(*right, Expr::Literal(SqlValue::Int(5))));
            }
            other => panic!("unexpected expression: {other:?}"),
        }
    }

    #[test]
    fn test_nullable_column_accepts_plain_and_null_values() {
        let (_, _, _, population) = cities();
        let plain = population.gt(1_000_i64).into_expr();
        assert!(matches!(plain, Expr::Binary { op: BinaryOp::Gt, .. }));

        let missing = population.eq(None::<i64>).into_expr();
        assert!(matches!(missing, Expr::Binary { ref right, .. } if right.is_null_literal()));
    }

    #[test]
    fn test_null_converts_for_nullable_and_plain_columns() {
        let (_, _, name, population) = cities();
        let nullable = population.eq(null()).into_expr();
        assert!(matches!(nullable, Expr::Binary { ref right, .. } if right.is_null_literal()));

        let plain = name.not_eq(null()).into_expr();
        assert!(matches!(plain, Expr::Binary { op: BinaryOp::NotEq, ref right, .. } if right.is_null_literal()));

        let typed: Expression<Option<i64>> = literal(null());
        assert!(typed.as_expr().is_null_literal());
    }

    #[test]
    fn test_string_literals() {
        let (_, _, name, _) = cities();
        let owned = name.eq(String::from("Paris")).into_expr();
        let borrowed = name.like("Par%").into_expr();
        assert!(matches!(owned, Expr::Binary { right, .. } if matches!(*right, Expr::Literal(SqlValue::Text(_)))));
        assert!(matches!(borrowed, Expr::Binary { op: BinaryOp::Like, .. }));
    }

    #[test]
    fn test_logical_combinators() {
        let (_, id, name, _) = cities();
        let expr = id.gt(1).and(name.eq("a")).or(id.is_null()).into_expr();
        match expr {
            Expr::Binary { left, op: BinaryOp::Or, right } => {
                assert_eq!(left.binary_op(), Some(BinaryOp::And));
                assert!(matches!(*right, Expr::IsNull { negated: false, .. }));
            }
            other => panic!("unexpected expression: {other:?}"),
        }
    }

    #[test]
    fn test_in_list_collects_values() {
        let (_, id, _, _) = cities();
        let expr = id.not_in_list([1, 2, 3]).into_expr();
        match expr {
            Expr::InList { values, negated, .. } => {
                assert!(negated);
                assert_eq!(values, vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]);
            }
            other => panic!("unexpected expression: {other:?}"),
        }
    }

    #[test]
    fn test_aggregates_and_alias() {
        let (_, id, _, _) = cities();
        assert!(matches!(
            id.count_distinct().into_expr(),
            Expr::Function(FunctionCall::CountDistinct(Some(_)))
        ));
        assert!(matches!(
            id.max().into_expr(),
            Expr::Function(FunctionCall::Column { ref name, .. }) if name == "MAX"
        ));
        assert!(matches!(
            id.alias("n").into_expr(),
            Expr::Alias { ref name, .. } if name.id() == "n"
        ));
        assert!(matches!(
            count_all().into_expr(),
            Expr::Function(FunctionCall::Count(None))
        ));
    }

    #[test]
    fn test_case_builder() {
        let (_, id, _, _) = cities();
        let expr: Expression<String> = Case::on(&id)
            .when(literal::<i32>(1), "one")
            .when(literal::<i32>(2), "two")
            .end();
        match expr.into_expr() {
            Expr::Case(case) => {
                assert!(case.target.is_some());
                assert_eq!(case.clauses.len(), 2);
                assert!(case.otherwise.is_none());
            }
            other => panic!("unexpected expression: {other:?}"),
        }
    }

    #[test]
    fn test_general_function_arguments() {
        let (_, _, name, _) = cities();
        let expr: Expression<String> =
            function("CONCAT", [FunctionArg::from(&name), FunctionArg::value("!")]);
        match expr.into_expr() {
            Expr::Function(FunctionCall::General { name, args }) => {
                assert_eq!(name, "CONCAT");
                assert!(matches!(args[0], FunctionArg::Expr(Expr::Named(_))));
                assert!(matches!(args[1], FunctionArg::Value(SqlValue::Text(_))));
            }
            other => panic!("unexpected expression: {other:?}"),
        }
    }
}
