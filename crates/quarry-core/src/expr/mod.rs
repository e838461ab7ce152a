//! Expression model.
//!
//! [`Expr`] is the untyped expression tree the compiler walks. User code
//! normally builds it through the typed wrapper [`Expression<T>`] and the
//! [`ExpressionOps`] combinators, which keep the SQL value type of every
//! sub-expression in the Rust type system.

mod typed;

use std::sync::Arc;

use crate::dialect::DialectExtension;
use crate::name::Name;
use crate::query::{CompoundElement, Query};
use crate::value::SqlValue;

pub use typed::{
    all_columns, count_all, function, literal, not, null, subquery, Case, Expression,
    ExpressionOps, IntoExpression, Null,
};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Equal (=)
    Eq,
    /// Not equal (<>)
    NotEq,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    LtEq,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    GtEq,
    /// Logical AND
    And,
    /// Logical OR
    Or,
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Pattern match (LIKE)
    Like,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Like => "LIKE",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::Like => 3,
            Self::Add | Self::Sub => 8,
            Self::Mul | Self::Div => 9,
        }
    }

    /// Returns whether the operator is AND or OR.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Returns whether the operator compares two values, LIKE included.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::Like
        )
    }

    /// Returns whether `(a op b) op c` equals `a op (b op c)`.
    #[must_use]
    pub const fn is_associative(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Add | Self::Mul)
    }
}

/// A function call.
#[derive(Debug, Clone)]
pub enum FunctionCall {
    /// `COUNT(x)`, or `COUNT(*)` without an argument.
    Count(Option<Box<Expr>>),
    /// `COUNT(DISTINCT x)`, or `COUNT(DISTINCT *)` without an argument.
    CountDistinct(Option<Box<Expr>>),
    /// A single-argument function such as `MIN(x)` or `YEAR(x)`.
    Column {
        /// Function name.
        name: String,
        /// The argument.
        arg: Box<Expr>,
    },
    /// A named function with ordered arguments.
    General {
        /// Function name.
        name: String,
        /// The arguments.
        args: Vec<FunctionArg>,
    },
}

/// An argument of [`FunctionCall::General`].
#[derive(Debug, Clone)]
pub enum FunctionArg {
    /// An expression rendered in place.
    Expr(Expr),
    /// A raw value bound through a placeholder.
    Value(SqlValue),
}

impl FunctionArg {
    /// Creates a raw value argument.
    pub fn value(value: impl crate::value::ToSqlValue) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl From<Expr> for FunctionArg {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl<T> From<Expression<T>> for FunctionArg {
    fn from(expr: Expression<T>) -> Self {
        Self::Expr(expr.into_expr())
    }
}

impl<T> From<&crate::schema::Column<T>> for FunctionArg {
    fn from(column: &crate::schema::Column<T>) -> Self {
        Self::Expr(Expr::from(column))
    }
}

/// One `WHEN ... THEN ...` pair of a CASE expression.
#[derive(Debug, Clone)]
pub struct WhenThen {
    /// The condition, or the value compared with the CASE target.
    pub when: Expr,
    /// The result.
    pub then: Expr,
}

/// A CASE expression.
#[derive(Debug, Clone, Default)]
pub struct CaseExpr {
    /// The expression compared with each WHEN value, if any.
    pub target: Option<Box<Expr>>,
    /// The WHEN/THEN pairs in order.
    pub clauses: Vec<WhenThen>,
    /// The ELSE result.
    pub otherwise: Option<Box<Expr>>,
}

/// An untyped SQL expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A value bound through a placeholder, or `NULL`.
    Literal(SqlValue),
    /// A reference to a column or alias.
    Named(Name),
    /// A binary operation.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Logical negation.
    Not(Box<Expr>),
    /// `x IS [NOT] NULL`.
    IsNull {
        /// Tested expression.
        operand: Box<Expr>,
        /// Whether this is `IS NOT NULL`.
        negated: bool,
    },
    /// `x [NOT] IN (?, ...)`.
    InList {
        /// Tested expression.
        operand: Box<Expr>,
        /// Candidate values.
        values: Vec<SqlValue>,
        /// Whether this is `NOT IN`.
        negated: bool,
    },
    /// `x [NOT] IN (SELECT ...)`.
    InQuery {
        /// Tested expression.
        operand: Box<Expr>,
        /// The sub-query.
        query: Box<Query>,
        /// Whether this is `NOT IN`.
        negated: bool,
    },
    /// A function call.
    Function(FunctionCall),
    /// A CASE expression.
    Case(CaseExpr),
    /// `(SELECT ...)` used as a value.
    SubQuery(Box<Query>),
    /// An expression with an assigned name.
    ///
    /// Declared as `expr AS name` in a selection list, referenced by `name`
    /// everywhere else.
    Alias {
        /// The aliased expression.
        expr: Box<Expr>,
        /// The alias.
        name: Name,
    },
    /// All columns of a compound element, `T.*`.
    AllColumns(CompoundElement),
    /// A dialect-specific node that renders itself.
    Extension(Arc<dyn DialectExtension>),
}

impl Expr {
    /// Creates a literal.
    #[must_use]
    pub const fn literal(value: SqlValue) -> Self {
        Self::Literal(value)
    }

    /// Creates a named reference.
    #[must_use]
    pub const fn named(name: Name) -> Self {
        Self::Named(name)
    }

    /// Creates a binary operation.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Wraps a dialect extension node.
    pub fn extension(extension: impl DialectExtension + 'static) -> Self {
        Self::Extension(Arc::new(extension))
    }

    /// Returns whether this is the literal `NULL`.
    #[must_use]
    pub const fn is_null_literal(&self) -> bool {
        matches!(self, Self::Literal(SqlValue::Null))
    }

    /// Returns the operator if this is a binary operation.
    #[must_use]
    pub const fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Self::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }
}

impl<T> From<&crate::schema::Column<T>> for Expr {
    fn from(column: &crate::schema::Column<T>) -> Self {
        Self::Named(column.name().clone())
    }
}

impl<T> From<Expression<T>> for Expr {
    fn from(expr: Expression<T>) -> Self {
        expr.into_expr()
    }
}
