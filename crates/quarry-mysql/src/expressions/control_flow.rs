//! Control-flow functions.

use quarry_core::expr::{function, FunctionArg};
use quarry_core::{Expression, IntoExpression};

/// `IFNULL(expr, when_null)`: `expr` unless it is `NULL`, else `when_null`.
pub fn if_null<T>(expr: impl IntoExpression<T>, when_null: impl IntoExpression<T>) -> Expression<T> {
    function(
        "IFNULL",
        [
            FunctionArg::from(expr.into_expression()),
            FunctionArg::from(when_null.into_expression()),
        ],
    )
}
