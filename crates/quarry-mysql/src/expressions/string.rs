//! String and hash functions.

use quarry_core::expr::{function, FunctionArg};
use quarry_core::query::IntoSelection;
use quarry_core::{Expression, IntoExpression, ToSqlValue};

/// `CONCAT(a, b, ...)`.
///
/// Any argument being `NULL` makes the whole result `NULL`.
pub fn concat(parts: impl IntoSelection) -> Expression<String> {
    function(
        "CONCAT",
        parts.into_selection().into_iter().map(FunctionArg::from),
    )
}

/// `HEX(?)`: the hexadecimal form of a string or an integer.
pub fn hex(value: impl ToSqlValue) -> Expression<String> {
    function("HEX", [FunctionArg::value(value)])
}

/// `UNHEX(?)`: the bytes spelled by pairs of hexadecimal digits.
pub fn unhex(value: &str) -> Expression<String> {
    function("UNHEX", [FunctionArg::value(value)])
}

/// `FORMAT(x, ?)`: a number rounded to `decimals` places with thousands
/// separators.
pub fn format(value: impl IntoExpression<f64>, decimals: i32) -> Expression<String> {
    function(
        "FORMAT",
        [
            FunctionArg::from(value.into_expression()),
            FunctionArg::value(decimals),
        ],
    )
}
