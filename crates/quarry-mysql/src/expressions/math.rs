//! Math functions.

use quarry_core::expr::{function, FunctionArg};
use quarry_core::Expression;

/// `RAND()`, or `RAND(?)` with a seed.
pub fn rand(seed: impl Into<Option<i32>>) -> Expression<f64> {
    function("RAND", seed.into().map(FunctionArg::value))
}
