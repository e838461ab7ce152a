//! MySQL-only expressions.
//!
//! Plain functions are built on [`quarry_core::expr::function`]; constructs
//! with their own syntax (`INTERVAL`, `GROUP_CONCAT ... SEPARATOR`) are
//! [`DialectExtension`](quarry_core::DialectExtension) nodes.

mod control_flow;
mod date;
mod group_concat;
mod math;
mod string;

pub use control_flow::if_null;
pub use date::{DateExpressions, DateMath, DateTruncate, Interval};
pub use group_concat::{group_concat, GroupConcat};
pub use math::rand;
pub use string::{concat, format, hex, unhex};
