//! Date parts, interval arithmetic, timezone conversion and truncation.

use chrono::{NaiveDate, NaiveDateTime};
use quarry_core::dialect::{Dialect, DialectExtension, SqlBuilder};
use quarry_core::expr::{function, Expr, FunctionArg, FunctionCall};
use quarry_core::{
    Column, CompileError, Expression, ExpressionOps, IntoExpression, Result, TimeUnit, ToSqlValue,
};

/// The timezone assumed for stored values when none is given.
const UTC: &str = "UTC";

/// Returns the MySQL keyword for an interval unit.
fn interval_unit(unit: TimeUnit) -> Result<&'static str> {
    Ok(match unit {
        TimeUnit::Micros => "MICROSECOND",
        TimeUnit::Seconds => "SECOND",
        TimeUnit::Minutes => "MINUTE",
        TimeUnit::Hours => "HOUR",
        TimeUnit::Days => "DAY",
        TimeUnit::Weeks => "WEEK",
        TimeUnit::Months => "MONTH",
        TimeUnit::Years => "YEAR",
        TimeUnit::Nanos | TimeUnit::Millis | TimeUnit::Decades => {
            return Err(CompileError::UnsupportedTimeUnit {
                unit,
                context: "MySQL intervals",
            });
        }
    })
}

fn column_function<T>(name: &str, arg: Expr) -> Expression<T> {
    Expression::from_expr(Expr::Function(FunctionCall::Column {
        name: String::from(name),
        arg: Box::new(arg),
    }))
}

/// An `INTERVAL` operand.
#[derive(Debug, Clone)]
pub enum Interval {
    /// `INTERVAL amount UNIT`.
    Static {
        /// The number of units.
        amount: Expr,
        /// The unit.
        unit: TimeUnit,
    },
    /// `INTERVAL EXTRACT(UNIT FROM source) [+ offset] UNIT`.
    Extract {
        /// The date/time value the unit is read from.
        source: Expr,
        /// The unit.
        unit: TimeUnit,
        /// Units added to the extracted value.
        offset: i32,
    },
}

impl DialectExtension for Interval {
    fn append_to(&self, builder: &mut SqlBuilder, dialect: &dyn Dialect) -> Result<()> {
        match self {
            Self::Static { amount, unit } => {
                let unit = interval_unit(*unit)?;
                builder.push_str("INTERVAL ");
                dialect.expression_sql(builder, amount)?;
                builder.push(' ').push_str(unit);
            }
            Self::Extract {
                source,
                unit,
                offset,
            } => {
                let unit = interval_unit(*unit)?;
                builder.push_str("INTERVAL EXTRACT(").push_str(unit).push_str(" FROM ");
                dialect.expression_sql(builder, source)?;
                builder.push(')');
                if *offset != 0 {
                    builder.push_str(" + ");
                    dialect.literal_sql(builder, &(*offset).to_sql_value());
                }
                builder.push(' ').push_str(unit);
            }
        }
        Ok(())
    }
}

/// `DATE_ADD(value, INTERVAL ...)` or `DATE_SUB(value, INTERVAL ...)`.
#[derive(Debug, Clone)]
pub struct DateMath {
    name: &'static str,
    value: Expr,
    interval: Interval,
}

impl DateMath {
    fn new(name: &'static str, value: Expr, amount: Expr, unit: TimeUnit) -> Self {
        Self {
            name,
            value,
            interval: Interval::Static { amount, unit },
        }
    }
}

impl DialectExtension for DateMath {
    fn append_to(&self, builder: &mut SqlBuilder, dialect: &dyn Dialect) -> Result<()> {
        builder.push_str(self.name).push('(');
        dialect.expression_sql(builder, &self.value)?;
        builder.push_str(", ");
        self.interval.append_to(builder, dialect)?;
        builder.push(')');
        Ok(())
    }
}

/// Truncation of a date/time value to the start of a unit.
///
/// Supported units are seconds through years; weeks start on Sunday.
#[derive(Debug, Clone)]
pub struct DateTruncate {
    value: Expr,
    unit: TimeUnit,
    offset: i32,
}

impl DateTruncate {
    /// Truncates `value` to the start of `unit`.
    pub fn new<T>(value: impl IntoExpression<T>, unit: TimeUnit) -> Self {
        Self {
            value: value.into_expression().into_expr(),
            unit,
            offset: 0,
        }
    }

    /// Adds `offset` units to the truncated sub-day component.
    #[must_use]
    pub const fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    fn day_start(&self, part: &str) -> Expr {
        let day_of = column_function::<i32>(part, self.value.clone()).minus(1);
        Expr::extension(DateMath::new(
            "DATE_SUB",
            date_of(self.value.clone()),
            day_of.into_expr(),
            TimeUnit::Days,
        ))
    }
}

fn date_of(value: Expr) -> Expr {
    column_function::<NaiveDate>("DATE", value).into_expr()
}

fn unsupported_truncation(unit: TimeUnit) -> CompileError {
    CompileError::UnsupportedTimeUnit {
        unit,
        context: "MySQL date truncation",
    }
}

impl DialectExtension for DateTruncate {
    fn append_to(&self, builder: &mut SqlBuilder, dialect: &dyn Dialect) -> Result<()> {
        if self.unit.is_sub_day() {
            let components: &[TimeUnit] = match self.unit {
                TimeUnit::Hours => &[TimeUnit::Hours],
                TimeUnit::Minutes => &[TimeUnit::Hours, TimeUnit::Minutes],
                TimeUnit::Seconds => &[TimeUnit::Hours, TimeUnit::Minutes, TimeUnit::Seconds],
                other => return Err(unsupported_truncation(other)),
            };
            builder.push('(');
            dialect.expression_sql(builder, &date_of(self.value.clone()))?;
            for unit in components {
                builder.push_str(" + ");
                let interval = Interval::Extract {
                    source: self.value.clone(),
                    unit: *unit,
                    offset: if *unit == self.unit { self.offset } else { 0 },
                };
                interval.append_to(builder, dialect)?;
            }
            builder.push(')');
            return Ok(());
        }

        let truncated = match self.unit {
            TimeUnit::Days => date_of(self.value.clone()),
            TimeUnit::Weeks => self.day_start("DAYOFWEEK"),
            TimeUnit::Months => self.day_start("DAYOFMONTH"),
            TimeUnit::Years => self.day_start("DAYOFYEAR"),
            other => return Err(unsupported_truncation(other)),
        };
        dialect.expression_sql(builder, &truncated)
    }
}

/// MySQL date and time functions on any expression or column.
///
/// ```rust
/// use quarry_core::{Dialect, Table, TimeUnit};
/// use quarry_mysql::expressions::DateExpressions;
/// use quarry_mysql::MySqlDialect;
///
/// let mut events = Table::new("Events");
/// let at = events.datetime("at").add()?;
///
/// let stmt = MySqlDialect::new().compile(events.select(at.date_add(3, TimeUnit::Hours)))?;
/// assert_eq!(stmt.sql(), "SELECT DATE_ADD(Events.`at`, INTERVAL ? HOUR) FROM Events");
/// # Ok::<(), quarry_core::CompileError>(())
/// ```
pub trait DateExpressions<T>: IntoExpression<T> + Sized {
    /// `DATE(x)`: the date part.
    fn date(self) -> Expression<NaiveDate> {
        column_function("DATE", self.into_expression().into_expr())
    }

    /// `YEAR(x)`.
    fn year(self) -> Expression<i32> {
        column_function("YEAR", self.into_expression().into_expr())
    }

    /// `MONTH(x)`, 1 through 12.
    fn month(self) -> Expression<i32> {
        column_function("MONTH", self.into_expression().into_expr())
    }

    /// `DAYOFMONTH(x)`.
    fn day(self) -> Expression<i32> {
        self.day_of_month()
    }

    /// `DAYOFMONTH(x)`.
    fn day_of_month(self) -> Expression<i32> {
        column_function("DAYOFMONTH", self.into_expression().into_expr())
    }

    /// `DAYOFWEEK(x)`: 1 = Sunday through 7 = Saturday.
    fn day_of_week(self) -> Expression<i32> {
        column_function("DAYOFWEEK", self.into_expression().into_expr())
    }

    /// `WEEKDAY(x)`: 0 = Monday through 6 = Sunday.
    fn week_day(self) -> Expression<i32> {
        column_function("WEEKDAY", self.into_expression().into_expr())
    }

    /// `DAYOFYEAR(x)`.
    fn day_of_year(self) -> Expression<i32> {
        column_function("DAYOFYEAR", self.into_expression().into_expr())
    }

    /// `DATE_ADD(x, INTERVAL amount UNIT)`.
    fn date_add(self, amount: impl IntoExpression<i64>, unit: TimeUnit) -> Expression<NaiveDateTime> {
        Expression::extension(DateMath::new(
            "DATE_ADD",
            self.into_expression().into_expr(),
            amount.into_expression().into_expr(),
            unit,
        ))
    }

    /// `DATE_SUB(x, INTERVAL amount UNIT)`.
    fn date_sub(self, amount: impl IntoExpression<i64>, unit: TimeUnit) -> Expression<NaiveDateTime> {
        Expression::extension(DateMath::new(
            "DATE_SUB",
            self.into_expression().into_expr(),
            amount.into_expression().into_expr(),
            unit,
        ))
    }

    /// `convert_tz(x, 'UTC', to)`.
    fn convert_time_zone(self, to: &str) -> Expression<T> {
        self.convert_time_zone_from(to, UTC)
    }

    /// `convert_tz(x, from, to)`.
    fn convert_time_zone_from(self, to: &str, from: &str) -> Expression<T> {
        function(
            "convert_tz",
            [
                FunctionArg::from(self.into_expression()),
                FunctionArg::value(from),
                FunctionArg::value(to),
            ],
        )
    }

    /// Truncates the value to the start of `unit`.
    fn truncate_to(self, unit: TimeUnit) -> Expression<NaiveDateTime> {
        DateTruncate::new::<T>(self, unit).into_expression()
    }

    /// Converts a UTC value to the timezone `to`, then truncates it.
    fn truncate_to_zone(self, unit: TimeUnit, to: &str) -> Expression<NaiveDateTime> {
        self.truncate_to_zone_from(unit, to, UTC)
    }

    /// Converts a value from the timezone `from` to `to`, then truncates it.
    fn truncate_to_zone_from(self, unit: TimeUnit, to: &str, from: &str) -> Expression<NaiveDateTime> {
        self.convert_time_zone_from(to, from).truncate_to(unit)
    }
}

impl<T> DateExpressions<T> for Expression<T> {}

impl<T> DateExpressions<T> for &Column<T> {}

impl IntoExpression<NaiveDateTime> for DateTruncate {
    fn into_expression(self) -> Expression<NaiveDateTime> {
        Expression::extension(self)
    }
}
