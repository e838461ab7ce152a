//! Time units for date truncation and interval arithmetic.

use std::fmt;

/// Granularity of a date/time operation.
///
/// Dialects decide which units they can express; an unsupported unit is a
/// [`CompileError::UnsupportedTimeUnit`](crate::CompileError::UnsupportedTimeUnit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeUnit {
    /// Nanoseconds.
    Nanos,
    /// Microseconds.
    Micros,
    /// Milliseconds.
    Millis,
    /// Seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days.
    Days,
    /// Weeks.
    Weeks,
    /// Months.
    Months,
    /// Years.
    Years,
    /// Decades.
    Decades,
}

impl TimeUnit {
    /// Returns whether the unit is shorter than a day.
    #[must_use]
    pub fn is_sub_day(self) -> bool {
        self < Self::Days
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nanos => "NANOS",
            Self::Micros => "MICROS",
            Self::Millis => "MILLIS",
            Self::Seconds => "SECONDS",
            Self::Minutes => "MINUTES",
            Self::Hours => "HOURS",
            Self::Days => "DAYS",
            Self::Weeks => "WEEKS",
            Self::Months => "MONTHS",
            Self::Years => "YEARS",
            Self::Decades => "DECADES",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_day() {
        assert!(TimeUnit::Hours.is_sub_day());
        assert!(TimeUnit::Seconds.is_sub_day());
        assert!(!TimeUnit::Days.is_sub_day());
        assert!(!TimeUnit::Years.is_sub_day());
    }
}
