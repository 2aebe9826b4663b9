//! Units of date arithmetic.

use std::fmt;

/// Units in which a [`Period`](crate::Period) length is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Calendar days.
    Days,
    /// Calendar weeks.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Days => "Day(s)",
            TimeUnit::Weeks => "Week(s)",
            TimeUnit::Months => "Month(s)",
            TimeUnit::Years => "Year(s)",
        };
        write!(f, "{}", name)
    }
}
