//! Conventions for rolling dates that fall on non-business days.

use std::fmt;

/// Rule applied when an unadjusted date lands on a holiday or weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// Move to the first business day after the date.
    Following,
    /// Move to the first business day after the date, unless that day
    /// falls in the next month, in which case move backward instead.
    ModifiedFollowing,
    /// Move to the first business day before the date.
    Preceding,
    /// Move to the first business day before the date, unless that day
    /// falls in the previous month, in which case move forward instead.
    ModifiedPreceding,
    /// Leave the date alone.
    Unadjusted,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        };
        write!(f, "{}", name)
    }
}
