//! Day-of-week enumeration.

use std::fmt;

/// Day of the week, numbered from Monday = 1 through Sunday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    /// Monday
    Monday = 1,
    /// Tuesday
    Tuesday = 2,
    /// Wednesday
    Wednesday = 3,
    /// Thursday
    Thursday = 4,
    /// Friday
    Friday = 5,
    /// Saturday
    Saturday = 6,
    /// Sunday
    Sunday = 7,
}

impl Weekday {
    /// Creates a weekday from its ordinal, Monday = 1 through Sunday = 7.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal` is outside 1..=7.
    pub fn from_ordinal(ordinal: u8) -> Weekday {
        match ordinal {
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            7 => Weekday::Sunday,
            _ => panic!("weekday ordinal {} outside [1, 7]", ordinal),
        }
    }

    /// Ordinal of this weekday, Monday = 1 through Sunday = 7.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Whether this day falls on a weekend.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{}", name)
    }
}
