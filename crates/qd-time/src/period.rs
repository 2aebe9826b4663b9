//! Length of time expressed as a number of time units.

use std::fmt;

use qd_core::{Error, Result};

use crate::frequency::Frequency;
use crate::time_unit::TimeUnit;

/// A tenor such as "3 months" or "30 years".
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    length: i32,
    unit: TimeUnit,
}

impl Period {
    /// Creates a period of `length` units.
    pub fn new(length: i32, unit: TimeUnit) -> Period {
        Period { length, unit }
    }

    /// Creates the period between two events of the given frequency.
    pub fn from_frequency(frequency: Frequency) -> Result<Period> {
        match frequency {
            Frequency::Once => Ok(Period::new(0, TimeUnit::Years)),
            Frequency::Annual => Ok(Period::new(1, TimeUnit::Years)),
            Frequency::Semiannual => Ok(Period::new(6, TimeUnit::Months)),
            Frequency::Quarterly => Ok(Period::new(3, TimeUnit::Months)),
            Frequency::Monthly => Ok(Period::new(1, TimeUnit::Months)),
            Frequency::NoFrequency => Err(Error::InvalidArgument(
                "no period corresponds to NoFrequency".into(),
            )),
        }
    }

    /// Number of units in this period.
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Unit this period is expressed in.
    pub fn units(&self) -> TimeUnit {
        self.unit
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            TimeUnit::Days => "D",
            TimeUnit::Weeks => "W",
            TimeUnit::Months => "M",
            TimeUnit::Years => "Y",
        };
        write!(f, "{}{}", self.length, suffix)
    }
}

impl fmt::Debug for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Period({})", self)
    }
}
