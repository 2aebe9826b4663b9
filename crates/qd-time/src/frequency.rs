//! Payment frequency enumeration.

use std::fmt;

/// Frequency of coupon or compounding events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// No explicit frequency, e.g. continuous compounding or a zero bond.
    NoFrequency,
    /// A single payment at maturity.
    Once,
    /// Once a year.
    Annual,
    /// Twice a year.
    Semiannual,
    /// Four times a year.
    Quarterly,
    /// Twelve times a year.
    Monthly,
}

impl Frequency {
    /// Number of events per year, if the frequency defines one.
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Frequency::NoFrequency | Frequency::Once => None,
            Frequency::Annual => Some(1),
            Frequency::Semiannual => Some(2),
            Frequency::Quarterly => Some(4),
            Frequency::Monthly => Some(12),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::NoFrequency => "no frequency",
            Frequency::Once => "once",
            Frequency::Annual => "annual",
            Frequency::Semiannual => "semiannual",
            Frequency::Quarterly => "quarterly",
            Frequency::Monthly => "monthly",
        };
        write!(f, "{}", name)
    }
}
