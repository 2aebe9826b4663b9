//! Base trait shared by every term structure.
//!
//! A term structure has a **reference date** (where time is zero), a **day
//! counter** that turns dates into year fractions, a **calendar**, and a
//! **maximum date** beyond which the structure is not defined.

use std::sync::Arc;

use qd_core::Time;
use qd_time::{Calendar, Date, DayCounter};

/// Base trait for all term structures.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The date at which discount = 1.0 and from which time is measured.
    fn reference_date(&self) -> Date;

    /// The day counter used for date to time-fraction conversions.
    fn day_counter(&self) -> Arc<dyn DayCounter>;

    /// The calendar associated with the structure.
    fn calendar(&self) -> &dyn Calendar;

    /// The latest date for which the structure can be queried.
    fn max_date(&self) -> Date;

    /// The latest time for which the structure can be queried.
    fn max_time(&self) -> Time {
        self.time_from_reference(self.max_date())
    }

    /// Converts a date to a year fraction relative to the reference date.
    fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter()
            .year_fraction(self.reference_date(), date)
    }
}

// ── TermStructureData ─────────────────────────────────────────────────────────

/// Common data bundle shared by concrete term structures.
#[derive(Debug)]
pub struct TermStructureData {
    /// Reference date.
    pub reference_date: Date,
    /// Calendar for date adjustments.
    pub calendar: Box<dyn Calendar>,
    /// Day counter for time calculations.
    pub day_counter: Arc<dyn DayCounter>,
}

impl TermStructureData {
    /// Creates a new data bundle.
    pub fn new(
        reference_date: Date,
        calendar: impl Calendar + 'static,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self {
            reference_date,
            calendar: Box::new(calendar),
            day_counter: Arc::new(day_counter),
        }
    }
}
