//! Business-day calendars.

use std::fmt::Debug;

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;

/// A holiday calendar.
///
/// Implementors provide the holiday rules through
/// [`is_business_day`](Calendar::is_business_day); rolling and counting
/// logic is shared through the default methods.
pub trait Calendar: Debug + Send + Sync {
    /// Name of the calendar.
    fn name(&self) -> String;

    /// Whether the given date is a settlement day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Whether the given date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Whether the given date is the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> bool {
        date.month() != self.adjust(date + 1, BusinessDayConvention::Following).month()
    }

    /// Last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Date {
        self.adjust(date.end_of_month(), BusinessDayConvention::Preceding)
    }

    /// Rolls `date` to a business day according to `convention`.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => {
                let mut d = date;
                while !self.is_business_day(d) {
                    d += 1;
                }
                d
            }
            BusinessDayConvention::ModifiedFollowing => {
                let rolled = self.adjust(date, BusinessDayConvention::Following);
                if rolled.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Preceding)
                } else {
                    rolled
                }
            }
            BusinessDayConvention::Preceding => {
                let mut d = date;
                while !self.is_business_day(d) {
                    d -= 1;
                }
                d
            }
            BusinessDayConvention::ModifiedPreceding => {
                let rolled = self.adjust(date, BusinessDayConvention::Preceding);
                if rolled.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Following)
                } else {
                    rolled
                }
            }
        }
    }

    /// Advances `date` by `n` business days.
    ///
    /// With `n == 0` the date is rolled forward to a business day if it
    /// is not one already.
    fn advance_business_days(&self, date: Date, n: i32) -> Date {
        if n == 0 {
            return self.adjust(date, BusinessDayConvention::Following);
        }
        let step = if n > 0 { 1 } else { -1 };
        let mut d = date;
        let mut remaining = n.abs();
        while remaining > 0 {
            d += step;
            while !self.is_business_day(d) {
                d += step;
            }
            remaining -= 1;
        }
        d
    }
}

/// A calendar with no holidays at all, weekends included.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> String {
        "Null".into()
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// A calendar whose only holidays are Saturdays and Sundays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> String {
        "Weekends only".into()
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.weekday().is_weekend()
    }
}
