//! Date and time handling for the quantdesk library.
//!
//! This crate provides the chronological vocabulary the rest of the
//! workspace is written in: serial-number dates, business-day calendars,
//! day-count conventions, payment schedules, and interest rates quoted
//! against a compounding convention.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod business_day_convention;
pub mod calendar;
pub mod calendars;
pub mod date;
pub mod day_counter;
pub mod frequency;
pub mod interest_rate;
pub mod period;
pub mod schedule;
pub mod time_unit;
pub mod weekday;

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, NullCalendar, WeekendsOnly};
pub use calendars::UnitedStates;
pub use date::Date;
pub use day_counter::{
    Actual360, Actual365Fixed, ActualActualIsda, ActualActualIsma, DayCounter,
};
pub use frequency::Frequency;
pub use interest_rate::InterestRate;
pub use period::Period;
pub use schedule::{DateGeneration, Schedule, ScheduleBuilder};
pub use time_unit::TimeUnit;
pub use weekday::Weekday;
