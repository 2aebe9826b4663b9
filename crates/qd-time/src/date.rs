//! Concrete date in the Gregorian calendar.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use qd_core::{Error, Result};

use crate::weekday::Weekday;
use crate::TimeUnit;

/// Days between the civil epoch (1 January 1970) and serial number zero.
///
/// Chosen so that serial 367 corresponds to 1 January 1901, the same
/// numbering spreadsheets use for dates in the supported range.
const SERIAL_AT_EPOCH: i32 = 25_569;

/// A date, stored as a serial day number.
///
/// The supported range is 1 January 1901 ([`Date::MIN`]) through
/// 31 December 2199 ([`Date::MAX`]). Dates are `Copy` and totally
/// ordered by their serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

impl Date {
    /// Earliest representable date, 1 January 1901.
    pub const MIN: Date = Date(367);

    /// Latest representable date, 31 December 2199.
    pub const MAX: Date = Date(109_574);

    /// Creates a date from its serial number.
    pub fn from_serial(serial: i32) -> Result<Date> {
        if !(Date::MIN.0..=Date::MAX.0).contains(&serial) {
            return Err(Error::Date(format!(
                "serial number {} outside [{}, {}]",
                serial,
                Date::MIN.0,
                Date::MAX.0
            )));
        }
        Ok(Date(serial))
    }

    /// Creates a date from a calendar year, month (1-12), and day of month.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Date> {
        if !(1901..=2199).contains(&year) {
            return Err(Error::Date(format!("year {} outside [1901, 2199]", year)));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {} outside [1, 12]", month)));
        }
        let last = days_in_month(year, month);
        if !(1..=last).contains(&day) {
            return Err(Error::Date(format!(
                "day {} outside [1, {}] for {}/{}",
                day, last, year, month
            )));
        }
        Ok(Date(days_from_civil(year, month, day) + SERIAL_AT_EPOCH))
    }

    /// Serial number of this date.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.civil().0
    }

    /// Month of year, 1 through 12.
    pub fn month(&self) -> u32 {
        self.civil().1
    }

    /// Day of month, 1 through 31.
    pub fn day_of_month(&self) -> u32 {
        self.civil().2
    }

    /// Day of week.
    pub fn weekday(&self) -> Weekday {
        let days = self.0 - SERIAL_AT_EPOCH;
        // 1 January 1970 was a Thursday.
        let ordinal = (days + 3).rem_euclid(7) as u8 + 1;
        Weekday::from_ordinal(ordinal)
    }

    /// Returns this date shifted by a whole number of days.
    pub fn add_days(self, days: i32) -> Date {
        Date(self.0 + days)
    }

    /// Returns this date advanced by `n` units of time.
    ///
    /// Month and year arithmetic clamps to the end of the target month,
    /// so 31 January advanced by one month gives the last day of
    /// February.
    pub fn advance(self, n: i32, unit: TimeUnit) -> Date {
        match unit {
            TimeUnit::Days => self.add_days(n),
            TimeUnit::Weeks => self.add_days(7 * n),
            TimeUnit::Months => self.add_months(n),
            TimeUnit::Years => self.add_months(12 * n),
        }
    }

    fn add_months(self, n: i32) -> Date {
        let (y, m, d) = self.civil();
        let months = y * 12 + (m as i32 - 1) + n;
        let year = months.div_euclid(12);
        let month = months.rem_euclid(12) as u32 + 1;
        let day = d.min(days_in_month(year, month));
        Date(days_from_civil(year, month, day) + SERIAL_AT_EPOCH)
    }

    /// Last calendar day of this date's month.
    pub fn end_of_month(self) -> Date {
        let (y, m, _) = self.civil();
        Date(days_from_civil(y, m, days_in_month(y, m)) + SERIAL_AT_EPOCH)
    }

    /// Whether this date is the last calendar day of its month.
    pub fn is_end_of_month(&self) -> bool {
        let (y, m, d) = self.civil();
        d == days_in_month(y, m)
    }

    /// Crate-internal constructor for components already known to be valid.
    pub(crate) fn from_ymd_unchecked(year: i32, month: u32, day: u32) -> Date {
        Date(days_from_civil(year, month, day) + SERIAL_AT_EPOCH)
    }

    fn civil(&self) -> (i32, u32, u32) {
        civil_from_days(self.0 - SERIAL_AT_EPOCH)
    }
}

// Civil-day conversions follow Howard Hinnant's branchless date
// algorithms, working in 400-year eras of 146097 days each.

fn days_from_civil(year: i32, month: u32, day: u32) -> i32 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u32;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe as i32 - 719_468
}

fn civil_from_days(days: i32) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe as i32 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (if month <= 2 { y + 1 } else { y }, month, day)
}

/// Whether `year` is a leap year in the Gregorian calendar.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of calendar days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

// ── Operators ────────────────────────────────────────────────────────────

impl Add<i32> for Date {
    type Output = Date;

    fn add(self, days: i32) -> Date {
        self.add_days(days)
    }
}

impl Sub<i32> for Date {
    type Output = Date;

    fn sub(self, days: i32) -> Date {
        self.add_days(-days)
    }
}

impl AddAssign<i32> for Date {
    fn add_assign(&mut self, days: i32) {
        self.0 += days;
    }
}

impl SubAssign<i32> for Date {
    fn sub_assign(&mut self, days: i32) {
        self.0 -= days;
    }
}

impl Sub<Date> for Date {
    type Output = i32;

    /// Number of days between two dates.
    fn sub(self, other: Date) -> i32 {
        self.0 - other.0
    }
}

// ── Formatting ───────────────────────────────────────────────────────────

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.civil();
        write!(f, "{} {} {}", d, MONTH_NAMES[(m - 1) as usize], y)
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.civil();
        write!(f, "Date({:04}-{:02}-{:02})", y, m, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn serial_numbers_match_spreadsheet_convention() {
        assert_eq!(date(1901, 1, 1).serial(), 367);
        assert_eq!(date(2199, 12, 31).serial(), Date::MAX.serial());
        assert_eq!(Date::from_serial(367).unwrap(), Date::MIN);
    }

    #[test]
    fn round_trips_through_serial() {
        for &(y, m, d) in &[
            (1901, 1, 1),
            (1999, 12, 31),
            (2000, 2, 29),
            (2014, 1, 13),
            (2041, 9, 1),
            (2199, 12, 31),
        ] {
            let dt = date(y, m, d);
            let back = Date::from_serial(dt.serial()).unwrap();
            assert_eq!((back.year(), back.month(), back.day_of_month()), (y, m, d));
        }
    }

    #[test]
    fn rejects_invalid_components() {
        assert!(Date::from_ymd(1900, 12, 31).is_err());
        assert!(Date::from_ymd(2200, 1, 1).is_err());
        assert!(Date::from_ymd(2014, 13, 1).is_err());
        assert!(Date::from_ymd(2014, 2, 29).is_err());
        assert!(Date::from_ymd(2016, 2, 29).is_ok());
        assert!(Date::from_serial(0).is_err());
    }

    #[test]
    fn weekdays_are_correct() {
        assert_eq!(date(2014, 1, 13).weekday(), Weekday::Monday);
        assert_eq!(date(2014, 4, 17).weekday(), Weekday::Thursday);
        assert_eq!(date(2016, 1, 15).weekday(), Weekday::Friday);
        assert_eq!(date(2041, 9, 1).weekday(), Weekday::Sunday);
        assert_eq!(date(1901, 1, 1).weekday(), Weekday::Tuesday);
    }

    #[test]
    fn day_arithmetic() {
        let d = date(2014, 1, 13);
        assert_eq!(d + 1, date(2014, 1, 14));
        assert_eq!(d - 13, date(2013, 12, 31));
        assert_eq!(date(2014, 4, 17) - date(2014, 1, 13), 94);

        let mut m = d;
        m += 365;
        assert_eq!(m, date(2015, 1, 13));
        m -= 365;
        assert_eq!(m, d);
    }

    #[test]
    fn month_arithmetic_clamps_to_month_end() {
        assert_eq!(date(2014, 1, 31).advance(1, TimeUnit::Months), date(2014, 2, 28));
        assert_eq!(date(2016, 1, 31).advance(1, TimeUnit::Months), date(2016, 2, 29));
        assert_eq!(date(2014, 5, 31).advance(1, TimeUnit::Months), date(2014, 6, 30));
        assert_eq!(date(2014, 3, 31).advance(-1, TimeUnit::Months), date(2014, 2, 28));
    }

    #[test]
    fn advance_by_unit() {
        let d = date(2014, 4, 14);
        assert_eq!(d.advance(3, TimeUnit::Days), date(2014, 4, 17));
        assert_eq!(d.advance(2, TimeUnit::Weeks), date(2014, 4, 28));
        assert_eq!(d.advance(6, TimeUnit::Months), date(2014, 10, 14));
        assert_eq!(d.advance(-12, TimeUnit::Months), date(2013, 4, 14));
        assert_eq!(d.advance(27, TimeUnit::Years), date(2041, 4, 14));
    }

    #[test]
    fn end_of_month_detection() {
        assert_eq!(date(2014, 2, 10).end_of_month(), date(2014, 2, 28));
        assert_eq!(date(2016, 2, 10).end_of_month(), date(2016, 2, 29));
        assert!(date(2014, 6, 30).is_end_of_month());
        assert!(!date(2014, 6, 29).is_end_of_month());
    }

    #[test]
    fn leap_year_rules() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2016));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2014));
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
    }

    #[test]
    fn displays_like_a_trade_ticket() {
        assert_eq!(date(2014, 1, 13).to_string(), "13 January 2014");
        assert_eq!(date(2041, 9, 1).to_string(), "1 September 2041");
        assert_eq!(format!("{:?}", date(2014, 1, 13)), "Date(2014-01-13)");
    }
}
