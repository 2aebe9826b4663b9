//! United States settlement calendar.

use crate::calendar::Calendar;
use crate::date::Date;
use crate::weekday::Weekday;

/// United States government bond settlement calendar.
///
/// Covers the federal holidays observed by the bond market, with
/// Saturday holidays moved to the preceding Friday and Sunday holidays
/// to the following Monday.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitedStates;

impl Calendar for UnitedStates {
    fn name(&self) -> String {
        "US settlement".into()
    }

    fn is_business_day(&self, date: Date) -> bool {
        let w = date.weekday();
        if w.is_weekend() {
            return false;
        }
        !is_settlement_holiday(date.year(), date.month(), date.day_of_month(), w)
    }
}

fn is_settlement_holiday(y: i32, m: u32, d: u32, w: Weekday) -> bool {
    let monday = w == Weekday::Monday;
    let friday = w == Weekday::Friday;
    match m {
        1 => {
            // New Year's Day, moved to Monday 2 January when the first
            // falls on a Sunday.
            d == 1 || (d == 2 && monday)
                // Martin Luther King's birthday, third Monday since 1983.
                || ((15..=21).contains(&d) && monday && y >= 1983)
        }
        2 => {
            // Washington's birthday, third Monday.
            (15..=21).contains(&d) && monday
        }
        5 => {
            // Memorial Day, last Monday.
            d >= 25 && monday
        }
        6 => {
            // Juneteenth since 2022, moved off weekends.
            y >= 2022 && (d == 19 || (d == 20 && monday) || (d == 18 && friday))
        }
        7 => {
            // Independence Day, moved off weekends.
            d == 4 || (d == 5 && monday) || (d == 3 && friday)
        }
        9 => {
            // Labor Day, first Monday.
            d <= 7 && monday
        }
        10 => {
            // Columbus Day, second Monday since 1971.
            (8..=14).contains(&d) && monday && y >= 1971
        }
        11 => {
            // Veterans Day, moved off weekends.
            d == 11 || (d == 12 && monday) || (d == 10 && friday)
                // Thanksgiving, fourth Thursday.
                || ((22..=28).contains(&d) && w == Weekday::Thursday)
        }
        12 => {
            // Christmas, moved off weekends.
            d == 25 || (d == 26 && monday) || (d == 24 && friday)
                // New Year's Eve when 1 January falls on a Saturday.
                || (d == 31 && friday)
        }
        _ => false,
    }
}
