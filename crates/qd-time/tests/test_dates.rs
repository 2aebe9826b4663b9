//! Date consistency tests sweeping the whole supported range.

use std::collections::HashSet;

use qd_time::date::{days_in_month, is_leap_year};
use qd_time::{Date, Weekday};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[test]
fn consistency_over_full_range() {
    let min_serial = Date::MIN.serial() + 1;
    let max_serial = Date::MAX.serial();

    let prev = Date::from_serial(min_serial - 1).unwrap();
    let mut d_old = prev.day_of_month();
    let mut m_old = prev.month();
    let mut y_old = prev.year();
    let mut wd_old = prev.weekday().ordinal();

    for i in min_serial..=max_serial {
        let t = Date::from_serial(i).unwrap();
        assert_eq!(t.serial(), i, "inconsistent serial for {t}");

        let (d, m, y) = (t.day_of_month(), t.month(), t.year());
        let wd = t.weekday().ordinal();

        assert!(
            (d == d_old + 1 && m == m_old && y == y_old)
                || (d == 1 && m == m_old + 1 && y == y_old)
                || (d == 1 && m == 1 && y == y_old + 1),
            "wrong day/month/year increment: date={t}, d/m/y={d}/{m}/{y}, \
             prev={d_old}/{m_old}/{y_old}"
        );
        d_old = d;
        m_old = m;
        y_old = y;

        assert!((1..=12).contains(&m), "invalid month: date={t}, month={m}");
        let max_day = days_in_month(y, m);
        assert!(
            (1..=max_day).contains(&d),
            "invalid day of month: date={t}, day={d}, max={max_day}"
        );

        assert!(
            wd == wd_old + 1 || (wd == 1 && wd_old == 7),
            "invalid weekday increment: date={t}, wd={wd}, prev_wd={wd_old}"
        );
        wd_old = wd;

        let rebuilt = Date::from_ymd(y, m, d).unwrap();
        assert_eq!(rebuilt.serial(), i, "round trip failed for {t}");
    }
}

#[test]
fn date_arithmetic() {
    let d = date(2014, 1, 15);

    assert_eq!(d + 10, date(2014, 1, 25));
    assert_eq!(d - 15, date(2013, 12, 31));
    assert_eq!((d + 10) - (d - 15), 25);

    // Month and year boundaries.
    assert_eq!(date(2014, 1, 31) + 1, date(2014, 2, 1));
    assert_eq!(date(2013, 12, 31) + 1, date(2014, 1, 1));
    assert_eq!(date(2016, 2, 29) + 1, date(2016, 3, 1));
}

#[test]
fn leap_years() {
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(is_leap_year(2004));
    assert!(!is_leap_year(2001));
    assert!(!is_leap_year(2100));
}

#[test]
fn end_of_month() {
    assert!(date(2016, 2, 29).is_end_of_month());
    assert!(!date(2016, 2, 28).is_end_of_month());
    assert!(date(2015, 2, 28).is_end_of_month());
    assert!(date(2014, 12, 31).is_end_of_month());
    assert!(!date(2014, 12, 30).is_end_of_month());
}

#[test]
fn weekday_progression() {
    // 13 January 2014 is a Monday.
    assert_eq!(date(2014, 1, 13).weekday(), Weekday::Monday);
    assert_eq!(date(2014, 1, 14).weekday(), Weekday::Tuesday);
    assert_eq!(date(2014, 1, 18).weekday(), Weekday::Saturday);
    assert_eq!(date(2014, 1, 19).weekday(), Weekday::Sunday);
}

#[test]
fn usable_as_hash_key() {
    let mut seen = HashSet::new();
    let start = date(2014, 1, 1);
    for i in 0..365 {
        assert!(seen.insert(start + i), "duplicate hash entry for {}", start + i);
    }
    assert!(seen.contains(&date(2014, 6, 15)));
    assert!(!seen.contains(&date(2015, 1, 1)));
}
