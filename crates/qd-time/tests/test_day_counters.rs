//! Day-count convention tests.
//!
//! Reference values follow the worked examples in the ISDA EMU day
//! count memo and standard money-market conventions.

use qd_time::{
    Actual360, Actual365Fixed, ActualActualIsda, ActualActualIsma, Date, DayCounter,
};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[test]
fn actual_360_and_365() {
    let cases = [
        (date(2014, 1, 13), date(2014, 4, 14), 91),
        (date(2014, 4, 14), date(2014, 9, 1), 140),
        (date(2014, 4, 17), date(2016, 1, 15), 638),
    ];
    for (d1, d2, days) in cases {
        assert_eq!(Actual360.day_count(d1, d2), days);
        let t360 = Actual360.year_fraction(d1, d2);
        let t365 = Actual365Fixed.year_fraction(d1, d2);
        assert!(
            (t360 - days as f64 / 360.0).abs() < 1e-15,
            "Actual/360 from {} to {}: got {}, want {}",
            d1,
            d2,
            t360,
            days as f64 / 360.0
        );
        assert!(
            (t365 - days as f64 / 365.0).abs() < 1e-15,
            "Actual/365F from {} to {}: got {}, want {}",
            d1,
            d2,
            t365,
            days as f64 / 365.0
        );
    }
}

#[test]
fn actual_actual_isda_memo_cases() {
    let cases = [
        // Semiannual accrual within one year.
        (date(1999, 2, 1), date(1999, 7, 1), 0.410958904110),
        // Accrual spanning the 1999/2000 year end.
        (date(1999, 7, 1), date(2000, 7, 1), 1.001377348600),
        // Short first calculation period.
        (date(2002, 8, 15), date(2003, 7, 15), 0.915068493151),
        // Leap-year second half.
        (date(2003, 11, 1), date(2004, 5, 1), 0.497724380567),
    ];
    for (d1, d2, expected) in cases {
        let t = ActualActualIsda.year_fraction(d1, d2);
        assert!(
            (t - expected).abs() < 1e-10,
            "Act/Act ISDA from {} to {}: got {}, want {}",
            d1,
            d2,
            t,
            expected
        );
    }
}

#[test]
fn actual_actual_isma_memo_cases() {
    let cases = [
        // Regular semiannual period.
        (
            date(2003, 7, 15),
            date(2004, 1, 15),
            date(2003, 7, 15),
            date(2004, 1, 15),
            0.5,
        ),
        // Short first period, annual reference.
        (
            date(1999, 2, 1),
            date(1999, 7, 1),
            date(1998, 7, 1),
            date(1999, 7, 1),
            0.410958904110,
        ),
        // Short first period, semiannual reference.
        (
            date(2000, 1, 30),
            date(2000, 6, 30),
            date(2000, 1, 30),
            date(2000, 7, 30),
            0.417582417582,
        ),
        (
            date(1999, 11, 30),
            date(2000, 4, 30),
            date(1999, 11, 30),
            date(2000, 5, 30),
            0.417582417582,
        ),
    ];
    for (d1, d2, r1, r2, expected) in cases {
        let t = ActualActualIsma.year_fraction_with_ref(d1, d2, Some(r1), Some(r2));
        assert!(
            (t - expected).abs() < 1e-10,
            "Act/Act ISMA from {} to {} against [{}, {}]: got {}, want {}",
            d1,
            d2,
            r1,
            r2,
            t,
            expected
        );
    }
}

#[test]
fn actual_actual_isma_long_first_period() {
    // Accrual starting before the reference period counts the notional
    // period in front of it.
    let t = ActualActualIsma.year_fraction_with_ref(
        date(2002, 8, 15),
        date(2003, 7, 15),
        Some(date(2003, 1, 15)),
        Some(date(2003, 7, 15)),
    );
    let expected = 0.5 * 153.0 / 184.0 + 0.5;
    assert!(
        (t - expected).abs() < 1e-10,
        "long first period: got {}, want {}",
        t,
        expected
    );
}

#[test]
fn actual_actual_isma_spans_many_periods() {
    // Two and a half years against a semiannual reference period.
    let t = ActualActualIsma.year_fraction_with_ref(
        date(2014, 3, 1),
        date(2016, 9, 1),
        Some(date(2014, 3, 1)),
        Some(date(2014, 9, 1)),
    );
    assert!(
        (t - 2.5).abs() < 1e-10,
        "multi-period span: got {}, want 2.5",
        t
    );
}

#[test]
fn conventions_report_their_names() {
    assert_eq!(Actual360.name(), "Actual/360");
    assert_eq!(Actual365Fixed.name(), "Actual/365 (Fixed)");
    assert_eq!(ActualActualIsda.name(), "Actual/Actual (ISDA)");
    assert_eq!(ActualActualIsma.name(), "Actual/Actual (ISMA)");
}
