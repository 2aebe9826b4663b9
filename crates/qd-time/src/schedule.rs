//! Coupon date schedules.

use qd_core::{Error, Result};

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::period::Period;

/// Rule used to generate intermediate schedule dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGeneration {
    /// Generate dates backward from the termination date; a short stub
    /// period, if any, sits at the front.
    Backward,
    /// Generate dates forward from the effective date; a short stub
    /// period, if any, sits at the end.
    Forward,
    /// No intermediate dates at all.
    Zero,
}

/// A sequence of coupon period boundaries.
#[derive(Debug, Clone)]
pub struct Schedule {
    dates: Vec<Date>,
    is_regular: Vec<bool>,
    tenor: Option<Period>,
}

impl Schedule {
    /// Builds a schedule from explicit dates, which must be strictly
    /// increasing. All periods are treated as regular.
    pub fn from_dates(dates: Vec<Date>) -> Result<Schedule> {
        if dates.len() < 2 {
            return Err(Error::InvalidArgument(
                "a schedule needs at least two dates".into(),
            ));
        }
        if !dates.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::InvalidArgument(
                "schedule dates must be strictly increasing".into(),
            ));
        }
        let periods = dates.len() - 1;
        Ok(Schedule {
            dates,
            is_regular: vec![true; periods],
            tenor: None,
        })
    }

    /// The period boundaries, earliest first.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of dates in the schedule.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the schedule holds no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Whether period `i` (between dates `i` and `i + 1`) spans a full
    /// tenor.
    pub fn is_regular(&self, i: usize) -> bool {
        self.is_regular[i]
    }

    /// The tenor the schedule was generated with, if any.
    pub fn tenor(&self) -> Option<Period> {
        self.tenor
    }
}

/// Builder assembling a [`Schedule`] from market conventions.
#[derive(Debug)]
pub struct ScheduleBuilder<'a> {
    effective: Date,
    termination: Date,
    tenor: Period,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGeneration,
    end_of_month: bool,
}

impl<'a> ScheduleBuilder<'a> {
    /// Starts a builder for the given accrual span and coupon tenor.
    ///
    /// Defaults to backward generation with modified-following
    /// adjustment and no end-of-month convention.
    pub fn new(
        effective: Date,
        termination: Date,
        tenor: Period,
        calendar: &'a dyn Calendar,
    ) -> Self {
        ScheduleBuilder {
            effective,
            termination,
            tenor,
            calendar,
            convention: BusinessDayConvention::ModifiedFollowing,
            termination_convention: BusinessDayConvention::ModifiedFollowing,
            rule: DateGeneration::Backward,
            end_of_month: false,
        }
    }

    /// Sets the adjustment convention for all dates but the last.
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the adjustment convention for the termination date.
    pub fn with_termination_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.termination_convention = convention;
        self
    }

    /// Sets the date generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    /// Forces generated dates to the end of their month when the seed
    /// date is itself a month end.
    pub fn end_of_month(mut self, flag: bool) -> Self {
        self.end_of_month = flag;
        self
    }

    /// Generates the schedule.
    pub fn build(self) -> Result<Schedule> {
        if self.effective >= self.termination {
            return Err(Error::InvalidArgument(format!(
                "effective date {:?} not before termination date {:?}",
                self.effective, self.termination
            )));
        }

        let (mut dates, mut is_regular) = match self.rule {
            DateGeneration::Zero => (vec![self.effective, self.termination], vec![true]),
            _ if self.tenor.length() == 0 => {
                (vec![self.effective, self.termination], vec![true])
            }
            DateGeneration::Backward => self.generate(self.termination, self.effective, -1),
            DateGeneration::Forward => self.generate(self.effective, self.termination, 1),
        };

        let last = dates.len() - 1;
        for (i, d) in dates.iter_mut().enumerate() {
            let convention = if i == last {
                self.termination_convention
            } else {
                self.convention
            };
            *d = self.calendar.adjust(*d, convention);
        }

        // Adjustment can collapse neighbouring dates onto the same
        // business day.
        let mut i = 1;
        while i < dates.len() {
            if dates[i] == dates[i - 1] {
                dates.remove(i);
                is_regular.remove(i - 1);
            } else {
                i += 1;
            }
        }

        Ok(Schedule {
            dates,
            is_regular,
            tenor: Some(self.tenor),
        })
    }

    /// Generates unadjusted dates from `seed` toward `bound`, stepping
    /// whole tenors in the given direction.
    fn generate(&self, seed: Date, bound: Date, direction: i32) -> (Vec<Date>, Vec<bool>) {
        let force_eom = self.end_of_month && seed.is_end_of_month();
        let mut dates = vec![seed];
        let mut stub_regular = true;
        let mut i = 1;
        loop {
            let mut d = seed.advance(direction * i * self.tenor.length(), self.tenor.units());
            if force_eom {
                d = d.end_of_month();
            }
            let past_bound = if direction < 0 { d <= bound } else { d >= bound };
            if past_bound {
                stub_regular = d == bound;
                break;
            }
            dates.push(d);
            i += 1;
        }
        dates.push(bound);

        let mut is_regular = vec![true; dates.len() - 1];
        if let Some(flag) = is_regular.last_mut() {
            *flag = stub_regular;
        }

        if direction < 0 {
            dates.reverse();
            is_regular.reverse();
        }
        (dates, is_regular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{NullCalendar, WeekendsOnly};
    use crate::time_unit::TimeUnit;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn backward_generation_puts_stub_in_front() {
        let cal = NullCalendar;
        let schedule = ScheduleBuilder::new(
            date(2013, 4, 14),
            date(2041, 9, 1),
            Period::new(6, TimeUnit::Months),
            &cal,
        )
        .with_convention(BusinessDayConvention::Unadjusted)
        .with_termination_convention(BusinessDayConvention::Unadjusted)
        .build()
        .unwrap();

        assert_eq!(schedule.len(), 58);
        assert_eq!(schedule.dates()[0], date(2013, 4, 14));
        assert_eq!(schedule.dates()[1], date(2013, 9, 1));
        assert_eq!(schedule.dates()[2], date(2014, 3, 1));
        assert_eq!(schedule.dates()[57], date(2041, 9, 1));
        assert!(!schedule.is_regular(0));
        assert!((1..57).all(|i| schedule.is_regular(i)));
    }

    #[test]
    fn forward_generation_puts_stub_at_end() {
        let cal = NullCalendar;
        let schedule = ScheduleBuilder::new(
            date(2014, 1, 13),
            date(2015, 3, 1),
            Period::new(6, TimeUnit::Months),
            &cal,
        )
        .with_convention(BusinessDayConvention::Unadjusted)
        .with_termination_convention(BusinessDayConvention::Unadjusted)
        .with_rule(DateGeneration::Forward)
        .build()
        .unwrap();

        assert_eq!(
            schedule.dates(),
            &[
                date(2014, 1, 13),
                date(2014, 7, 13),
                date(2015, 1, 13),
                date(2015, 3, 1),
            ]
        );
        assert!(schedule.is_regular(0));
        assert!(schedule.is_regular(1));
        assert!(!schedule.is_regular(2));
    }

    #[test]
    fn exact_fit_has_no_stub() {
        let cal = NullCalendar;
        let schedule = ScheduleBuilder::new(
            date(2014, 3, 1),
            date(2015, 3, 1),
            Period::new(6, TimeUnit::Months),
            &cal,
        )
        .with_convention(BusinessDayConvention::Unadjusted)
        .with_termination_convention(BusinessDayConvention::Unadjusted)
        .build()
        .unwrap();

        assert_eq!(
            schedule.dates(),
            &[date(2014, 3, 1), date(2014, 9, 1), date(2015, 3, 1)]
        );
        assert!(schedule.is_regular(0));
        assert!(schedule.is_regular(1));
    }

    #[test]
    fn adjusts_generated_dates() {
        let cal = WeekendsOnly;
        let schedule = ScheduleBuilder::new(
            date(2014, 1, 13),
            date(2015, 1, 13),
            Period::new(6, TimeUnit::Months),
            &cal,
        )
        .build()
        .unwrap();

        // 13 July 2014 is a Sunday.
        assert_eq!(
            schedule.dates(),
            &[date(2014, 1, 13), date(2014, 7, 14), date(2015, 1, 13)]
        );
    }

    #[test]
    fn zero_rule_gives_single_period() {
        let cal = NullCalendar;
        let schedule = ScheduleBuilder::new(
            date(2014, 1, 13),
            date(2015, 1, 13),
            Period::new(6, TimeUnit::Months),
            &cal,
        )
        .with_rule(DateGeneration::Zero)
        .build()
        .unwrap();

        assert_eq!(schedule.dates(), &[date(2014, 1, 13), date(2015, 1, 13)]);
        assert!(schedule.is_regular(0));
    }

    #[test]
    fn rejects_inverted_span() {
        let cal = NullCalendar;
        let result = ScheduleBuilder::new(
            date(2015, 1, 13),
            date(2014, 1, 13),
            Period::new(6, TimeUnit::Months),
            &cal,
        )
        .build();
        assert!(result.is_err());
    }

    #[test]
    fn explicit_dates_must_increase() {
        assert!(Schedule::from_dates(vec![date(2014, 1, 13)]).is_err());
        assert!(
            Schedule::from_dates(vec![date(2014, 1, 13), date(2014, 1, 13)]).is_err()
        );
        let schedule =
            Schedule::from_dates(vec![date(2014, 1, 13), date(2015, 1, 13)]).unwrap();
        assert_eq!(schedule.len(), 2);
        assert!(schedule.tenor().is_none());
    }
}
