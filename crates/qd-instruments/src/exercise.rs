//! Option exercise rights.
//!
//! An `Exercise` defines *when* an option can be exercised.

use qd_time::Date;
use std::fmt;

/// Type of exercise right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseType {
    /// Can only be exercised at expiry.
    European,
    /// Can be exercised at any time up to expiry.
    American,
}

/// Exercise specification for an option.
#[derive(Debug, Clone)]
pub struct Exercise {
    /// The exercise type.
    pub exercise_type: ExerciseType,
    /// The exercise date(s).
    ///
    /// - European: single date (the expiry).
    /// - American: two dates (earliest, latest).
    dates: Vec<Date>,
}

impl Exercise {
    /// Create a European exercise (single expiry date).
    pub fn european(expiry: Date) -> Self {
        Self {
            exercise_type: ExerciseType::European,
            dates: vec![expiry],
        }
    }

    /// Create an American exercise (earliest to latest).
    pub fn american(earliest: Date, latest: Date) -> Self {
        Self {
            exercise_type: ExerciseType::American,
            dates: vec![earliest, latest],
        }
    }

    /// The last possible exercise date.
    pub fn last_date(&self) -> Date {
        *self.dates.last().expect("exercise has at least one date")
    }

    /// All exercise dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The type of exercise.
    pub fn exercise_type(&self) -> ExerciseType {
        self.exercise_type
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exercise_type {
            ExerciseType::European => write!(f, "European({})", self.dates[0]),
            ExerciseType::American => {
                write!(f, "American({} – {})", self.dates[0], self.last_date())
            }
        }
    }
}
