//! Payroll month model.
//!
//! This module contains the [`PayrollMonth`] type, the calendar window every
//! schedule, revenue series and monthly aggregate is keyed by.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month that payroll is computed for.
///
/// The month always refers to a real calendar month, so its day count and
/// date range are known up front.
///
/// # Example
///
/// ```
/// use cafe_payroll::models::PayrollMonth;
/// use chrono::NaiveDate;
///
/// let february = PayrollMonth::new(2024, 2).unwrap();
/// assert_eq!(february.days(), 29);
/// assert!(february.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
/// assert!(!february.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "MonthKey", into = "MonthKey")]
pub struct PayrollMonth {
    first_day: NaiveDate,
    days: u32,
}

/// Wire form of a [`PayrollMonth`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct MonthKey {
    year: i32,
    month: u32,
}

impl TryFrom<MonthKey> for PayrollMonth {
    type Error = EngineError;

    fn try_from(key: MonthKey) -> EngineResult<Self> {
        PayrollMonth::new(key.year, key.month)
    }
}

impl From<PayrollMonth> for MonthKey {
    fn from(month: PayrollMonth) -> Self {
        MonthKey {
            year: month.year(),
            month: month.month(),
        }
    }
}

impl PayrollMonth {
    /// Creates a payroll month, validating the year/month pair.
    ///
    /// # Returns
    ///
    /// Returns `InvalidConfig` if `month` is not in `1..=12` or the year is
    /// outside the range chrono can represent.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidConfig {
            field: "month".to_string(),
            message: format!("{}-{} is not a calendar month", year, month),
        };

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = first_day
            .checked_add_months(chrono::Months::new(1))
            .ok_or_else(invalid)?;
        let days = (next_month - first_day).num_days() as u32;

        Ok(Self { first_day, days })
    }

    /// Returns the month containing the given date.
    pub fn of(date: NaiveDate) -> EngineResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month number (1-12).
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Number of calendar days in the month (28-31).
    pub fn days(&self) -> u32 {
        self.days
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day + Days::new(u64::from(self.days - 1))
    }

    /// Checks if a date falls within this month (inclusive of both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day()
    }

    /// Returns the date of the given 1-based day of the month, if it exists.
    pub fn date_of_day(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days {
            return None;
        }
        Some(self.first_day + Days::new(u64::from(day - 1)))
    }

    /// Iterates over every date of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.first_day.iter_days().take(self.days as usize)
    }

    /// Returns `DateOutOfRange` unless the date falls within this month.
    pub fn ensure_contains(&self, date: NaiveDate) -> EngineResult<()> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(EngineError::DateOutOfRange {
                date,
                year: self.year(),
                month: self.month(),
            })
        }
    }
}
