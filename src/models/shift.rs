//! Shift model and related types.
//!
//! This module defines the [`EmployeeShift`] record, one employee's attendance
//! and compensation inputs for a single calendar day, and the [`ShiftType`]
//! that decides how much of the flat base rate a worked day earns.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a worked day counts as a full or a half day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// A full day; earns the whole base rate.
    #[default]
    Full,
    /// A half day; earns half of the base rate.
    Half,
}

/// One employee's record for a single calendar day.
///
/// Unworked days stay in an employee's monthly sequence as zero-value
/// placeholders so the calendar view can render every day of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeShift {
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// Whether the employee worked that day.
    pub worked: bool,
    /// The bonus percentage resolved from that day's revenue.
    #[serde(default)]
    pub percentage: Decimal,
    /// Hours worked, present only for hour-tracked shifts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Decimal>,
    /// Supplementary amount (e.g. delivery-fee compensation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Decimal>,
    /// Full or half day.
    #[serde(default)]
    pub shift_type: ShiftType,
}

impl EmployeeShift {
    /// Creates an unworked, zero-value record for the given day.
    ///
    /// # Examples
    ///
    /// ```
    /// use cafe_payroll::models::{EmployeeShift, ShiftType};
    /// use chrono::NaiveDate;
    ///
    /// let day = EmployeeShift::placeholder(NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
    /// assert!(!day.worked);
    /// assert_eq!(day.shift_type, ShiftType::Full);
    /// assert_eq!(day.day(), 8);
    /// ```
    pub fn placeholder(date: NaiveDate) -> Self {
        Self {
            date,
            worked: false,
            percentage: Decimal::ZERO,
            hours: None,
            delivery: None,
            shift_type: ShiftType::Full,
        }
    }

    /// Creates a worked record of the given type with no hours or delivery.
    pub fn worked(date: NaiveDate, shift_type: ShiftType) -> Self {
        Self {
            worked: true,
            shift_type,
            ..Self::placeholder(date)
        }
    }

    /// Returns the 1-based day of the month.
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Returns true if the shift is paid by the hour rather than the flat rate.
    pub fn is_hour_tracked(&self) -> bool {
        self.hours.is_some()
    }
}
