//! Per-month shift schedule.
//!
//! A [`MonthlySchedule`] keeps, for every employee, one [`EmployeeShift`] per
//! calendar day of the month. Unassigned days are unworked placeholders, so the
//! shift lists always line up with the month's revenue series.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeShift, PayrollMonth, ShiftType};

/// A manual edit of one day of an employee's schedule.
///
/// The edit replaces the day's attendance fields; the resolved percentage is
/// left for the next recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEdit {
    /// Whether the day is worked.
    pub worked: bool,
    /// Full or half day.
    #[serde(default)]
    pub shift_type: ShiftType,
    /// Hours for hour-tracked shifts.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Delivery compensation.
    #[serde(default)]
    pub delivery: Option<Decimal>,
}

/// Shift lists of every employee for one month.
///
/// # Example
///
/// ```
/// use cafe_payroll::models::{PayrollMonth, ShiftType};
/// use cafe_payroll::schedule::MonthlySchedule;
/// use chrono::NaiveDate;
///
/// let month = PayrollMonth::new(2025, 3).unwrap();
/// let mut schedule = MonthlySchedule::with_employees(month, ["anna"]);
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
/// let shifts = schedule.assign_shifts("anna", &[day, day], ShiftType::Half).unwrap();
/// assert_eq!(shifts.len(), 31);
/// assert!(shifts[4].worked);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySchedule {
    month: PayrollMonth,
    employees: BTreeMap<String, Vec<EmployeeShift>>,
}

impl MonthlySchedule {
    /// Creates an empty schedule for a month.
    pub fn new(month: PayrollMonth) -> Self {
        Self {
            month,
            employees: BTreeMap::new(),
        }
    }

    /// Creates a schedule with an all-placeholder month for each employee.
    pub fn with_employees<I, S>(month: PayrollMonth, employee_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schedule = Self::new(month);
        for id in employee_ids {
            schedule.add_employee(id);
        }
        schedule
    }

    /// Builds a schedule from shift lists loaded from the scheduling store.
    ///
    /// Every list must hold exactly one record per day of the month, in date
    /// order; otherwise `LengthMismatch` or `InvalidShift` is returned.
    pub fn from_shift_lists(
        month: PayrollMonth,
        lists: BTreeMap<String, Vec<EmployeeShift>>,
    ) -> EngineResult<Self> {
        for (employee_id, shifts) in &lists {
            if shifts.len() != month.days() as usize {
                return Err(EngineError::LengthMismatch {
                    subject: format!("shifts of '{}'", employee_id),
                    expected: month.days() as usize,
                    actual: shifts.len(),
                });
            }

            for (expected, shift) in month.dates().zip(shifts) {
                if shift.date != expected {
                    return Err(EngineError::InvalidShift {
                        date: shift.date,
                        message: format!(
                            "expected {} in the schedule of '{}'",
                            expected, employee_id
                        ),
                    });
                }
            }
        }

        Ok(Self {
            month,
            employees: lists,
        })
    }

    /// The month this schedule covers.
    pub fn month(&self) -> PayrollMonth {
        self.month
    }

    /// Adds an employee with an all-placeholder month.
    ///
    /// Returns false, leaving the existing list untouched, if the employee is
    /// already scheduled.
    pub fn add_employee(&mut self, employee_id: impl Into<String>) -> bool {
        let employee_id = employee_id.into();
        if self.employees.contains_key(&employee_id) {
            return false;
        }

        let placeholders = self.month.dates().map(EmployeeShift::placeholder).collect();
        self.employees.insert(employee_id, placeholders);
        true
    }

    /// Ids of all scheduled employees, in order.
    pub fn employee_ids(&self) -> impl Iterator<Item = &str> {
        self.employees.keys().map(String::as_str)
    }

    /// All shift lists keyed by employee id.
    pub fn shift_lists(&self) -> &BTreeMap<String, Vec<EmployeeShift>> {
        &self.employees
    }

    /// One employee's shift list.
    pub fn shifts(&self, employee_id: &str) -> EngineResult<&[EmployeeShift]> {
        self.employees
            .get(employee_id)
            .map(Vec::as_slice)
            .ok_or_else(|| not_found(employee_id))
    }

    /// Assigns worked shifts of one type to an employee on a set of dates.
    ///
    /// Each date's record becomes `worked = true` with the given shift type;
    /// hours and delivery already recorded for that day are kept. Repeated
    /// dates collapse, so assigning the same date twice has the same effect
    /// as assigning it once.
    ///
    /// Totals are not recomputed; the caller triggers recomputation once the
    /// batch of edits is complete.
    ///
    /// # Returns
    ///
    /// Returns the employee's updated shift list, or an error if:
    /// - the employee is not scheduled (`EmployeeNotFound`)
    /// - any date falls outside the month (`DateOutOfRange`); no date is applied
    pub fn assign_shifts(
        &mut self,
        employee_id: &str,
        dates: &[NaiveDate],
        shift_type: ShiftType,
    ) -> EngineResult<&[EmployeeShift]> {
        let month = self.month;
        let shifts = self
            .employees
            .get_mut(employee_id)
            .ok_or_else(|| not_found(employee_id))?;

        let unique: BTreeSet<NaiveDate> = dates.iter().copied().collect();
        for date in &unique {
            month.ensure_contains(*date)?;
        }

        for date in &unique {
            let shift = &mut shifts[day_index(*date)];
            shift.worked = true;
            shift.shift_type = shift_type;
        }

        info!(
            employee_id = %employee_id,
            dates = unique.len(),
            shift_type = ?shift_type,
            "Assigned shifts"
        );

        Ok(shifts.as_slice())
    }

    /// Replaces the attendance fields of one day of an employee's schedule.
    ///
    /// # Returns
    ///
    /// Returns the edited record, or an error if:
    /// - the employee is not scheduled (`EmployeeNotFound`)
    /// - the date falls outside the month (`DateOutOfRange`)
    /// - hours or delivery are negative (`InvalidShift`)
    pub fn edit_shift(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        edit: ShiftEdit,
    ) -> EngineResult<&EmployeeShift> {
        let month = self.month;
        let shifts = self
            .employees
            .get_mut(employee_id)
            .ok_or_else(|| not_found(employee_id))?;
        month.ensure_contains(date)?;

        for (field, value) in [("hours", edit.hours), ("delivery", edit.delivery)] {
            if let Some(value) = value.filter(|v| *v < Decimal::ZERO) {
                return Err(EngineError::InvalidShift {
                    date,
                    message: format!("{} must not be negative, got {}", field, value),
                });
            }
        }

        let shift = &mut shifts[day_index(date)];
        shift.worked = edit.worked;
        shift.shift_type = edit.shift_type;
        shift.hours = edit.hours;
        shift.delivery = edit.delivery;

        Ok(&*shift)
    }
}

fn day_index(date: NaiveDate) -> usize {
    date.day0() as usize
}

fn not_found(employee_id: &str) -> EngineError {
    EngineError::EmployeeNotFound {
        employee_id: employee_id.to_string(),
    }
}
