//! Monthly payroll aggregates.
//!
//! This module contains [`EmployeeSalary`], the per-employee fold of a month
//! of shifts, and [`MonthlyData`], the read model handed to the presentation
//! layer after every recomputation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeShift, checked_sum};
use crate::error::{EngineError, EngineResult};

/// One employee's shifts and pay totals for a month.
///
/// `month_total` is always `first_half_total + second_half_total`; it is never
/// computed on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalary {
    /// The employee this aggregate belongs to.
    pub employee_id: String,
    /// One record per day of the month, in date order.
    pub shifts: Vec<EmployeeShift>,
    /// Pay for days up to and including the half boundary.
    pub first_half_total: Decimal,
    /// Pay for the remaining days.
    pub second_half_total: Decimal,
    /// Sum of both halves.
    pub month_total: Decimal,
    /// Number of days actually worked.
    pub shift_count: u32,
}

impl EmployeeSalary {
    /// Builds the aggregate from its shifts and half totals.
    ///
    /// Returns `None` if the two halves do not sum within the `Decimal` range.
    pub(crate) fn new(
        employee_id: String,
        shifts: Vec<EmployeeShift>,
        first_half_total: Decimal,
        second_half_total: Decimal,
    ) -> Option<Self> {
        let month_total = first_half_total.checked_add(second_half_total)?;
        let shift_count = shifts.iter().filter(|s| s.worked).count() as u32;
        Some(Self {
            employee_id,
            shifts,
            first_half_total,
            second_half_total,
            month_total,
            shift_count,
        })
    }
}

/// The complete payroll picture for one month.
///
/// # Example
///
/// ```
/// use cafe_payroll::models::MonthlyData;
/// use std::collections::BTreeMap;
///
/// let data = MonthlyData {
///     year: 2025,
///     month: 2,
///     days: 28,
///     half_boundary_day: 15,
///     revenues: vec![],
///     employees: BTreeMap::new(),
/// };
/// assert!(data.employee("anna").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyData {
    /// The calendar year.
    pub year: i32,
    /// The month number (1-12).
    pub month: u32,
    /// Number of calendar days in the month.
    pub days: u32,
    /// Last day counted towards the first half.
    pub half_boundary_day: u32,
    /// Daily revenue; index `i` is day `i + 1`.
    pub revenues: Vec<Decimal>,
    /// Per-employee aggregates keyed by employee id.
    pub employees: BTreeMap<String, EmployeeSalary>,
}

impl MonthlyData {
    /// Looks up one employee's aggregate.
    pub fn employee(&self, employee_id: &str) -> EngineResult<&EmployeeSalary> {
        self.employees
            .get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Total revenue across the month, or `None` if it overflows.
    pub fn total_revenue(&self) -> Option<Decimal> {
        checked_sum(self.revenues.iter().copied())
    }

    /// Total payroll across all employees, or `None` if it overflows.
    pub fn total_payroll(&self) -> Option<Decimal> {
        checked_sum(self.employees.values().map(|e| e.month_total))
    }
}
