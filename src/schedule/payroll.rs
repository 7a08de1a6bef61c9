//! The monthly payroll book.
//!
//! [`MonthlyPayroll`] owns everything a payroll view needs for one month: the
//! schedule, the revenue series, the salary constants and the last computed
//! [`MonthlyData`]. Edits only mark the book stale; totals are rebuilt from
//! scratch by an explicit [`MonthlyPayroll::recompute`].

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{aggregate, validate_revenue};
use crate::config::{ConfigLoader, SalaryConstants};
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeShift, MonthlyData, PayrollMonth, ShiftType};

use super::{MonthlySchedule, ShiftAssignmentDraft, ShiftEdit};

/// Schedule, revenues and constants of one month, plus the last aggregate.
#[derive(Debug, Clone)]
pub struct MonthlyPayroll {
    schedule: MonthlySchedule,
    revenues: Vec<Decimal>,
    constants: SalaryConstants,
    half_boundary_day: u32,
    currency_scale: u32,
    latest: Option<MonthlyData>,
    dirty: bool,
}

impl MonthlyPayroll {
    /// Opens a book over a schedule with a zero revenue series.
    pub fn new(
        schedule: MonthlySchedule,
        constants: SalaryConstants,
        half_boundary_day: u32,
        currency_scale: u32,
    ) -> Self {
        let revenues = vec![Decimal::ZERO; schedule.month().days() as usize];
        Self {
            schedule,
            revenues,
            constants,
            half_boundary_day,
            currency_scale,
            latest: None,
            dirty: true,
        }
    }

    /// Opens an empty book for a month using the loaded configuration.
    pub fn from_config(month: PayrollMonth, config: &ConfigLoader) -> Self {
        Self::new(
            MonthlySchedule::new(month),
            config.salary_constants().clone(),
            config.half_boundary_day(),
            config.currency_scale(),
        )
    }

    /// The month this book covers.
    pub fn month(&self) -> PayrollMonth {
        self.schedule.month()
    }

    /// The current schedule.
    pub fn schedule(&self) -> &MonthlySchedule {
        &self.schedule
    }

    /// The current revenue series.
    pub fn revenues(&self) -> &[Decimal] {
        &self.revenues
    }

    /// The constants the next recomputation will use.
    pub fn constants(&self) -> &SalaryConstants {
        &self.constants
    }

    /// Adds an employee with an all-placeholder month.
    pub fn add_employee(&mut self, employee_id: impl Into<String>) -> bool {
        let added = self.schedule.add_employee(employee_id);
        self.dirty |= added;
        added
    }

    /// Assigns worked shifts; see [`MonthlySchedule::assign_shifts`].
    pub fn assign_shifts(
        &mut self,
        employee_id: &str,
        dates: &[NaiveDate],
        shift_type: ShiftType,
    ) -> EngineResult<&[EmployeeShift]> {
        let shifts = self.schedule.assign_shifts(employee_id, dates, shift_type)?;
        self.dirty = true;
        Ok(shifts)
    }

    /// Submits a pending assignment batch; see [`ShiftAssignmentDraft::submit`].
    pub fn submit_draft(&mut self, draft: &mut ShiftAssignmentDraft) -> EngineResult<usize> {
        let assigned = draft.submit(&mut self.schedule)?;
        self.dirty = true;
        Ok(assigned)
    }

    /// Edits one day of an employee's schedule; see [`MonthlySchedule::edit_shift`].
    pub fn edit_shift(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        edit: ShiftEdit,
    ) -> EngineResult<&EmployeeShift> {
        let shift = self.schedule.edit_shift(employee_id, date, edit)?;
        self.dirty = true;
        Ok(shift)
    }

    /// Replaces the salary constants after validating them.
    pub fn set_constants(&mut self, constants: SalaryConstants) -> EngineResult<()> {
        constants.validate()?;
        self.constants = constants;
        self.dirty = true;
        Ok(())
    }

    /// Replaces the whole revenue series.
    ///
    /// The series is checked against the month on the next recomputation.
    pub fn set_revenues(&mut self, revenues: Vec<Decimal>) {
        self.revenues = revenues;
        self.dirty = true;
    }

    /// Corrects the revenue of a single day.
    ///
    /// The stored series must already hold one entry per day of the month;
    /// otherwise `LengthMismatch` is returned and the series is left as is.
    pub fn correct_revenue(&mut self, date: NaiveDate, amount: Decimal) -> EngineResult<()> {
        let month = self.month();
        month.ensure_contains(date)?;
        validate_revenue(amount)?;

        let expected = month.days() as usize;
        if self.revenues.len() != expected {
            return Err(EngineError::LengthMismatch {
                subject: "revenues".to_string(),
                expected,
                actual: self.revenues.len(),
            });
        }

        self.revenues[date.day0() as usize] = amount;
        self.dirty = true;
        Ok(())
    }

    /// Rebuilds the monthly aggregate from the current inputs.
    ///
    /// On failure the previously computed aggregate is kept and the book
    /// stays stale.
    pub fn recompute(&mut self) -> EngineResult<&MonthlyData> {
        let month = self.month();
        let result = aggregate(
            month,
            &self.revenues,
            self.schedule.shift_lists(),
            &self.constants,
            self.half_boundary_day,
            self.currency_scale,
        );

        match result {
            Ok(data) => {
                info!(
                    year = month.year(),
                    month = month.month(),
                    employees = data.employees.len(),
                    total_payroll = ?data.total_payroll(),
                    "Recomputed monthly payroll"
                );
                self.dirty = false;
                Ok(self.latest.insert(data))
            }
            Err(e) => {
                warn!(
                    year = month.year(),
                    month = month.month(),
                    error = %e,
                    "Monthly payroll recompute failed, keeping previous totals"
                );
                Err(e)
            }
        }
    }

    /// The last successfully computed aggregate.
    pub fn latest(&self) -> Option<&MonthlyData> {
        self.latest.as_ref()
    }

    /// Whether inputs changed since the last successful recomputation.
    pub fn needs_recompute(&self) -> bool {
        self.dirty
    }
}
