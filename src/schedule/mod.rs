//! Shift scheduling for a payroll month.
//!
//! This module holds the per-month schedule, the pending assignment batch and
//! the payroll book that ties the schedule to revenues and constants.

mod draft;
mod monthly_schedule;
mod payroll;

pub use draft::ShiftAssignmentDraft;
pub use monthly_schedule::{MonthlySchedule, ShiftEdit};
pub use payroll::MonthlyPayroll;
