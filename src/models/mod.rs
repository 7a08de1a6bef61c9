//! Core data models for the café payroll engine.
//!
//! This module contains the domain models shared by the calculation,
//! scheduling and API layers.

mod audit;
mod money;
mod monthly_data;
mod payroll_month;
mod shift;

pub use audit::AuditStep;
pub use money::checked_sum;
pub use monthly_data::{EmployeeSalary, MonthlyData};
pub use payroll_month::PayrollMonth;
pub use shift::{EmployeeShift, ShiftType};
