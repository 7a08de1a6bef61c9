//! Calculation logic for the café payroll engine.
//!
//! This module contains the salary rules that price a single shift (bonus
//! percentage resolution, base/hourly/half-day base pay, delivery
//! compensation and rounding) and the monthly aggregation that folds a month
//! of shifts into half-month and month totals.

mod monthly_aggregation;
mod salary_rules;

pub use monthly_aggregation::aggregate;
pub use salary_rules::{
    SHIFT_PAY_RULE, ShiftPayResult, compute_shift_pay, resolve_percentage, revenue_from_f64,
};
pub(crate) use salary_rules::validate_revenue;
