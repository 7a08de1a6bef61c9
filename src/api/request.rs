//! Request types for the café payroll API.
//!
//! This module defines the JSON request bodies and query strings accepted by
//! the HTTP endpoints.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{CategoryShare, ProductSales, Sale};
use crate::config::{ConfigLoader, PayrollSettings, SalaryConstants};
use crate::error::EngineResult;
use crate::models::{EmployeeShift, PayrollMonth, ShiftType};
use crate::techcard::RecipeCategory;

/// Optional per-request overrides of the configured payroll settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsOverride {
    /// Salary constants to use instead of the configured ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<SalaryConstants>,
    /// Half boundary day to use instead of the configured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_boundary_day: Option<u32>,
    /// Rounding scale to use instead of the configured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_scale: Option<u32>,
}

impl SettingsOverride {
    /// Merges the overrides over the loaded configuration and validates the result.
    pub fn resolve(&self, config: &ConfigLoader) -> EngineResult<PayrollSettings> {
        let settings = PayrollSettings {
            salary: self
                .constants
                .clone()
                .unwrap_or_else(|| config.salary_constants().clone()),
            half_boundary_day: self
                .half_boundary_day
                .unwrap_or_else(|| config.half_boundary_day()),
            currency_scale: self
                .currency_scale
                .unwrap_or_else(|| config.currency_scale()),
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Request body for `POST /payroll/monthly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPayrollRequest {
    /// The calendar year.
    pub year: i32,
    /// The month number (1-12).
    pub month: u32,
    /// Daily revenue, one entry per day of the month.
    pub revenues: Vec<Decimal>,
    /// Shift lists keyed by employee id, one entry per day of the month.
    pub employees: BTreeMap<String, Vec<EmployeeShift>>,
    /// Settings overrides.
    #[serde(flatten)]
    pub overrides: SettingsOverride,
}

/// Request body for `POST /payroll/shift-pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftPayRequest {
    /// The shift to price.
    pub shift: EmployeeShift,
    /// Revenue of the shift's day.
    pub daily_revenue: Decimal,
    /// Settings overrides.
    #[serde(flatten)]
    pub overrides: SettingsOverride,
}

/// Request body for `POST /schedule/assign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignShiftsRequest {
    /// The calendar year.
    pub year: i32,
    /// The month number (1-12).
    pub month: u32,
    /// Employee to assign.
    pub employee_id: String,
    /// Days to mark as worked.
    pub dates: Vec<NaiveDate>,
    /// Shift type for every assigned day.
    #[serde(default)]
    pub shift_type: ShiftType,
    /// The employee's current shift list; an empty month when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shifts: Option<Vec<EmployeeShift>>,
}

impl AssignShiftsRequest {
    /// The month the request refers to.
    pub fn payroll_month(&self) -> EngineResult<PayrollMonth> {
        PayrollMonth::new(self.year, self.month)
    }
}

/// Request body for `POST /sales/revenue-series`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueSeriesRequest {
    /// The calendar year.
    pub year: i32,
    /// The month number (1-12).
    pub month: u32,
    /// Register sales to fold.
    pub sales: Vec<Sale>,
}

fn default_top() -> usize {
    5
}

/// Request body for `POST /sales/breakdown`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesBreakdownRequest {
    /// Units sold per product.
    #[serde(default)]
    pub products: Vec<ProductSales>,
    /// Sales volume per category.
    #[serde(default)]
    pub categories: Vec<CategoryShare>,
    /// How many best sellers to return.
    #[serde(default = "default_top")]
    pub top: usize,
}

/// Query string of `GET /techcards`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechCardQuery {
    /// Only cards of this category.
    #[serde(default)]
    pub category: Option<RecipeCategory>,
    /// Only cards shown on the drinks menu.
    #[serde(default)]
    pub drinks_only: bool,
}
