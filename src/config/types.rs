//! Configuration types for the café payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::techcard::{CategoryTable, RecipeCategory, TechCardCatalog};

/// Compensation constants applied to every shift of a computation.
///
/// A worked day earns a base component (flat, halved, or hourly) plus a bonus
/// percentage of that day's revenue. The percentage switches from
/// `percentage_below` to `percentage_above` once revenue reaches
/// `revenue_threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryConstants {
    /// Flat pay for a full-day shift.
    pub base_rate: Decimal,
    /// Pay per hour for hour-tracked shifts.
    pub hourly_rate: Decimal,
    /// Revenue at which the higher bonus percentage applies.
    pub revenue_threshold: Decimal,
    /// Bonus percentage below the threshold.
    pub percentage_below: Decimal,
    /// Bonus percentage at or above the threshold.
    pub percentage_above: Decimal,
}

impl SalaryConstants {
    /// Checks that every constant is non-negative and that the bonus
    /// percentage does not drop when revenue reaches the threshold.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("base_rate", self.base_rate),
            ("hourly_rate", self.hourly_rate),
            ("revenue_threshold", self.revenue_threshold),
            ("percentage_below", self.percentage_below),
            ("percentage_above", self.percentage_above),
        ];

        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }

        if self.percentage_above < self.percentage_below {
            return Err(EngineError::InvalidConfig {
                field: "percentage_above".to_string(),
                message: format!(
                    "must not be below percentage_below ({}), got {}",
                    self.percentage_below, self.percentage_above
                ),
            });
        }

        Ok(())
    }
}

/// Default last day of the first payout.
pub const DEFAULT_HALF_BOUNDARY_DAY: u32 = 15;

/// Default number of decimal places of the currency's minor unit.
pub const DEFAULT_CURRENCY_SCALE: u32 = 2;

/// Largest scale a `Decimal` can carry.
const MAX_CURRENCY_SCALE: u32 = 28;

fn default_half_boundary_day() -> u32 {
    DEFAULT_HALF_BOUNDARY_DAY
}

fn default_currency_scale() -> u32 {
    DEFAULT_CURRENCY_SCALE
}

/// Payroll configuration file structure (`payroll.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Compensation constants.
    pub salary: SalaryConstants,
    /// Last day of the month counted towards the first half.
    #[serde(default = "default_half_boundary_day")]
    pub half_boundary_day: u32,
    /// Decimal places shift pay is rounded to.
    #[serde(default = "default_currency_scale")]
    pub currency_scale: u32,
}

impl PayrollSettings {
    /// Validates the constants and the calendar/rounding settings.
    pub fn validate(&self) -> EngineResult<()> {
        self.salary.validate()?;

        if !(1..=31).contains(&self.half_boundary_day) {
            return Err(EngineError::InvalidConfig {
                field: "half_boundary_day".to_string(),
                message: format!("must be between 1 and 31, got {}", self.half_boundary_day),
            });
        }

        if self.currency_scale > MAX_CURRENCY_SCALE {
            return Err(EngineError::InvalidConfig {
                field: "currency_scale".to_string(),
                message: format!(
                    "must be at most {}, got {}",
                    MAX_CURRENCY_SCALE, self.currency_scale
                ),
            });
        }

        Ok(())
    }
}

/// Category table file structure (`categories.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesConfig {
    /// Map of drink type to menu category.
    pub categories: HashMap<String, RecipeCategory>,
}

/// The complete café configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct CafeConfig {
    /// Payroll settings.
    settings: PayrollSettings,
    /// Drink type lookup table.
    categories: CategoryTable,
    /// Technical cards, empty when the directory ships none.
    catalog: TechCardCatalog,
}

impl CafeConfig {
    /// Creates a new CafeConfig from its component parts.
    pub fn new(
        settings: PayrollSettings,
        categories: CategoryTable,
        catalog: TechCardCatalog,
    ) -> Self {
        Self {
            settings,
            categories,
            catalog,
        }
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the drink type lookup table.
    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Returns the technical card catalog.
    pub fn catalog(&self) -> &TechCardCatalog {
        &self.catalog
    }
}
