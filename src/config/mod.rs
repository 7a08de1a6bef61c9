//! Configuration loading and management for the café payroll engine.
//!
//! This module loads the salary constants, payout calendar settings and the
//! technical card category table from a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use cafe_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cafe").unwrap();
//! println!("Half boundary day: {}", config.half_boundary_day());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CafeConfig, CategoriesConfig, DEFAULT_CURRENCY_SCALE, DEFAULT_HALF_BOUNDARY_DAY,
    PayrollSettings, SalaryConstants,
};
