//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the café
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::techcard::{CategoryTable, TechCardCatalog};

use super::types::{CafeConfig, CategoriesConfig, PayrollSettings, SalaryConstants};

/// Loads and provides access to the café configuration.
///
/// # Directory Structure
///
/// ```text
/// config/cafe/
/// ├── payroll.yaml     # Salary constants, half boundary, currency scale
/// ├── categories.yaml  # Drink type -> menu category table
/// └── techcards.json   # Technical cards (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use cafe_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/cafe").unwrap();
/// println!("Base rate: {}", loader.salary_constants().base_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CafeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `payroll.yaml` or `categories.yaml` is missing (`ConfigNotFound`)
    /// - any file is malformed (`ConfigParseError`)
    /// - any value is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<PayrollSettings>(&path.join("payroll.yaml"))?;
        settings.validate()?;

        let categories_config = Self::load_yaml::<CategoriesConfig>(&path.join("categories.yaml"))?;
        let categories = CategoryTable::from_entries(categories_config.categories);

        let techcards_path = path.join("techcards.json");
        let catalog = if techcards_path.exists() {
            TechCardCatalog::load_json(&techcards_path, &categories)?
        } else {
            TechCardCatalog::default()
        };

        info!(
            path = %path.display(),
            drink_types = categories.len(),
            techcards = catalog.entries().len(),
            "Loaded café configuration"
        );

        Ok(Self {
            config: CafeConfig::new(settings, categories, catalog),
        })
    }

    /// Builds a loader from in-memory settings, with no categories or cards.
    pub fn from_settings(settings: PayrollSettings) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self {
            config: CafeConfig::new(
                settings,
                CategoryTable::default(),
                TechCardCatalog::default(),
            ),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &CafeConfig {
        &self.config
    }

    /// Returns the configured salary constants.
    pub fn salary_constants(&self) -> &SalaryConstants {
        &self.config.settings().salary
    }

    /// Returns the configured half boundary day.
    pub fn half_boundary_day(&self) -> u32 {
        self.config.settings().half_boundary_day
    }

    /// Returns the number of decimal places shift pay is rounded to.
    pub fn currency_scale(&self) -> u32 {
        self.config.settings().currency_scale
    }

    /// Returns the drink type lookup table.
    pub fn category_table(&self) -> &CategoryTable {
        self.config.categories()
    }

    /// Returns the technical card catalog.
    pub fn catalog(&self) -> &TechCardCatalog {
        self.config.catalog()
    }
}
