//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! reference data from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

use super::types::{
    CompanyPolicy, ContributionScheme, Currency, ExchangeRate, PayrollComponent, PayrollConfig,
    TaxTable,
};

/// Top-level shape of `components.yaml`.
#[derive(Debug, Deserialize)]
struct ComponentsFile {
    components: Vec<PayrollComponent>,
}

/// Top-level shape of `currencies.yaml`.
#[derive(Debug, Deserialize)]
struct CurrenciesFile {
    currencies: Vec<Currency>,
    #[serde(default)]
    exchange_rates: Vec<ExchangeRate>,
}

/// Top-level shape of `tax_tables.yaml`.
#[derive(Debug, Deserialize)]
struct TaxTablesFile {
    tax_tables: Vec<TaxTable>,
}

/// Top-level shape of `contributions.yaml`.
#[derive(Debug, Deserialize)]
struct ContributionsFile {
    schemes: Vec<ContributionScheme>,
}

/// Loads and provides access to payroll reference data.
///
/// The `ConfigLoader` reads YAML files from a directory and exposes the
/// validated [`PayrollConfig`] the engine computes against.
///
/// # Directory Structure
///
/// ```text
/// config/demo/
/// ├── policy.yaml         # Company policy
/// ├── components.yaml     # Earning/deduction component catalog
/// ├── currencies.yaml     # Currencies and exchange rates
/// ├── tax_tables.yaml     # Progressive tax tables
/// └── contributions.yaml  # Statutory contribution schemes
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/demo").unwrap();
/// println!("Policy: {}", loader.config().policy().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads reference data from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/demo")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The loaded data fails [`PayrollConfig::new`] validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<CompanyPolicy>(&path.join("policy.yaml"))?;
        let components = Self::load_yaml::<ComponentsFile>(&path.join("components.yaml"))?;
        let currencies = Self::load_yaml::<CurrenciesFile>(&path.join("currencies.yaml"))?;
        let tax_tables = Self::load_yaml::<TaxTablesFile>(&path.join("tax_tables.yaml"))?;
        let contributions =
            Self::load_yaml::<ContributionsFile>(&path.join("contributions.yaml"))?;

        let config = PayrollConfig::new(
            policy,
            currencies.currencies,
            currencies.exchange_rates,
            components.components,
            tax_tables.tax_tables,
            contributions.schemes,
        )?;

        Ok(Self { config })
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

    /// Returns the validated reference data set.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }
}
