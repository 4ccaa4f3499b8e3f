//! Reference data configuration for payroll computation.
//!
//! This module provides strongly-typed reference data (component catalog,
//! tax tables, contribution schemes, currencies, company policy) and the
//! YAML loader that reads it from a configuration directory.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompanyPolicy, ComponentKind, ContributionScheme, Currency, ExchangeRate, MissingRatePolicy,
    PayrollComponent, PayrollConfig, ProrationMethod, TaxBracket, TaxTable,
};
