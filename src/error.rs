//! Error types for the payroll computation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing a payroll run.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::RunStatus;

/// The main error type for the payroll computation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Reference data failed validation (duplicate codes, overlapping
    /// tax brackets, unknown settlement currency, and similar).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the validation failure.
        message: String,
    },

    /// A payslip line referenced a component code missing from the catalog.
    #[error("Payroll component not found: {code}")]
    ComponentNotFound {
        /// The component code that was not found.
        code: String,
    },

    /// No earning-kind component is configured at all, so a basic pay
    /// line cannot be produced for any employee.
    #[error("No earning component configured")]
    NoEarningComponent,

    /// No exchange rate row exists for a currency pair and the policy
    /// requires conversions to fail rather than fall back to 1:1.
    #[error("No exchange rate from {base} to {quote} on or before {date}")]
    ExchangeRateNotFound {
        /// The source currency code.
        base: String,
        /// The settlement currency code.
        quote: String,
        /// The latest date considered for the lookup.
        date: NaiveDate,
    },

    /// The requested payroll run does not exist.
    #[error("Payroll run not found: {id}")]
    RunNotFound {
        /// The run identifier that was not found.
        id: Uuid,
    },

    /// A run lifecycle action was attempted from a state that does not
    /// permit it. The run is left untouched.
    #[error("Cannot {action} a run in {status} state")]
    InvalidRunState {
        /// The attempted action ("generate", "close" or "reopen").
        action: &'static str,
        /// The run's current status.
        status: RunStatus,
    },

    /// A run already exists for the given period.
    #[error("A payroll run already exists for {month:02}/{year}")]
    DuplicateRun {
        /// The year of the clashing run.
        year: i32,
        /// The month of the clashing run.
        month: u32,
    },

    /// The (year, month) pair does not describe a real calendar month.
    #[error("Invalid payroll period {month}/{year}")]
    InvalidPeriod {
        /// The rejected year.
        year: i32,
        /// The rejected month.
        month: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_component_not_found_displays_code() {
        let error = EngineError::ComponentNotFound {
            code: "ALW_TRANSPORT".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Payroll component not found: ALW_TRANSPORT"
        );
    }

    #[test]
    fn test_exchange_rate_not_found_displays_pair_and_date() {
        let error = EngineError::ExchangeRateNotFound {
            base: "USD".to_string(),
            quote: "XAF".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No exchange rate from USD to XAF on or before 2026-01-31"
        );
    }

    #[test]
    fn test_invalid_run_state_displays_action_and_status() {
        let error = EngineError::InvalidRunState {
            action: "close",
            status: RunStatus::Draft,
        };
        assert_eq!(error.to_string(), "Cannot close a run in draft state");
    }

    #[test]
    fn test_duplicate_run_displays_period() {
        let error = EngineError::DuplicateRun {
            year: 2026,
            month: 3,
        };
        assert_eq!(
            error.to_string(),
            "A payroll run already exists for 03/2026"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_no_earning_component() -> EngineResult<()> {
            Err(EngineError::NoEarningComponent)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_no_earning_component()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
