//! Response types for the payroll HTTP API.
//!
//! This module defines the error response structures and the mapping
//! from engine errors to HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// Body of a successful `POST /runs/{id}/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Human-readable outcome.
    pub detail: String,
    /// The persisted payslip ids, one per participating employee.
    pub payslip_ids: Vec<Uuid>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            },
            EngineError::ComponentNotFound { code } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    format!("Payroll component not found: {}", code),
                    "A payslip line references a component missing from the catalog",
                ),
            },
            EngineError::NoEarningComponent => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "No earning component configured",
                    "At least one earning-kind component is required to compute basic pay",
                ),
            },
            EngineError::ExchangeRateNotFound { base, quote, date } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "EXCHANGE_RATE_NOT_FOUND",
                    format!("No exchange rate from {} to {}", base, quote),
                    format!("No rate row exists on or before {}", date),
                ),
            },
            EngineError::RunNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("RUN_NOT_FOUND", format!("Payroll run not found: {}", id)),
            },
            EngineError::InvalidRunState { action, status } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "INVALID_RUN_STATE",
                    format!("Cannot {} a run in {} state", action, status),
                ),
            },
            EngineError::DuplicateRun { year, month } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "DUPLICATE_RUN",
                    format!("A payroll run already exists for {:02}/{}", month, year),
                ),
            },
            EngineError::InvalidPeriod { year, month } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "INVALID_PERIOD",
                    format!("Invalid payroll period {}/{}", month, year),
                ),
            },
        }
    }
}
