//! Response types for the Payroll Engine API.
//!
//! This module defines the response bodies and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::PayslipCalculation;
use crate::error::EngineError;
use crate::models::PayrollRecord;

/// Body of a successful `POST /payroll/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratePayrollResponse {
    /// Number of records created.
    pub created: usize,
    /// The created records.
    pub records: Vec<PayrollRecord>,
}

/// Body of a successful `POST /payroll/preview`.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewPayrollResponse {
    /// Number of payslips computed.
    pub count: usize,
    /// Each employee's payslip and audit trace.
    pub payslips: Vec<PayslipCalculation>,
}

/// A payroll record with its payslip title, as shown on a payslip view.
#[derive(Debug, Clone, Serialize)]
pub struct PayslipView {
    /// Title such as `"Payslip - March 2026"`.
    pub period_label: String,
    /// Sum of every deduction.
    pub total_deductions: rust_decimal::Decimal,
    /// The stored record.
    #[serde(flatten)]
    pub record: PayrollRecord,
}

impl From<PayrollRecord> for PayslipView {
    fn from(record: PayrollRecord) -> Self {
        Self {
            period_label: record.period_label(),
            total_deductions: record.payslip.total_deductions(),
            record,
        }
    }
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
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 for a body that is not valid JSON.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::malformed_json(message),
        }
    }

    /// A 422 for a body that is JSON but has the wrong shape.
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: ApiError::new("VALIDATION_ERROR", message),
        }
    }

    /// A 400 for a path parameter that does not parse.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new("INVALID_PATH", message),
        }
    }

    /// A 500 for a failure that has no engine error kind.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError::new("INTERNAL_ERROR", "The request could not be completed"),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::Validation { field, .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details("VALIDATION_ERROR", message, field),
            },
            EngineError::EmptyPopulation { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("EMPTY_POPULATION", message),
            },
            EngineError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", message),
            },
            EngineError::PersistenceFailure { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("PERSISTENCE_FAILURE", message),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::RateScheduleNotFound { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("CONFIG_ERROR", message),
            },
        }
    }
}
