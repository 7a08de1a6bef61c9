//! Response types for the café payroll API.
//!
//! This module defines the success payloads that are not domain types of
//! their own, the error body, and the mapping from [`EngineError`] to HTTP
//! statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{CategoryPercentage, ProductSales};
use crate::error::{EngineError, ErrorKind};
use crate::techcard::CatalogEntry;

/// Response body of `POST /sales/revenue-series`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueSeriesResponse {
    /// The calendar year.
    pub year: i32,
    /// The month number (1-12).
    pub month: u32,
    /// Daily revenue; index `i` is day `i + 1`.
    pub revenues: Vec<Decimal>,
    /// Sum of the series.
    pub total: Decimal,
}

/// Response body of `POST /sales/breakdown`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesBreakdownResponse {
    /// Best-selling products, most sold first.
    pub top_products: Vec<ProductSales>,
    /// Whole-percent share of each category.
    pub categories: Vec<CategoryPercentage>,
}

/// Response body of `GET /techcards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechCardsResponse {
    /// Number of returned cards.
    pub count: usize,
    /// The matching cards.
    pub entries: Vec<CatalogEntry>,
}

/// Response body of `GET /invoices/:number/exists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceExistsResponse {
    /// The queried invoice number.
    pub number: String,
    /// Whether it is stored.
    pub exists: bool,
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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
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

fn error_code(error: &EngineError) -> &'static str {
    match error {
        EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
            "CONFIG_ERROR"
        }
        EngineError::InvalidConfig { .. } => "INVALID_SETTINGS",
        EngineError::InvalidRevenue { .. } => "INVALID_REVENUE",
        EngineError::InvalidShift { .. } => "INVALID_SHIFT",
        EngineError::DateOutOfRange { .. } => "DATE_OUT_OF_RANGE",
        EngineError::LengthMismatch { .. } => "LENGTH_MISMATCH",
        EngineError::EmptySelection { .. } => "EMPTY_SELECTION",
        EngineError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
        EngineError::DuplicateInvoice { .. } => "DUPLICATE_INVOICE",
        EngineError::InvoiceStorage { .. } => "STORAGE_ERROR",
        EngineError::Recognition(_) => "RECOGNITION_ERROR",
    }
}

fn status_for(error: &EngineError) -> StatusCode {
    // Server configuration is validated at startup, so an invalid setting
    // here came from request overrides.
    if let EngineError::InvalidConfig { .. } = error {
        return StatusCode::BAD_REQUEST;
    }

    match error.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Configuration | ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Recognition => StatusCode::BAD_GATEWAY,
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = status_for(&error);
        let code = error_code(&error);

        let error = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiError::with_details(code, "Configuration error", error.to_string())
            }
            EngineError::InvoiceStorage { .. } => {
                ApiError::with_details(code, "Invoice store failed", error.to_string())
            }
            other => ApiError::new(code, other.to_string()),
        };

        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::RecognitionError;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        let api_error: ApiErrorResponse = EngineError::DateOutOfRange {
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            year: 2025,
            month: 3,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "DATE_OUT_OF_RANGE");
        assert!(api_error.error.message.contains("2025-04-01"));
    }

    #[test]
    fn test_invalid_settings_map_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidConfig {
            field: "base_rate".to_string(),
            message: "must not be negative, got -1".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_SETTINGS");
    }

    #[test]
    fn test_status_per_kind() {
        let cases: Vec<(EngineError, StatusCode)> = vec![
            (
                EngineError::EmployeeNotFound {
                    employee_id: "ghost".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                EngineError::DuplicateInvoice {
                    number: "0001".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                EngineError::InvoiceStorage {
                    message: "disk full".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                EngineError::ConfigNotFound {
                    path: "payroll.yaml".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                RecognitionError::Unavailable {
                    message: "timeout".to_string(),
                }
                .into(),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            let api_error: ApiErrorResponse = error.into();
            assert_eq!(api_error.status, expected, "code {}", api_error.error.code);
        }
    }
}
