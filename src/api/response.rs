//! Response types for the site dashboard API.
//!
//! This module defines the error response structures and the mapping from
//! [`DashboardError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::validation::ValidationErrors;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Per-field messages for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ValidationErrors>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            fields: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error carrying the failed fields.
    pub fn validation(fields: ValidationErrors) -> Self {
        let message = match fields.len() {
            1 => "1 field is invalid".to_string(),
            n => format!("{} fields are invalid", n),
        };
        Self {
            fields: Some(fields),
            ..Self::new("VALIDATION_ERROR", message)
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
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ValidationErrors> for ApiErrorResponse {
    fn from(fields: ValidationErrors) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::validation(fields))
    }
}

impl From<DashboardError> for ApiErrorResponse {
    fn from(error: DashboardError) -> Self {
        match error {
            DashboardError::ConfigNotFound { path } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            DashboardError::ConfigParseError { path, message } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            DashboardError::InvalidConfig { message } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            ),
            DashboardError::Validation(fields) => fields.into(),
            DashboardError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CREDENTIALS", "Email and password are required"),
            ),
            DashboardError::Unauthorized { reason } => Self::new(
                StatusCode::UNAUTHORIZED,
                ApiError::with_details("UNAUTHORIZED", "Sign in required", reason),
            ),
            DashboardError::SessionExpired => Self::new(
                StatusCode::UNAUTHORIZED,
                ApiError::new("SESSION_EXPIRED", "Session expired, sign in again"),
            ),
            DashboardError::InvalidTenant { tenant } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_TENANT",
                    format!("Invalid tenant '{}'", tenant),
                    "Tenant names use letters, digits, '-' and '_' only",
                ),
            ),
            DashboardError::CapacityReached { resource, limit } => Self::new(
                StatusCode::TOO_MANY_REQUESTS,
                ApiError::with_details(
                    "CAPACITY_REACHED",
                    format!("No room for more {}", resource),
                    format!("The limit is {}", limit),
                ),
            ),
            DashboardError::NotFound { entity, id } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("NOT_FOUND", format!("{} not found: {}", entity, id)),
            ),
        }
    }
}
