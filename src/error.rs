//! Error types for the site dashboard service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while serving dashboard data.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// The main error type for the site dashboard service.
///
/// All fallible operations in the crate return this error type, making it
/// easy to map failures onto HTTP responses in one place.
///
/// # Example
///
/// ```
/// use site_dashboard::error::DashboardError;
///
/// let error = DashboardError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum DashboardError {
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

    /// Configuration parsed but holds values the service cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// Submitted data failed one or more field rules.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The authorizer rejected the supplied credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No usable bearer token accompanied the request.
    #[error("Unauthorized: {reason}")]
    Unauthorized {
        /// Why the request could not be authenticated.
        reason: String,
    },

    /// The session token was valid once but has expired.
    #[error("Session expired")]
    SessionExpired,

    /// The requested tenant name is not acceptable.
    #[error("Invalid tenant '{tenant}'")]
    InvalidTenant {
        /// The rejected tenant name.
        tenant: String,
    },

    /// A bounded in-memory table is full.
    #[error("Capacity reached: at most {limit} {resource}")]
    CapacityReached {
        /// What ran out (e.g., "tenants").
        resource: &'static str,
        /// The configured limit.
        limit: usize,
    },

    /// A record lookup by id found nothing.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record (e.g., "site").
        entity: &'static str,
        /// The id that was looked up.
        id: String,
    },
}

impl From<ValidationErrors> for DashboardError {
    fn from(errors: ValidationErrors) -> Self {
        DashboardError::Validation(errors)
    }
}

/// A type alias for Results that return DashboardError.
pub type DashboardResult<T> = Result<T, DashboardError>;
