//! Request and reply bodies for the site dashboard API.
//!
//! Record forms live in [`crate::validation`]; this module holds the bodies
//! that only make sense at the HTTP boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{Credentials, Session};
use crate::models::User;
use crate::store::TenantData;

/// Body of `POST /api/auth/signin`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Password.
    #[serde(default)]
    pub password: String,
    /// Tenant to sign in to; the configured default when absent or blank.
    #[serde(default)]
    pub tenant: Option<String>,
}

impl SignInRequest {
    /// Splits out the credentials checked by the authorizer.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    /// The requested tenant, falling back to `default_tenant`.
    pub fn tenant_or<'a>(&'a self, default_tenant: &'a str) -> &'a str {
        self.tenant
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(default_tenant)
    }
}

/// Reply to a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Bearer token for later requests.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: User,
    /// Tenant the session is bound to.
    pub tenant: String,
}

impl From<Session> for SignInResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at,
            user: session.user,
            tenant: session.tenant,
        }
    }
}

/// Reply to `GET /api/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// The signed-in user.
    pub user: User,
    /// Tenant the session is bound to.
    pub tenant: String,
    /// When the session was issued.
    pub issued_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            tenant: session.tenant.clone(),
            issued_at: session.issued_at,
            expires_at: session.expires_at,
        }
    }
}

/// `?search=` on list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring to filter by.
    #[serde(default)]
    pub search: Option<String>,
}

/// Reply to `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Reply to `GET /api/export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSnapshot {
    /// Tenant the data belongs to.
    pub tenant: String,
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,
    /// Every record the tenant holds.
    pub data: TenantData,
}
