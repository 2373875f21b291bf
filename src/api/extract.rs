//! Bearer-token extractor.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::auth::Session;
use crate::error::DashboardError;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// The session behind the request's `Authorization: Bearer` header.
///
/// Also carries the correlation id used in this request's log lines.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The resolved session.
    pub session: Session,
    /// Per-request id for log correlation.
    pub correlation_id: Uuid,
}

impl AuthSession {
    /// Tenant whose data the request may touch.
    pub fn tenant(&self) -> &str {
        &self.session.tenant
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let correlation_id = Uuid::new_v4();

        let Some(token) = bearer_token(parts) else {
            warn!(
                correlation_id = %correlation_id,
                path = %parts.uri.path(),
                "Request without bearer token"
            );
            return Err(DashboardError::Unauthorized {
                reason: "missing bearer token".to_string(),
            }
            .into());
        };

        match state.sessions().resolve(token, Utc::now()).await {
            Ok(session) => Ok(Self {
                session,
                correlation_id,
            }),
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    path = %parts.uri.path(),
                    error = %err,
                    "Session rejected"
                );
                Err(err.into())
            }
        }
    }
}
