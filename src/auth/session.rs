//! Bearer-token sessions.
//!
//! Tokens are random UUIDs held in memory. A session binds the signed-in user
//! to the tenant whose data they see.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DashboardError, DashboardResult};
use crate::models::User;

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    /// The signed-in user.
    pub user: User,
    /// Tenant whose data this session reads and writes.
    pub tenant: String,
    /// When the session was issued.
    pub issued_at: DateTime<Utc>,
    /// When the session stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns true if the session is no longer valid at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// In-memory session registry holding at most `max_sessions` entries.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    max_sessions: usize,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Creates an empty store whose sessions live for `ttl`.
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            ttl,
            max_sessions,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issues a new session for `user` in `tenant`.
    ///
    /// When the store is full, expired sessions are dropped first; if it is
    /// still full the sign-in is refused with `CapacityReached`.
    pub async fn issue(
        &self,
        user: User,
        tenant: &str,
        now: DateTime<Utc>,
    ) -> DashboardResult<Session> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            sessions.retain(|_, session| !session.is_expired(now));
            if sessions.len() >= self.max_sessions {
                warn!(limit = self.max_sessions, "Session limit reached");
                return Err(DashboardError::CapacityReached {
                    resource: "sessions",
                    limit: self.max_sessions,
                });
            }
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user,
            tenant: tenant.to_string(),
            issued_at: now,
            expires_at: now + self.ttl,
        };
        sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    /// Looks up `token`.
    ///
    /// Unknown tokens are `Unauthorized`. Expired tokens are removed and
    /// reported as `SessionExpired`.
    pub async fn resolve(&self, token: &str, now: DateTime<Utc>) -> DashboardResult<Session> {
        let session = self.sessions.read().await.get(token).cloned();
        match session {
            None => Err(DashboardError::Unauthorized {
                reason: "unknown session token".to_string(),
            }),
            Some(session) if session.is_expired(now) => {
                self.sessions.write().await.remove(token);
                Err(DashboardError::SessionExpired)
            }
            Some(session) => Ok(session),
        }
    }

    /// Ends the session for `token`. Returns false if there was none.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drops every session expired at `now` and returns how many were dropped.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        let purged = before - sessions.len();
        if purged > 0 {
            debug!(purged, remaining = sessions.len(), "Purged expired sessions");
        }
        purged
    }

    /// Number of live and not-yet-purged sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no sessions are held.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
