//! Application state for the site dashboard API.

use std::sync::Arc;

use chrono::Duration;

use crate::auth::{Authorizer, DemoAuthorizer, SessionStore};
use crate::config::{ConfigLoader, Settings};
use crate::store::DashboardStore;

/// Shared application state.
///
/// Cloned into every handler; all fields are reference counted.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    sessions: Arc<SessionStore>,
    store: Arc<DashboardStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    /// Creates the state from a loaded configuration, using the demo authorizer.
    pub fn new(config: ConfigLoader) -> Self {
        let auth = &config.settings().auth;
        let limits = &config.settings().limits;
        let authorizer = DemoAuthorizer::new(auth.demo_user_id.clone(), auth.demo_user_name.clone());
        let sessions = SessionStore::new(
            Duration::hours(auth.session_ttl_hours),
            limits.max_sessions,
        );
        let store = DashboardStore::new(config.config().seed().clone(), limits.max_tenants);

        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            store: Arc::new(store),
            authorizer: Arc::new(authorizer),
        }
    }

    /// Replaces the authorizer.
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Returns the session registry.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Returns the tenant data store.
    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    /// Returns the credential check used at sign-in.
    pub fn authorizer(&self) -> &dyn Authorizer {
        self.authorizer.as_ref()
    }
}
