//! Credential checking.

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Email and password as submitted to the sign-in route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Decides whether credentials identify a user.
pub trait Authorizer: Send + Sync {
    /// Returns the user for `credentials`, or `None` to reject them.
    fn authorize(&self, credentials: &Credentials) -> Option<User>;
}

/// Accepts any non-empty email and password.
///
/// There is no user store and no password check; every accepted sign-in is
/// the same demo user carrying the email that was typed.
#[derive(Debug, Clone)]
pub struct DemoAuthorizer {
    user_id: String,
    user_name: String,
}

impl DemoAuthorizer {
    /// Creates an authorizer that signs everyone in as `user_name`.
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }
}

impl Default for DemoAuthorizer {
    fn default() -> Self {
        Self::new("demo-user-id", "Demo User")
    }
}

impl Authorizer for DemoAuthorizer {
    fn authorize(&self, credentials: &Credentials) -> Option<User> {
        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.is_empty() {
            return None;
        }
        Some(User {
            id: self.user_id.clone(),
            email: email.to_string(),
            name: self.user_name.clone(),
        })
    }
}
