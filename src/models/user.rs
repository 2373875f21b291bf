//! Signed-in user.

use serde::{Deserialize, Serialize};

/// A user accepted by the authorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier.
    pub id: String,
    /// Email the user signed in with.
    pub email: String,
    /// Display name.
    pub name: String,
}
