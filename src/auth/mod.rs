//! Demo authentication and sessions.

mod authorizer;
mod session;

pub use authorizer::{Authorizer, Credentials, DemoAuthorizer};
pub use session::{Session, SessionStore};
