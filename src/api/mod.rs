//! HTTP API for the site dashboard.
//!
//! Exposes sign-in, the overview, and CRUD routes for sites, materials,
//! expenses and vehicles. Data routes are scoped to the tenant of the
//! caller's session.

mod extract;
mod handlers;
mod request;
mod response;
mod state;

pub use extract::AuthSession;
pub use handlers::create_router;
pub use request::{
    ExportSnapshot, HealthResponse, SearchQuery, SessionInfo, SignInRequest, SignInResponse,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
