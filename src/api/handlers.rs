//! HTTP request handlers for the site dashboard API.
//!
//! Every `/api` route except sign-in needs a bearer token; the session it
//! resolves to decides which tenant's data the handler reads or writes.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analytics::{
    DashboardOverview, ExpenseTotals, MaterialAlerts, collect_material_alerts, filter_by_search,
    summarize_expenses,
};
use crate::error::DashboardError;
use crate::models::{Expense, Material, Site, Vehicle};
use crate::store::validate_tenant_name;
use crate::validation::{
    ExpenseForm, MaterialForm, QuantityForm, SiteForm, SiteUpdate, VehicleForm, VehicleUpdate,
};

use super::extract::AuthSession;
use super::request::{
    ExportSnapshot, HealthResponse, SearchQuery, SessionInfo, SignInRequest, SignInResponse,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/signout", post(sign_out))
        .route("/api/session", get(session_info))
        .route("/api/dashboard", get(dashboard))
        .route("/api/sites", get(list_sites).post(create_site))
        .route(
            "/api/sites/:id",
            get(get_site).patch(update_site).delete(delete_site),
        )
        .route("/api/materials", get(list_materials).post(create_material))
        .route("/api/materials/alerts", get(material_alerts))
        .route("/api/materials/:id", get(get_material).delete(delete_material))
        .route("/api/materials/:id/purchases", post(record_purchase))
        .route("/api/materials/:id/consumptions", post(record_consumption))
        .route("/api/expenses", get(list_expenses).post(create_expense))
        .route("/api/expenses/summary", get(expense_summary))
        .route("/api/expenses/:id", get(get_expense).delete(delete_expense))
        .route("/api/expenses/:id/approve", post(approve_expense))
        .route("/api/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/api/vehicles/:id",
            get(get_vehicle).patch(update_vehicle).delete(delete_vehicle),
        )
        .route("/api/export", get(export))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message names the offending field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::new(StatusCode::BAD_REQUEST, error))
}

/// Logs a failed request and converts the error for the response.
fn failure(correlation_id: Uuid, error: impl Into<DashboardError>) -> ApiErrorResponse {
    let error = error.into();
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    error.into()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// Authentication

async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> ApiResult<Json<SignInResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;

    let tenant = request
        .tenant_or(&state.settings().auth.default_tenant)
        .to_string();
    validate_tenant_name(&tenant).map_err(|e| failure(correlation_id, e))?;

    let user = state
        .authorizer()
        .authorize(&request.credentials())
        .ok_or_else(|| failure(correlation_id, DashboardError::InvalidCredentials))?;

    state
        .store()
        .admit(&tenant)
        .await
        .map_err(|e| failure(correlation_id, e))?;
    let session = state
        .sessions()
        .issue(user, &tenant, Utc::now())
        .await
        .map_err(|e| failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        tenant = %session.tenant,
        email = %session.user.email,
        "User signed in"
    );
    Ok(Json(session.into()))
}

async fn sign_out(State(state): State<AppState>, auth: AuthSession) -> StatusCode {
    state.sessions().revoke(&auth.session.token).await;
    info!(
        correlation_id = %auth.correlation_id,
        tenant = %auth.tenant(),
        "User signed out"
    );
    StatusCode::NO_CONTENT
}

async fn session_info(auth: AuthSession) -> Json<SessionInfo> {
    Json(SessionInfo::from(&auth.session))
}

// Overview

async fn dashboard(State(state): State<AppState>, auth: AuthSession) -> Json<DashboardOverview> {
    let limit = state.settings().dashboard.recent_expense_limit;
    let overview = state
        .store()
        .read(auth.tenant(), |data| data.overview(limit))
        .await;
    debug!(
        correlation_id = %auth.correlation_id,
        tenant = %auth.tenant(),
        sites = overview.sites.len(),
        "Built dashboard overview"
    );
    Json(overview)
}

async fn export(State(state): State<AppState>, auth: AuthSession) -> Json<ExportSnapshot> {
    let data = state.store().read(auth.tenant(), |data| data.clone()).await;
    info!(
        correlation_id = %auth.correlation_id,
        tenant = %auth.tenant(),
        "Exported tenant data"
    );
    Json(ExportSnapshot {
        tenant: auth.tenant().to_string(),
        exported_at: Utc::now(),
        data,
    })
}

// Sites

async fn list_sites(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Site>> {
    let sites: Vec<Site> = state
        .store()
        .read(auth.tenant(), |data| {
            filter_by_search(&data.sites, query.search.as_deref())
                .into_iter()
                .cloned()
                .collect()
        })
        .await;
    Json(sites)
}

async fn create_site(
    State(state): State<AppState>,
    auth: AuthSession,
    payload: Result<Json<SiteForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Site>)> {
    let correlation_id = auth.correlation_id;
    let form = parse_body(payload, correlation_id)?;
    let new_site = form.validate().map_err(|e| failure(correlation_id, e))?;

    let site = state
        .store()
        .write(auth.tenant(), |data| data.add_site(new_site))
        .await;
    info!(
        correlation_id = %correlation_id,
        tenant = %auth.tenant(),
        site_id = %site.id,
        budget = %site.budget,
        "Site created"
    );
    Ok((StatusCode::CREATED, Json(site)))
}

async fn get_site(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Site>> {
    state
        .store()
        .read(auth.tenant(), |data| data.site(&id).cloned())
        .await
        .map(Json)
        .map_err(|e| failure(auth.correlation_id, e))
}

async fn update_site(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
    payload: Result<Json<SiteUpdate>, JsonRejection>,
) -> ApiResult<Json<Site>> {
    let correlation_id = auth.correlation_id;
    let update = parse_body(payload, correlation_id)?;
    update.validate().map_err(|e| failure(correlation_id, e))?;

    let site = state
        .store()
        .write(auth.tenant(), |data| data.update_site(&id, &update))
        .await
        .map_err(|e| failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        tenant = %auth.tenant(),
        site_id = %site.id,
        progress = site.progress,
        "Site updated"
    );
    Ok(Json(site))
}

async fn delete_site(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .store()
        .write(auth.tenant(), |data| data.remove_site(&id))
        .await
        .map_err(|e| failure(auth.correlation_id, e))?;
    info!(
        correlation_id = %auth.correlation_id,
        tenant = %auth.tenant(),
        site_id = %id,
        "Site deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

// Materials

async fn list_materials(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Material>> {
    let materials: Vec<Material> = state
        .store()
        .read(auth.tenant(), |data| {
            filter_by_search(&data.materials, query.search.as_deref())
                .into_iter()
                .cloned()
                .collect()
        })
        .await;
    Json(materials)
}

async fn material_alerts(State(state): State<AppState>, auth: AuthSession) -> Json<MaterialAlerts> {
    let alerts = state
        .store()
        .read(auth.tenant(), |data| collect_material_alerts(&data.materials))
        .await;
    Json(alerts)
}

async fn create_material(
    State(state): State<AppState>,
    auth: AuthSession,
    payload: Result<Json<MaterialForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Material>)> {
    let correlation_id = auth.correlation_id;
    let form = parse_body(payload, correlation_id)?;
    let new_material = form.validate().map_err(|e| failure(correlation_id, e))?;
    let ratio = state.config().config().warning_ratio();

    let material = state
        .store()
        .write(auth.tenant(), |data| {
            data.add_material(new_material, today(), ratio)
        })
        .await;
    info!(
        correlation_id = %correlation_id,
        tenant = %auth.tenant(),
        material_id = %material.id,
        status = ?material.status,
        "Material created"
    );
    Ok((StatusCode::CREATED, Json(material)))
}

async fn get_material(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Material>> {
    state
        .store()
        .read(auth.tenant(), |data| data.material(&id).cloned())
        .await
        .map(Json)
        .map_err(|e| failure(auth.correlation_id, e))
}

async fn delete_material(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .store()
        .write(auth.tenant(), |data| data.remove_material(&id))
        .await
        .map_err(|e| failure(auth.correlation_id, e))?;
    info!(
        correlation_id = %auth.correlation_id,
        tenant = %auth.tenant(),
        material_id = %id,
        "Material deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

async fn record_purchase(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
    payload: Result<Json<QuantityForm>, JsonRejection>,
) -> ApiResult<Json<Material>> {
    let correlation_id = auth.correlation_id;
    let quantity = parse_body(payload, correlation_id)?
        .validate()
        .map_err(|e| failure(correlation_id, e))?;
    let ratio = state.config().config().warning_ratio();

    let material = state
        .store()
        .write(auth.tenant(), |data| {
            data.record_purchase(&id, quantity, today(), ratio)
        })
        .await
        .map_err(|e| failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        tenant = %auth.tenant(),
        material_id = %material.id,
        quantity = %quantity,
        balance = %material.balance,
        "Material purchase recorded"
    );
    Ok(Json(material))
}

async fn record_consumption(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
    payload: Result<Json<QuantityForm>, JsonRejection>,
) -> ApiResult<Json<Material>> {
    let correlation_id = auth.correlation_id;
    let quantity = parse_body(payload, correlation_id)?
        .validate()
        .map_err(|e| failure(correlation_id, e))?;
    let ratio = state.config().config().warning_ratio();

    let material = state
        .store()
        .write(auth.tenant(), |data| {
            data.record_consumption(&id, quantity, today(), ratio)
        })
        .await
        .map_err(|e| failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        tenant = %auth.tenant(),
        material_id = %material.id,
        quantity = %quantity,
        balance = %material.balance,
        status = ?material.status,
        "Material consumption recorded"
    );
    Ok(Json(material))
}

// Expenses

async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Expense>> {
    let expenses: Vec<Expense> = state
        .store()
        .read(auth.tenant(), |data| {
            filter_by_search(&data.expenses, query.search.as_deref())
                .into_iter()
                .cloned()
                .collect()
        })
        .await;
    Json(expenses)
}

async fn expense_summary(State(state): State<AppState>, auth: AuthSession) -> Json<ExpenseTotals> {
    let totals = state
        .store()
        .read(auth.tenant(), |data| summarize_expenses(&data.expenses))
        .await;
    Json(totals)
}

async fn create_expense(
    State(state): State<AppState>,
    auth: AuthSession,
    payload: Result<Json<ExpenseForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let correlation_id = auth.correlation_id;
    let form = parse_body(payload, correlation_id)?;
    let new_expense = form
        .validate(today())
        .map_err(|e| failure(correlation_id, e))?;

    let expense = state
        .store()
        .write(auth.tenant(), |data| data.add_expense(new_expense))
        .await;
    info!(
        correlation_id = %correlation_id,
        tenant = %auth.tenant(),
        expense_id = %expense.id,
        amount = %expense.amount,
        "Expense recorded"
    );
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn get_expense(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Expense>> {
    state
        .store()
        .read(auth.tenant(), |data| data.expense(&id).cloned())
        .await
        .map(Json)
        .map_err(|e| failure(auth.correlation_id, e))
}

async fn approve_expense(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Expense>> {
    let expense = state
        .store()
        .write(auth.tenant(), |data| data.approve_expense(&id))
        .await
        .map_err(|e| failure(auth.correlation_id, e))?;
    info!(
        correlation_id = %auth.correlation_id,
        tenant = %auth.tenant(),
        expense_id = %expense.id,
        "Expense approved"
    );
    Ok(Json(expense))
}

async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .store()
        .write(auth.tenant(), |data| data.remove_expense(&id))
        .await
        .map_err(|e| failure(auth.correlation_id, e))?;
    info!(
        correlation_id = %auth.correlation_id,
        tenant = %auth.tenant(),
        expense_id = %id,
        "Expense deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

// Vehicles

async fn list_vehicles(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Vehicle>> {
    let vehicles: Vec<Vehicle> = state
        .store()
        .read(auth.tenant(), |data| {
            filter_by_search(&data.vehicles, query.search.as_deref())
                .into_iter()
                .cloned()
                .collect()
        })
        .await;
    Json(vehicles)
}

async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthSession,
    payload: Result<Json<VehicleForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Vehicle>)> {
    let correlation_id = auth.correlation_id;
    let form = parse_body(payload, correlation_id)?;
    let new_vehicle = form
        .validate(today())
        .map_err(|e| failure(correlation_id, e))?;

    let vehicle = state
        .store()
        .write(auth.tenant(), |data| data.add_vehicle(new_vehicle))
        .await;
    info!(
        correlation_id = %correlation_id,
        tenant = %auth.tenant(),
        vehicle_id = %vehicle.id,
        "Vehicle added"
    );
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<Json<Vehicle>> {
    state
        .store()
        .read(auth.tenant(), |data| data.vehicle(&id).cloned())
        .await
        .map(Json)
        .map_err(|e| failure(auth.correlation_id, e))
}

async fn update_vehicle(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
    payload: Result<Json<VehicleUpdate>, JsonRejection>,
) -> ApiResult<Json<Vehicle>> {
    let correlation_id = auth.correlation_id;
    let update = parse_body(payload, correlation_id)?;
    update.validate().map_err(|e| failure(correlation_id, e))?;

    let vehicle = state
        .store()
        .write(auth.tenant(), |data| data.update_vehicle(&id, &update))
        .await
        .map_err(|e| failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        tenant = %auth.tenant(),
        vehicle_id = %vehicle.id,
        status = ?vehicle.status,
        "Vehicle updated"
    );
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .store()
        .write(auth.tenant(), |data| data.remove_vehicle(&id))
        .await
        .map_err(|e| failure(auth.correlation_id, e))?;
    info!(
        correlation_id = %auth.correlation_id,
        tenant = %auth.tenant(),
        vehicle_id = %id,
        "Vehicle deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
