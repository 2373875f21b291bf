//! Integration tests for the site dashboard service.
//!
//! These drive the full router the way the dashboard front end does:
//! - Sign-in and session handling
//! - Overview totals over the seed data
//! - Add Site form validation
//! - Material stock entries and status changes
//! - Expenses and vehicles
//! - Tenant isolation and export

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use site_dashboard::api::{AppState, create_router};
use site_dashboard::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/demo").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal as string")).unwrap()
}

async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let body = match body {
        Some(body) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn sign_in(router: &Router, tenant: Option<&str>) -> String {
    let mut body = json!({"email": "site.lead@example.com", "password": "hunter2"});
    if let Some(tenant) = tenant {
        body["tenant"] = json!(tenant);
    }
    let (status, json) = call(router, "POST", "/api/auth/signin", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "sign-in failed: {}", json);
    json["token"].as_str().unwrap().to_string()
}

fn full_site_form() -> Value {
    json!({
        "name": "Lakeside Towers",
        "location": "Hyderabad, Telangana",
        "address": "Plot 12, Lake Road",
        "city": "Hyderabad",
        "state": "Telangana",
        "pincode": "500081",
        "manager": "Kavya Reddy",
        "manager_phone": "98480 22338",
        "manager_email": "kavya@example.com",
        "client_name": "Lakeside Developers",
        "client_phone": "040-234-5678",
        "client_email": "projects@lakeside.example.com",
        "project_type": "residential",
        "start_date": "2024-05-01",
        "end_date": "2025-10-31",
        "budget": 12500000,
        "description": "Two residential towers",
        "site_area": "8500",
        "building_type": "apartment",
        "floors": "14"
    })
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_any_non_empty_credentials_sign_in() {
    let router = create_router_for_test();
    for (email, password) in [("a@b.co", "x"), ("not-even-an-email", "pw")] {
        let (status, json) = call(
            &router,
            "POST",
            "/api/auth/signin",
            None,
            Some(json!({"email": email, "password": password})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["user"]["email"], email);
        assert_eq!(json["user"]["id"], "demo-user-id");
    }
}

#[tokio::test]
async fn test_empty_credentials_are_rejected() {
    let router = create_router_for_test();
    for body in [
        json!({"email": "", "password": "x"}),
        json!({"email": "   ", "password": "x"}),
        json!({"email": "a@b.co", "password": ""}),
        json!({}),
    ] {
        let (status, json) = call(&router, "POST", "/api/auth/signin", None, Some(body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], "INVALID_CREDENTIALS");
    }
}

#[tokio::test]
async fn test_session_reports_user_and_tenant() {
    let router = create_router_for_test();
    let token = sign_in(&router, Some("north-zone")).await;

    let (status, json) = call(&router, "GET", "/api/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tenant"], "north-zone");
    assert_eq!(json["user"]["name"], "Demo User");
}

#[tokio::test]
async fn test_signed_out_token_is_refused() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (status, _) = call(&router, "POST", "/api/auth/signout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = call(&router, "GET", "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// =============================================================================
// Overview
// =============================================================================

#[tokio::test]
async fn test_dashboard_totals_over_seed_data() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (status, json) = call(&router, "GET", "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let budget = &json["budget"];
    assert_eq!(budget["site_count"], 3);
    assert_eq!(budget["active_sites"], 3);
    assert_eq!(decimal(&budget["total_budget"]), Decimal::from(16_000_000));
    assert_eq!(decimal(&budget["total_spent"]), Decimal::from(12_300_000));
    assert_eq!(decimal(&budget["remaining"]), Decimal::from(3_700_000));
    assert_eq!(
        decimal(&budget["utilization_percent"]),
        Decimal::from_str("76.9").unwrap()
    );

    assert_eq!(decimal(&json["expenses"]["total"]), Decimal::from(950_000));
    assert_eq!(json["expenses"]["pending_count"], 1);
    assert_eq!(json["fleet"]["total"], 3);
    assert_eq!(json["fleet"]["active"], 2);
    assert_eq!(json["fleet"]["maintenance"], 1);
    assert_eq!(json["material_count"], 4);
}

#[tokio::test]
async fn test_dashboard_alerts_and_recent_expenses() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (_, json) = call(&router, "GET", "/api/dashboard", Some(&token), None).await;

    let critical = json["material_alerts"]["critical"].as_array().unwrap();
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0]["name"], "Aggregate");
    assert_eq!(decimal(&critical[0]["balance"]), Decimal::from(-20));

    let warning = json["material_alerts"]["warning"].as_array().unwrap();
    assert_eq!(warning.len(), 1);
    assert_eq!(warning[0]["name"], "Sand");

    let recent: Vec<&str> = json["recent_expenses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    assert_eq!(recent, vec!["2024-01-20", "2024-01-19", "2024-01-18"]);
}

#[tokio::test]
async fn test_empty_tenant_aggregates_are_zero() {
    let router = create_router_for_test();
    let token = sign_in(&router, Some("cleanup")).await;

    for id in ["1", "2", "3"] {
        for kind in ["sites", "expenses", "vehicles"] {
            let uri = format!("/api/{}/{}", kind, id);
            let (status, _) = call(&router, "DELETE", &uri, Some(&token), None).await;
            assert_eq!(status, StatusCode::NO_CONTENT, "{}", uri);
        }
    }
    for id in ["1", "2", "3", "4"] {
        let uri = format!("/api/materials/{}", id);
        call(&router, "DELETE", &uri, Some(&token), None).await;
    }

    let (_, json) = call(&router, "GET", "/api/dashboard", Some(&token), None).await;
    assert_eq!(decimal(&json["budget"]["total_budget"]), Decimal::ZERO);
    assert_eq!(json["budget"]["utilization_percent"], Value::Null);
    assert_eq!(decimal(&json["expenses"]["total"]), Decimal::ZERO);
    assert_eq!(json["fleet"]["total"], 0);
    assert_eq!(json["fleet"]["average_fuel_consumption"], Value::Null);
    assert_eq!(json["material_count"], 0);
    assert!(json["recent_expenses"].as_array().unwrap().is_empty());
}

// =============================================================================
// Add Site form
// =============================================================================

#[tokio::test]
async fn test_add_site_empty_form_reports_each_required_field() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (status, json) = call(&router, "POST", "/api/sites", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let fields = json["fields"].as_object().unwrap();
    let mut names: Vec<&str> = fields.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "budget",
            "end_date",
            "location",
            "manager",
            "name",
            "project_type",
            "start_date"
        ]
    );
}

#[tokio::test]
async fn test_add_site_rejects_bad_contact_details() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let mut form = full_site_form();
    form["manager_email"] = json!("kavya.example.com");
    form["client_phone"] = json!("12345");

    let (status, json) = call(&router, "POST", "/api/sites", Some(&token), Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["manager_email"], "Invalid email format");
    assert_eq!(json["fields"]["client_phone"], "Invalid phone number");
    assert_eq!(json["fields"].as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_site_whitespace_contact_details_are_invalid() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let mut form = full_site_form();
    form["manager_phone"] = json!("   ");
    form["client_email"] = json!("   ");

    let (status, json) = call(&router, "POST", "/api/sites", Some(&token), Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["manager_phone"], "Invalid phone number");
    assert_eq!(json["fields"]["client_email"], "Invalid email format");
}

#[tokio::test]
async fn test_add_site_budget_above_limit_is_rejected() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let mut form = full_site_form();
    form["budget"] = json!("1000000000000000000000000000");

    let (status, json) = call(&router, "POST", "/api/sites", Some(&token), Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["budget"], "Budget is too large");

    let (status, _) = call(&router, "GET", "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_add_site_with_full_form() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (status, site) =
        call(&router, "POST", "/api/sites", Some(&token), Some(full_site_form())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(site["name"], "Lakeside Towers");
    assert_eq!(site["progress"], 0);
    assert_eq!(decimal(&site["spent"]), Decimal::ZERO);
    assert_eq!(decimal(&site["budget"]), Decimal::from(12_500_000));
    assert_eq!(site["project_type"], "residential");
    assert_eq!(site["floors"], 14);

    let (_, sites) = call(&router, "GET", "/api/sites", Some(&token), None).await;
    assert_eq!(sites.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_add_site_end_before_start_is_rejected() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let mut form = full_site_form();
    form["end_date"] = json!("2024-04-01");

    let (status, json) = call(&router, "POST", "/api/sites", Some(&token), Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["fields"]["end_date"],
        "End date must be on or after start date"
    );
}

// =============================================================================
// Materials
// =============================================================================

#[tokio::test]
async fn test_new_material_over_consumed_is_critical() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (status, material) = call(
        &router,
        "POST",
        "/api/materials",
        Some(&token),
        Some(json!({"name": "Bricks", "unit": "pieces", "purchased": "1000", "consumed": "1200"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&material["balance"]), Decimal::from(-200));
    assert_eq!(material["status"], "critical");
}

#[tokio::test]
async fn test_purchase_and_consumption_track_balance() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (_, cement) = call(
        &router,
        "POST",
        "/api/materials/1/consumptions",
        Some(&token),
        Some(json!({"quantity": 380})),
    )
    .await;
    assert_eq!(decimal(&cement["balance"]), Decimal::from(20));
    assert_eq!(cement["status"], "warning");

    let (_, cement) = call(
        &router,
        "POST",
        "/api/materials/1/purchases",
        Some(&token),
        Some(json!({"quantity": "500"})),
    )
    .await;
    assert_eq!(decimal(&cement["purchased"]), Decimal::from(3000));
    assert_eq!(decimal(&cement["balance"]), Decimal::from(520));
    assert_eq!(cement["status"], "good");
}

#[tokio::test]
async fn test_material_entry_for_unknown_id_is_404() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (status, json) = call(
        &router,
        "POST",
        "/api/materials/missing/purchases",
        Some(&token),
        Some(json!({"quantity": "5"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// =============================================================================
// Expenses and vehicles
// =============================================================================

#[tokio::test]
async fn test_new_expense_is_pending() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (status, expense) = call(
        &router,
        "POST",
        "/api/expenses",
        Some(&token),
        Some(json!({
            "description": "Diesel for excavator",
            "amount": "18500",
            "category": "Fuel",
            "date": "2024-01-21",
            "site": "Downtown Project"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expense["approved"], false);

    let (_, summary) = call(&router, "GET", "/api/expenses/summary", Some(&token), None).await;
    assert_eq!(summary["pending_count"], 2);
    assert_eq!(decimal(&summary["pending"]), Decimal::from(198_500));
    assert_eq!(decimal(&summary["by_category"]["Fuel"]), Decimal::from(18_500));
}

#[tokio::test]
async fn test_expense_form_errors() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (status, json) = call(
        &router,
        "POST",
        "/api/expenses",
        Some(&token),
        Some(json!({"description": " ", "amount": "-10"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = json["fields"].as_object().unwrap();
    assert_eq!(fields["description"], "Description is required");
    assert_eq!(fields["amount"], "Amount must be greater than zero");
    assert_eq!(fields["category"], "Category is required");
    assert_eq!(fields["site"], "Site is required");
}

#[tokio::test]
async fn test_vehicle_search_and_create() {
    let router = create_router_for_test();
    let token = sign_in(&router, None).await;

    let (status, vehicle) = call(
        &router,
        "POST",
        "/api/vehicles",
        Some(&token),
        Some(json!({
            "name": "Loader WL-04",
            "type": "Wheel Loader",
            "site": "Residential Complex",
            "fuel_consumption": "18"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(vehicle["status"], "idle");

    let (_, found) = call(
        &router,
        "GET",
        "/api/vehicles?search=residential",
        Some(&token),
        None,
    )
    .await;
    let names: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Crane Truck-02", "Loader WL-04"]);
}

// =============================================================================
// Tenants and export
// =============================================================================

#[tokio::test]
async fn test_tenants_do_not_share_records() {
    let router = create_router_for_test();
    let east = sign_in(&router, Some("east")).await;
    let west = sign_in(&router, Some("west")).await;

    let (status, site) =
        call(&router, "POST", "/api/sites", Some(&east), Some(full_site_form())).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/sites/{}", site["id"].as_str().unwrap());

    let (status, _) = call(&router, "GET", &uri, Some(&east), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&router, "GET", &uri, Some(&west), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, west_sites) = call(&router, "GET", "/api/sites", Some(&west), None).await;
    assert_eq!(west_sites.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_export_contains_every_record() {
    let router = create_router_for_test();
    let token = sign_in(&router, Some("audit")).await;

    let (status, json) = call(&router, "GET", "/api/export", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tenant"], "audit");
    assert_eq!(json["data"]["sites"].as_array().unwrap().len(), 3);
    assert_eq!(json["data"]["materials"].as_array().unwrap().len(), 4);
    assert_eq!(json["data"]["expenses"].as_array().unwrap().len(), 3);
    assert_eq!(json["data"]["vehicles"].as_array().unwrap().len(), 3);
}
