//! Integration tests for the KitchenPlan Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

use kitchenplan::config::Config;
use kitchenplan::models::{PlannerProject, Rotation};
use kitchenplan::services::ProjectService;
use kitchenplan::web::{create_router, AppState};

mod fixtures;
use fixtures::{test_project_basic, write_project_file, CABINET_ID, ISLAND_ID, SINK_ID};

/// Creates a test AppState with a temporary workspace.
fn create_test_state() -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let state = AppState::new(Config::default(), temp_dir.path().to_path_buf());
    (state, temp_dir)
}

/// Sends a request and returns status plus parsed JSON body (Null when empty).
async fn send(state: AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ============================================================================
// Health and Catalog
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (state, _temp_dir) = create_test_state();
    let (status, json) = send(state, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_catalog() {
    let (state, _temp_dir) = create_test_state();
    let (status, json) = send(state, "GET", "/api/catalog", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 17);
    assert_eq!(json["categories"].as_array().unwrap().len(), 5);
}

// ============================================================================
// Projects
// ============================================================================

#[tokio::test]
async fn test_list_projects() {
    let (state, temp_dir) = create_test_state();
    write_project_file(temp_dir.path(), "kitchen.json", &test_project_basic());
    fs::write(temp_dir.path().join("broken.json"), "nope").unwrap();
    fs::write(temp_dir.path().join("readme.txt"), "hello").unwrap();

    let (status, json) = send(state, "GET", "/api/projects", None).await;

    assert_eq!(status, StatusCode::OK);
    let projects = json["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["filename"], "kitchen.json");
    assert_eq!(projects[0]["name"], "Test Kitchen");
    assert_eq!(projects[0]["moduleCount"], 3);
}

#[tokio::test]
async fn test_get_project_without_extension() {
    let (state, temp_dir) = create_test_state();
    write_project_file(temp_dir.path(), "kitchen.json", &test_project_basic());

    let (status, json) = send(state, "GET", "/api/projects/kitchen", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "project-test");
    assert_eq!(json["roomSize"]["width"], 400.0);
    assert_eq!(json["modules"][1]["type"], "sink");
    assert_eq!(json["modules"][1]["rotation"], 90);
    assert_eq!(json["modules"][1]["properties"]["material"], "Stainless Steel");
}

#[tokio::test]
async fn test_get_project_not_found() {
    let (state, _temp_dir) = create_test_state();
    let (status, json) = send(state, "GET", "/api/projects/absent.json", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_get_project_path_traversal() {
    let (state, _temp_dir) = create_test_state();
    let (status, json) = send(state, "GET", "/api/projects/..secret.json", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("path traversal"));
}

#[tokio::test]
async fn test_get_malformed_project() {
    let (state, temp_dir) = create_test_state();
    fs::write(temp_dir.path().join("broken.json"), "{ \"modules\": 5 }").unwrap();

    let (status, json) = send(state, "GET", "/api/projects/broken.json", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Error loading project");
    assert!(json["details"].is_string());
}

#[tokio::test]
async fn test_put_project_applies_defaults() {
    let (state, temp_dir) = create_test_state();
    let body = json!({
        "name": "Posted",
        "modules": [
            {"id": "m1", "type": "counter", "x": 5, "y": 5, "width": 120, "height": 40}
        ]
    });

    let (status, _) = send(state, "PUT", "/api/projects/posted.json", Some(body)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let saved = ProjectService::load(&temp_dir.path().join("posted.json")).unwrap();
    assert_eq!(saved.name, "Posted");
    assert_eq!(saved.room_size.width, 400.0);
    assert_eq!(saved.modules[0].name, "Counter");
    assert_eq!(saved.modules[0].rotation, Rotation::Deg0);
}

#[tokio::test]
async fn test_put_project_rejects_invalid_document() {
    let (state, temp_dir) = create_test_state();
    let body = json!({
        "modules": [
            {"id": "m1", "type": "cabinet", "x": 0, "y": 0, "width": 80, "height": 60},
            {"id": "m1", "type": "cabinet", "x": 0, "y": 0, "width": 80, "height": 60}
        ]
    });

    let (status, json) = send(state, "PUT", "/api/projects/dup.json", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["details"].as_str().unwrap().contains("duplicate"));
    assert!(!temp_dir.path().join("dup.json").exists());
}

// ============================================================================
// Module Edits
// ============================================================================

#[tokio::test]
async fn test_add_module_at_position() {
    let (state, temp_dir) = create_test_state();
    let path = write_project_file(temp_dir.path(), "kitchen.json", &PlannerProject::new("Empty"));

    let body = json!({"template": "Refrigerator", "x": 10, "y": 20});
    let (status, json) = send(state, "POST", "/api/projects/kitchen.json/modules", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["type"], "appliance");
    assert_eq!(json["x"], 10.0);
    assert_eq!(json["width"], 70.0);
    assert!(json["id"].as_str().unwrap().starts_with("module-"));

    let saved = ProjectService::load(&path).unwrap();
    assert_eq!(saved.modules.len(), 1);
}

#[tokio::test]
async fn test_add_module_jittered() {
    let (state, temp_dir) = create_test_state();
    write_project_file(temp_dir.path(), "kitchen.json", &PlannerProject::new("Empty"));

    let body = json!({"template": "kitchen island"});
    let (status, json) = send(state, "POST", "/api/projects/kitchen.json/modules", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    let x = json["x"].as_f64().unwrap();
    let y = json["y"].as_f64().unwrap();
    assert!((100.0..300.0).contains(&x));
    assert!((100.0..200.0).contains(&y));
}

#[tokio::test]
async fn test_add_module_errors() {
    let (state, temp_dir) = create_test_state();
    write_project_file(temp_dir.path(), "kitchen.json", &PlannerProject::new("Empty"));

    let (status, json) = send(
        state.clone(),
        "POST",
        "/api/projects/kitchen.json/modules",
        Some(json!({"template": "Pizza Oven"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Unknown template");

    let (status, _) = send(
        state.clone(),
        "POST",
        "/api/projects/kitchen.json/modules",
        Some(json!({"template": "Base Cabinet", "x": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        state,
        "POST",
        "/api/projects/missing.json/modules",
        Some(json!({"template": "Base Cabinet"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_move_module() {
    let (state, temp_dir) = create_test_state();
    let path = write_project_file(temp_dir.path(), "kitchen.json", &test_project_basic());

    let uri = format!("/api/projects/kitchen.json/modules/{CABINET_ID}/position");
    let (status, json) = send(state, "PUT", &uri, Some(json!({"x": 33.5, "y": -4}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["x"], 33.5);
    assert_eq!(json["y"], -4.0);

    let saved = ProjectService::load(&path).unwrap();
    assert_eq!(saved.module(CABINET_ID).unwrap().x, 33.5);
}

#[tokio::test]
async fn test_rotate_module() {
    let (state, temp_dir) = create_test_state();
    write_project_file(temp_dir.path(), "kitchen.json", &test_project_basic());

    let uri = format!("/api/projects/kitchen.json/modules/{SINK_ID}/rotate");
    let (status, json) = send(state, "POST", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["rotation"], 180);
}

#[tokio::test]
async fn test_delete_module() {
    let (state, temp_dir) = create_test_state();
    let path = write_project_file(temp_dir.path(), "kitchen.json", &test_project_basic());

    let uri = format!("/api/projects/kitchen.json/modules/{ISLAND_ID}");
    let (status, _) = send(state.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(ProjectService::load(&path).unwrap().modules.len(), 2);

    let (status, _) = send(state, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_module_leaves_file_untouched() {
    let (state, temp_dir) = create_test_state();
    let path = write_project_file(temp_dir.path(), "kitchen.json", &test_project_basic());
    let before = fs::read_to_string(&path).unwrap();

    let (status, _) = send(
        state.clone(),
        "PUT",
        "/api/projects/kitchen.json/modules/module-missing/position",
        Some(json!({"x": 1, "y": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        state,
        "POST",
        "/api/projects/kitchen.json/modules/module-missing/rotate",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

// ============================================================================
// Finance
// ============================================================================

#[tokio::test]
async fn test_finance_schedule() {
    let (state, _temp_dir) = create_test_state();
    let body = json!({"principal": 10000, "annualRatePercent": 8.5, "termMonths": 24});

    let (status, json) = send(state, "POST", "/api/finance/schedule", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["monthlyPayment"], 454.56);
    assert_eq!(json["entries"].as_array().unwrap().len(), 24);
    assert_eq!(json["entries"][23]["remainingBalance"], 0.0);
}

#[tokio::test]
async fn test_finance_schedule_rejects_zero_term() {
    let (state, _temp_dir) = create_test_state();
    let body = json!({"principal": 10000, "annualRatePercent": 8.5, "termMonths": 0});

    let (status, json) = send(state, "POST", "/api/finance/schedule", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid financing input");
}

#[tokio::test]
async fn test_finance_quote_defaults_and_overrides() {
    let (state, _temp_dir) = create_test_state();

    let (status, json) = send(state.clone(), "POST", "/api/finance/quote", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["monthlyPayment"], 545.47);

    let body = json!({"totalAmount": 15000, "downPayment": 0, "interestRate": 0});
    let (status, json) = send(state, "POST", "/api/finance/quote", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["monthlyPayment"], 625.0);
    assert_eq!(json["totalInterest"], 0.0);
}

#[tokio::test]
async fn test_finance_quote_nothing_to_finance() {
    let (state, _temp_dir) = create_test_state();
    let body = json!({"totalAmount": 1000, "downPayment": 2000});

    let (status, _) = send(state, "POST", "/api/finance/quote", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_finance_compare() {
    let (state, _temp_dir) = create_test_state();
    let (status, json) = send(state, "POST", "/api/finance/compare", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["quote"]["financingAmount"], 12_000.0);
    let options = json["options"].as_array().unwrap();
    assert_eq!(options.len(), 4);
    assert_eq!(options[3]["totalCost"], 16_489.92);
}

#[tokio::test]
async fn test_finance_affordability() {
    let (state, _temp_dir) = create_test_state();
    let body = json!({
        "monthlyIncome": 3000,
        "downPayment": 2000,
        "interestRate": 0,
        "loanTermMonths": 24
    });

    let (status, json) = send(state, "POST", "/api/finance/affordability", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["maxLoanAmount"], 20_160.0);
    assert_eq!(json["maxHomePrice"], 22_160.0);
}

#[tokio::test]
async fn test_finance_invalid_body() {
    let (state, _temp_dir) = create_test_state();
    let (status, json) = send(
        state,
        "POST",
        "/api/finance/affordability",
        Some(json!({"monthlyIncome": "lots"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid request body");
}
