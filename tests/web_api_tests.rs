//! Integration tests for the Figma Content Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use figma_content::config::Config;
use figma_content::services::{ContentGenerator, GenerateRequest};
use figma_content::web::{create_router, AppState};

mod fixtures;
use fixtures::{content_json, content_json_with_gap, snapshot, token_dir};

/// Returns the same payload for every request.
struct CannedGenerator(String);

impl ContentGenerator for CannedGenerator {
    fn generate(&self, _request: &GenerateRequest) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

/// Creates a test AppState over an initialised token directory.
fn create_test_state() -> (AppState, TempDir) {
    let temp_dir = token_dir();
    let state = AppState::new(&Config::default(), temp_dir.path().to_path_buf());
    (state, temp_dir)
}

/// Helper to make a GET request and get the response body as JSON.
async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Helper to make a POST request with a JSON body.
async fn post_json(app: &axum::Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn apply_body(domain: &str, name: &str, content: Value) -> Value {
    json!({ "domain": domain, "name": name, "content": content })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["generator"], false);
}

// ============================================================================
// Apply
// ============================================================================

#[tokio::test]
async fn test_apply_then_duplicate_conflict() {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);
    let body = apply_body("nav", "dashboard", content_json("Dashboard"));

    let (status, result) = post_json(&app, "/api/tokens/apply", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["totalTokens"], 78);
    assert_eq!(result["filesModified"].as_array().unwrap().len(), 13);
    let before = snapshot(temp_dir.path());

    let (status, error) = post_json(&app, "/api/tokens/apply", &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "Entry already exists");
    assert!(error["details"].as_str().unwrap().contains("nav.dashboard"));
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[tokio::test]
async fn test_apply_dry_run() {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);
    let before = snapshot(temp_dir.path());

    let mut body = apply_body("nav", "home", content_json("Home"));
    body["dryRun"] = json!(true);

    let (status, result) = post_json(&app, "/api/tokens/apply", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["totalTokens"], 78);
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[tokio::test]
async fn test_apply_invalid_content() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let body = apply_body("nav", "home", content_json_with_gap("Home"));
    let (status, error) = post_json(&app, "/api/tokens/apply", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["details"].as_str().unwrap().contains("witty.caption"));

    let mut missing_tone = content_json("Home");
    missing_tone.as_object_mut().unwrap().remove("quirky");
    let body = apply_body("nav", "home", missing_tone);
    let (status, error) = post_json(&app, "/api/tokens/apply", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Invalid request body");
}

#[tokio::test]
async fn test_apply_without_token_files() {
    let temp_dir = TempDir::new().unwrap();
    let state = AppState::new(&Config::default(), temp_dir.path().to_path_buf());
    let app = create_router(state);

    let body = apply_body("nav", "home", content_json("Home"));
    let (status, error) = post_json(&app, "/api/tokens/apply", &body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["error"], "Token storage error");
}

// ============================================================================
// Preview and list
// ============================================================================

#[tokio::test]
async fn test_preview_touches_no_files() {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);
    let before = snapshot(temp_dir.path());

    let body = apply_body("legal.copyright", "notice", content_json("Notice"));
    let (status, preview) = post_json(&app, "/api/content/preview", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["totalTokens"], 78);
    assert_eq!(preview["files"].as_array().unwrap().len(), 13);
    assert_eq!(preview["files"][1]["file"], "Type.Title.tokens.json");
    assert_eq!(preview["files"][1]["tokenCount"], 6);
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[tokio::test]
async fn test_list_tokens_with_filters() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    post_json(
        &app,
        "/api/tokens/apply",
        &apply_body("nav", "home", content_json("Home")),
    )
    .await;
    post_json(
        &app,
        "/api/tokens/apply",
        &apply_body("footer", "about", content_json("About")),
    )
    .await;

    let (status, all) = get_json(&app, "/api/tokens").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["entries"].as_object().unwrap().len(), 2);

    let (status, filtered) = get_json(&app, "/api/tokens?domain=nav&tone=play&type=emoji").await;
    assert_eq!(status, StatusCode::OK);
    let entries = filtered["entries"].as_object().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries["nav.home"][0]["value"], "Home playful emoji");
    assert_eq!(entries["nav.home"][0]["type"], "emoji");

    let (_, unknown) = get_json(&app, "/api/tokens?domain=settings").await;
    assert!(unknown["entries"].as_object().unwrap().is_empty());
}

// ============================================================================
// Generate
// ============================================================================

#[tokio::test]
async fn test_generate_without_generator() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let body = json!({ "domain": "nav", "name": "home", "neutralTitle": "Home" });
    let (status, error) = post_json(&app, "/api/content/generate", &body).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error["error"], "No content generator configured");
}

#[tokio::test]
async fn test_generate_with_generator() {
    let (state, _temp_dir) = create_test_state();
    let state = state.with_generator(Arc::new(CannedGenerator(
        content_json("Home").to_string(),
    )));
    let app = create_router(state);

    let body = json!({ "domain": "nav", "name": "home", "neutralTitle": "Home" });
    let (status, response) = post_json(&app, "/api/content/generate", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["domain"], "nav");
    assert_eq!(response["content"]["minimal"]["title"], "Home minimal title");
}

#[tokio::test]
async fn test_generate_invalid_payload_is_bad_gateway() {
    let (state, _temp_dir) = create_test_state();
    let state = state.with_generator(Arc::new(CannedGenerator("not json".to_string())));
    let app = create_router(state);

    let body = json!({ "domain": "nav", "name": "home", "neutralTitle": "Home" });
    let (status, error) = post_json(&app, "/api/content/generate", &body).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(error["details"].as_str().unwrap().contains("2 attempt(s)"));
}
