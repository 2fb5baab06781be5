//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use data_proxy::{api::create_router, AppState, DataServiceProxy, SimulatedDataService};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_state() -> (Arc<SimulatedDataService>, AppState) {
    let backend = Arc::new(SimulatedDataService::instant());
    let state = AppState::new(DataServiceProxy::new(backend.clone()));
    (backend, state)
}

fn create_test_app() -> Router {
    create_router(create_test_state().1)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn put_data(id: &str, data: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(format!("/data/{}", id))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "data": data }).to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == Read Endpoint Tests ==

#[tokio::test]
async fn test_get_data_endpoint_success() {
    let app = create_test_app();

    let response = app.oneshot(get("/data/user-7")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "user-7");
    assert_eq!(json["value"], "data for user-7");
}

#[tokio::test]
async fn test_get_data_backend_down() {
    let (backend, state) = create_test_state();
    backend.set_offline(true);
    let app = create_router(state);

    let response = app.oneshot(get("/data/user-7")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("unavailable"));
}

// == Write Endpoint Tests ==

#[tokio::test]
async fn test_save_then_get_reflects_write() {
    let app = create_test_app();

    let response = app.clone().oneshot(get("/data/doc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(put_data("doc", "edited")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("doc"));

    let response = app.oneshot(get("/data/doc")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], "edited");
}

#[tokio::test]
async fn test_save_oversized_payload_forbidden() {
    let (backend, state) = create_test_state();
    let app = create_router(state);

    let response = app
        .oneshot(put_data("doc", &"z".repeat(101)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("maximum size"));
    assert_eq!(backend.store_calls(), 0);
}

#[tokio::test]
async fn test_save_missing_body_rejected() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/data/doc")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Instrumentation Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_tracks_hits() {
    let app = create_test_app();

    for _ in 0..3 {
        app.clone().oneshot(get("/data/a")).await.unwrap();
    }
    app.clone().oneshot(get("/data/b")).await.unwrap();

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["request_count"], 4);
    assert_eq!(json["cache_hits"], 2);
    assert_eq!(json["hit_rate"], 50);
    assert_eq!(json["cache_size"], 2);
}

#[tokio::test]
async fn test_log_endpoint_lists_events() {
    let app = create_test_app();
    app.clone().oneshot(get("/data/a")).await.unwrap();

    let response = app.oneshot(get("/log")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    let entries = json["entries"].as_array().unwrap();

    let kinds: Vec<&str> = entries
        .iter()
        .map(|e| e["event"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["request", "miss", "store"]);
    assert_eq!(entries[1]["message"], "cache miss: a");
}

#[tokio::test]
async fn test_clear_endpoints() {
    let app = create_test_app();
    app.clone().oneshot(get("/data/a")).await.unwrap();

    let response = app.clone().oneshot(delete("/cache")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/log")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    let last = json["entries"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["event"], "cache_clear");

    let response = app.clone().oneshot(delete("/log")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/log")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert!(json["entries"].as_array().unwrap().is_empty());

    let response = app.oneshot(get("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["request_count"], 1);
    assert_eq!(json["cache_size"], 0);
}

#[tokio::test]
async fn test_shutdown_returns_service_unavailable() {
    let (_backend, state) = create_test_state();
    state.shutdown.cancel();
    let app = create_router(state);

    let response = app.oneshot(get("/data/a")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_test_app();

    let response = app.oneshot(get("/nonexistent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
