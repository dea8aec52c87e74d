/// HTTP tests for the lookup API
/// Drives the router in-process with `tower::ServiceExt::oneshot`
mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{fixed_instant, simulator_with};
use doc_lookup_api::api::app_router;
use doc_lookup_api::handlers::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(delay_sample: f64, failure_sample: f64) -> Router {
    let state = AppState::new(simulator_with(delay_sample, failure_sample));
    app_router(Arc::new(state))
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app(0.0, 0.5)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "doc-lookup-api");
}

#[tokio::test(start_paused = true)]
async fn test_lookup_success() {
    let request = post_json(
        "/api/v1/lookup",
        json!({"documentType": "CC", "documentNumber": "AB123"}).to_string(),
    );

    let response = app(0.0, 0.5).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], json!({"documentType": "CC", "documentNumber": "AB123"}));
    assert_eq!(body["data"]["status"], "FOUND");
    assert!(body.get("error").is_none());
    assert_eq!(
        body["reference"],
        format!("REF-{}-000000000", fixed_instant().timestamp_millis())
    );
}

#[tokio::test(start_paused = true)]
async fn test_simulated_failure_is_still_ok_status() {
    let request = post_json(
        "/api/v1/lookup",
        json!({"documentType": "NIT", "documentNumber": "900123456"}).to_string(),
    );

    let response = app(0.0, 0.01).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "SIMULATION_ERROR");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_lookup_validation_failure() {
    let request = post_json(
        "/api/v1/lookup",
        json!({"documentType": "CC", "documentNumber": "ab"}).to_string(),
    );

    let response = app(0.0, 0.5).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["fields"]["documentNumber"],
        "Document number must be at least 5 characters"
    );
}

#[tokio::test]
async fn test_validate_endpoint() {
    let ok = app(0.0, 0.5)
        .oneshot(post_json(
            "/api/v1/lookup/validate",
            json!({"documentType": "PASSPORT", "documentNumber": "X1234567"}).to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(
        body_json(ok).await,
        json!({"documentType": "PASSPORT", "documentNumber": "X1234567"})
    );

    let missing = app(0.0, 0.5)
        .oneshot(post_json("/api/v1/lookup/validate", "{}".to_string()))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(missing).await;
    assert!(body["fields"]["documentType"].is_string());
    assert!(body["fields"]["documentNumber"].is_string());
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let response = app(0.0, 0.5)
        .oneshot(post_json("/api/v1/lookup", "{not json".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
    assert!(body.get("fields").is_none());
}

#[tokio::test]
async fn test_non_string_field_is_bad_request() {
    let response = app(0.0, 0.5)
        .oneshot(post_json(
            "/api/v1/lookup/validate",
            json!({"documentType": "CC", "documentNumber": 12345}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/lookup")
        .body(Body::from(
            json!({"documentType": "CC", "documentNumber": "AB123"}).to_string(),
        ))
        .unwrap();

    let response = app(0.0, 0.5).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let huge = json!({"documentType": "CC", "documentNumber": "A".repeat(32 * 1024)}).to_string();

    let response = app(0.0, 0.5)
        .oneshot(post_json("/api/v1/lookup", huge))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
