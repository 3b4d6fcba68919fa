//! Integration tests for probes and cross-cutting middleware.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};

use common::{body_json, get_request, send, test_app};

#[tokio::test]
async fn liveness_probe_answers_without_a_database() {
    let response = send(test_app(), get_request("/health/live")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn readiness_probe_fails_without_a_database() {
    let response = send(test_app(), get_request("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn security_headers_are_present() {
    let response = send(test_app(), get_request("/health/live")).await;
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-xss-protection").unwrap(), "1; mode=block");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let request = Request::builder()
        .method("GET")
        .uri("/health/live")
        .header("X-Request-ID", "probe-42")
        .body(Body::empty())
        .unwrap();
    let response = send(test_app(), request).await;
    assert_eq!(response.headers().get("x-request-id").unwrap(), "probe-42");
}

#[tokio::test]
async fn request_id_is_generated_when_absent() {
    let response = send(test_app(), get_request("/health/live")).await;
    let header = response.headers().get("x-request-id").unwrap();
    assert!(!header.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = send(test_app(), get_request("/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
