//! Integration tests for submission validation.
//!
//! Validation resolves before any store access, so these run without a
//! database.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, json_request, send, test_app};

fn valid_body() -> serde_json::Value {
    json!({
        "fullName": "Maria Santos",
        "contactNumber": "09171234567",
        "email": "maria@example.com",
        "church": "Grace Fellowship",
        "role": "Usher",
        "hasVehicle": false
    })
}

#[tokio::test]
async fn short_full_name_is_rejected_with_field_detail() {
    let mut body = valid_body();
    body["fullName"] = json!("Jo");

    let response = send(test_app(), json_request("POST", "/register", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(
        body["message"],
        "Full name must be at least 3 characters."
    );
    assert!(!body["details"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_contact_number_is_rejected() {
    let mut body = valid_body();
    body["contactNumber"] = json!("0917123456"); // one digit short

    let response = send(test_app(), json_request("POST", "/register", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_email_is_rejected_but_empty_is_not_a_field_error() {
    let mut body = valid_body();
    body["email"] = json!("not-an-email");

    let response = send(test_app(), json_request("POST", "/register", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // An empty email is fine; the request then proceeds to the store and
    // fails there instead of failing validation
    let mut body = valid_body();
    body["email"] = json!("");
    let response = send(test_app(), json_request("POST", "/register", body)).await;
    assert_ne!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vehicle_without_plate_is_rejected() {
    let mut body = valid_body();
    body["hasVehicle"] = json!(true);

    let response = send(test_app(), json_request("POST", "/register", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"plate_number"));
}

#[tokio::test]
async fn others_role_without_free_text_is_rejected() {
    let mut body = valid_body();
    body["role"] = json!("Others");

    let response = send(test_app(), json_request("POST", "/register", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_required_fields_are_a_client_error() {
    let body = json!({ "fullName": "Maria Santos" });
    let response = send(test_app(), json_request("POST", "/register", body)).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn multiple_violations_are_all_reported() {
    let body = json!({
        "fullName": "X",
        "contactNumber": "123",
        "email": "bad",
        "church": "G",
        "hasVehicle": true
    });
    let response = send(test_app(), json_request("POST", "/register", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["details"].as_array().unwrap().len() >= 4);
}
