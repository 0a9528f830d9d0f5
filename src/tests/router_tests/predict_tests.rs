// src/tests/router_tests/predict_tests.rs

use crate::router::handle;
use crate::tests::utils::{degraded_state, read_body, ready_state};
use astra::{Body, Request};
use http::Method;

fn post_json(path: &str, payload: &str) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

const CENTRO_QUERY: &str = r#"{
    "neighbourhood": "Centro",
    "room_type": "Entire home/apt",
    "latitude": 40.4168,
    "longitude": -3.7038,
    "accommodates": 4,
    "bedrooms": 2,
    "beds": 2,
    "bathrooms": 1.0,
    "number_of_reviews": 0
}"#;

#[test]
fn predict_returns_a_rounded_euro_price() {
    let state = ready_state();

    let mut resp = handle(post_json("/predict", CENTRO_QUERY), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = serde_json::from_str(&read_body(&mut resp)).unwrap();
    let price = body["predicted_price_euros"].as_f64().unwrap();
    // 50 base + 4 guests * 10 + 2 bedrooms * 5 under the test model.
    assert_eq!(price, 100.0);
    assert!(price >= 0.0);
    assert_eq!(body["currency"], "EUR");
}

#[test]
fn predict_without_artifacts_is_service_unavailable() {
    let state = degraded_state();

    let mut resp = handle(post_json("/predict", CENTRO_QUERY), &state).unwrap();
    assert_eq!(resp.status(), 503);

    let body: serde_json::Value = serde_json::from_str(&read_body(&mut resp)).unwrap();
    assert!(body["detail"].as_str().unwrap().contains("not loaded"));
}

#[test]
fn malformed_payload_is_a_bad_request() {
    let state = ready_state();

    let mut resp = handle(post_json("/predict", "{ not json"), &state).unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = serde_json::from_str(&read_body(&mut resp)).unwrap();
    assert!(body["detail"].as_str().unwrap().contains("Invalid property payload"));
}

#[test]
fn out_of_range_fields_are_a_bad_request() {
    let state = ready_state();
    let payload = CENTRO_QUERY.replace("\"bedrooms\": 2", "\"bedrooms\": -3");

    let resp = handle(post_json("/predict", &payload), &state).unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn unknown_district_is_a_bad_request() {
    let state = ready_state();
    let payload = CENTRO_QUERY.replace("Centro", "Gotham");

    let resp = handle(post_json("/predict", &payload), &state).unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn health_endpoint_reports_model_state() {
    let ready = ready_state();
    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let mut resp = handle(req, &ready).unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = serde_json::from_str(&read_body(&mut resp)).unwrap();
    assert_eq!(body["model_loaded"], true);

    let degraded = degraded_state();
    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let mut resp = handle(req, &degraded).unwrap();
    let body: serde_json::Value = serde_json::from_str(&read_body(&mut resp)).unwrap();
    assert_eq!(body["model_loaded"], false);
}
