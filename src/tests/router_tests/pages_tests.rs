// src/tests/router_tests/pages_tests.rs

use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{read_body, ready_state};
use astra::{Body, Request};
use http::Method;

fn get(path: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn home_page_renders() {
    let state = ready_state();
    let mut resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = read_body(&mut resp);
    assert!(body.contains("Madrid"));
    assert!(body.contains("/host"));
    assert!(body.contains("/invest"));
}

#[test]
fn host_page_lists_every_district_and_room_type() {
    let state = ready_state();
    let mut resp = handle(get("/host"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = read_body(&mut resp);
    assert!(body.contains("Fuencarral - El Pardo"));
    assert!(body.contains("Villaverde"));
    assert!(body.contains("Shared room"));
    assert!(body.contains("id=\"map\""));
}

#[test]
fn unknown_route_is_not_found() {
    let state = ready_state();
    let err = handle(get("/nope"), &state).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn host_estimate_form_returns_a_price_fragment() {
    let state = ready_state();
    let form = "neighbourhood=Centro&room_type=Entire+home%2Fapt\
                &latitude=40.4168&longitude=-3.7038\
                &accommodates=4&bedrooms=2&beds=2&bathrooms=1.0\
                &number_of_reviews=10&review_scores_rating=4.75\
                &has_elevator=on";
    let req = http::Request::builder()
        .method(Method::POST)
        .uri("/host/estimate")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();

    let mut resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = read_body(&mut resp);
    assert!(body.contains("Suggested Nightly Price"));
    assert!(body.contains("100.00"));
}

#[test]
fn host_estimate_with_a_bad_field_renders_an_inline_error() {
    let state = ready_state();
    let form = "neighbourhood=Centro&room_type=Entire+home%2Fapt\
                &latitude=forty&longitude=-3.7038\
                &accommodates=4&bedrooms=2&beds=2&bathrooms=1.0\
                &number_of_reviews=0&review_scores_rating=4.75";
    let req = http::Request::builder()
        .method(Method::POST)
        .uri("/host/estimate")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();

    let mut resp = handle(req, &state).unwrap();
    // The fragment swaps into the page, so the error is a 200 with an
    // inline error card rather than an error page.
    assert_eq!(resp.status(), 200);
    let body = read_body(&mut resp);
    assert!(body.contains("error-card"));
    assert!(body.contains("latitude"));
}
