// src/tests/router_tests/invest_tests.rs

use crate::errors::ServerError;
use crate::router::handle;
use crate::state::AppState;
use crate::tests::utils::{read_body, temp_path};
use astra::{Body, Request};
use http::Method;
use std::fs;

fn get_invest() -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri("/invest")
        .body(Body::empty())
        .unwrap()
}

#[test]
fn invest_page_shows_only_positive_residuals() {
    let csv_path = temp_path("invest_test", "csv");
    fs::write(
        &csv_path,
        "listing_url,price,predicted_price,latitude,longitude\n\
         https://example.com/rooms/bargain,80.0,120.0,40.41,-3.70\n\
         https://example.com/rooms/overpriced,150.0,100.0,40.42,-3.69\n",
    )
    .unwrap();

    let state = AppState::new(None, None, csv_path.to_str().unwrap(), None);
    let mut resp = handle(get_invest(), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    assert!(body.contains("rooms/bargain"));
    assert!(!body.contains("rooms/overpriced"));
    // residual = 120 - 80
    assert!(body.contains("40.00"));
}

#[test]
fn invest_page_without_dataset_is_a_data_error() {
    let state = AppState::new(None, None, "/nonexistent/bargains.csv", None);
    let err = handle(get_invest(), &state).unwrap_err();
    assert!(matches!(err, ServerError::DataError(_)));
}

#[test]
fn bargain_dataset_is_cached_after_the_first_read() {
    let csv_path = temp_path("invest_cache_test", "csv");
    fs::write(
        &csv_path,
        "listing_url,price,predicted_price,latitude,longitude\n\
         https://example.com/rooms/first,80.0,120.0,40.41,-3.70\n",
    )
    .unwrap();

    let state = AppState::new(None, None, csv_path.to_str().unwrap(), None);
    let mut first = handle(get_invest(), &state).unwrap();
    assert!(read_body(&mut first).contains("rooms/first"));

    // The file changes on disk; the process keeps serving the first read.
    fs::write(
        &csv_path,
        "listing_url,price,predicted_price,latitude,longitude\n\
         https://example.com/rooms/second,80.0,120.0,40.41,-3.70\n",
    )
    .unwrap();
    let mut second = handle(get_invest(), &state).unwrap();
    let body = read_body(&mut second);
    assert!(body.contains("rooms/first"));
    assert!(!body.contains("rooms/second"));
}
