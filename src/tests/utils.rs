// src/tests/utils.rs

use crate::domain::query::{District, RoomType};
use crate::model::{ColumnSchema, PricingModel};
use crate::pipeline::translate::FIXED_TARGETS;
use crate::state::AppState;
use astra::Response;
use std::io::Read;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// A production-shaped column schema: every fixed translator target, the
/// passthrough columns the translator leaves at zero, and the one-hot
/// indicators minus their reference categories (Barajas, Entire home/apt).
pub fn full_schema() -> ColumnSchema {
    let mut columns: Vec<String> = FIXED_TARGETS.iter().map(|s| s.to_string()).collect();
    for col in [
        "minimum_nights",
        "maximum_nights",
        "number_of_reviews_ltm",
        "number_of_reviews_l30d",
    ] {
        columns.push(col.to_string());
    }
    for d in District::ALL.iter().skip(1) {
        columns.push(format!("neighbourhood_group_cleansed_{}", d.name()));
    }
    for r in RoomType::ALL.iter().skip(1) {
        columns.push(format!("room_type_{}", r.name()));
    }
    ColumnSchema::from_columns(columns)
}

/// A deterministic model over `full_schema`: 50 base plus 10 per guest and
/// 5 per bedroom, everything else weighted zero.
pub fn capacity_model(schema: &ColumnSchema) -> PricingModel {
    let mut coefficients = vec![0.0; schema.len()];
    coefficients[schema.position("accommodates").unwrap()] = 10.0;
    coefficients[schema.position("bedrooms").unwrap()] = 5.0;
    PricingModel {
        intercept: 50.0,
        coefficients,
    }
}

/// A state with artifacts ready, no boundary file and no bargain dataset.
pub fn ready_state() -> AppState {
    let schema = full_schema();
    let model = capacity_model(&schema);
    AppState::new(Some(model), Some(schema), "/nonexistent/bargains.csv", None)
}

/// A state whose artifact load failed.
pub fn degraded_state() -> AppState {
    AppState::new(None, None, "/nonexistent/bargains.csv", None)
}

/// Unique temp-file path, so parallel tests never collide.
pub fn temp_path(prefix: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "{prefix}_{}.{ext}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

/// Drain a response body into a string.
pub fn read_body(resp: &mut Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .expect("Failed to read response body");
    String::from_utf8(bytes).expect("Response body was not UTF-8")
}
