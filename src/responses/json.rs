// responses/json.rs
use crate::errors::ServerError;
use crate::responses::status_of;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Serialize a JSON body with the given status. Falls back to a bare 500
/// if the response itself cannot be built.
pub fn json_response(status: u16, value: &serde_json::Value) -> Response {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(value.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

/// Convert a ServerError into the structured error shape API clients see.
pub fn json_error_response(err: &ServerError) -> Response {
    json_response(status_of(err), &json!({ "detail": err.to_string() }))
}
