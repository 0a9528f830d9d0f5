use crate::domain::bargains;
use crate::domain::query::PropertyQuery;
use crate::errors::{ResultResp, ServerError};
use crate::pipeline::translate::transform_user_input;
use crate::responses::{html_response, json_error_response, json_response};
use crate::state::AppState;
use crate::templates;
use crate::templates::pages::invest::InvestVm;
use astra::{Request, Response};
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(templates::pages::home_page(state.model_loaded())),
        ("GET", "/host") => html_response(templates::pages::host_page(state.boundaries())),
        ("POST", "/host/estimate") => estimate_fragment(req, state),
        ("POST", "/predict") => Ok(predict_endpoint(req, state)),
        ("GET", "/invest") => invest_dashboard(state),
        ("GET", "/api/health") => Ok(json_response(
            200,
            &json!({
                "message": "Madrid pricer API is running 🚀",
                "model_loaded": state.model_loaded(),
            }),
        )),
        _ => Err(ServerError::NotFound),
    }
}

/// The JSON prediction endpoint. Every failure here is converted into a
/// structured JSON error; nothing propagates to the HTML fallback.
fn predict_endpoint(req: Request, state: &AppState) -> Response {
    match run_prediction(req, state) {
        Ok(price) => json_response(
            200,
            &json!({ "predicted_price_euros": price, "currency": "EUR" }),
        ),
        Err(err) => json_error_response(&err),
    }
}

fn run_prediction(mut req: Request, state: &AppState) -> Result<f64, ServerError> {
    let (model, schema) = state.artifacts()?;

    let mut body = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Unreadable request body: {e}")))?;
    let query: PropertyQuery = serde_json::from_str(&body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid property payload: {e}")))?;
    query.validate()?;

    let row = transform_user_input(&query, schema)?;
    Ok(round_to_cents(model.predict(&row)))
}

/// The host form handler: same pipeline as /predict, but the input is a
/// urlencoded form and the output an htmx fragment. Errors render inline
/// where the price card would go.
fn estimate_fragment(mut req: Request, state: &AppState) -> ResultResp {
    let mut body = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Unreadable form body: {e}")))?;
    let fields: HashMap<String, String> = url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect();

    let markup = match estimate_from_form(&fields, state) {
        Ok(price) => templates::price_card(price),
        Err(err) => templates::error_card(&err.to_string()),
    };
    html_response(markup)
}

fn estimate_from_form(
    fields: &HashMap<String, String>,
    state: &AppState,
) -> Result<f64, ServerError> {
    let (model, schema) = state.artifacts()?;
    let query = PropertyQuery::from_form(fields)?;
    let row = transform_user_input(&query, schema)?;
    Ok(round_to_cents(model.predict(&row)))
}

fn invest_dashboard(state: &AppState) -> ResultResp {
    let rows = state.bargains()?;
    let opportunities = bargains::opportunities(rows);
    html_response(templates::pages::invest_page(&InvestVm {
        opportunities: &opportunities,
        boundaries: state.boundaries(),
    }))
}

fn round_to_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
