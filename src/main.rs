use crate::errors::ServerError;
use crate::router::handle;
use crate::state::AppState;
use astra::Server;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;

mod domain;
mod errors;
mod geos;
mod model;
mod pipeline;
mod responses;
mod router;
mod state;
mod templates;

#[cfg(test)]
mod tests;

const MODEL_PATH: &str = "models/pricing_model.json";
const COLUMNS_PATH: &str = "models/model_columns.json";
const BARGAINS_PATH: &str = "data/bargain_listings.csv";
const BOUNDARIES_PATH: &str = "data/neighbourhoods.geojson";

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Offline mode: run the training-time feature pipeline over a raw
    // listings export and write the model-ready table.
    if args.get(1).map(String::as_str) == Some("prepare") {
        if args.len() != 4 {
            eprintln!("Usage: madrid_pricer prepare <listings.csv> <features.csv>");
            std::process::exit(2);
        }
        if let Err(e) = run_prepare(&args[2], &args[3]) {
            eprintln!("❌ Feature preparation failed: {e}");
            std::process::exit(1);
        }
        return;
    }

    // 1️⃣ Load the artifacts. A failed load keeps the server up in
    // degraded mode; predictions answer 503 until the files are fixed.
    let state = Arc::new(AppState::load(
        MODEL_PATH,
        COLUMNS_PATH,
        BARGAINS_PATH,
        BOUNDARIES_PATH,
    ));

    // 2️⃣ Start the server
    let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    // 3️⃣ Serve requests, passing the shared state into the closure
    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => responses::error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}

fn run_prepare(input: &str, output: &str) -> Result<(), ServerError> {
    let raw = pipeline::raw::read_listings_csv(input)?;
    println!("Loaded {} raw listings from {input}", raw.len());

    let cleaned = pipeline::clean::clean_listings(&raw);
    println!("{} listings survived cleaning", cleaned.len());

    let frame = pipeline::features::prepare_for_modeling(&cleaned, Utc::now().date_naive());
    frame.write_csv(output)?;
    println!(
        "✅ Wrote {} rows × {} columns to {output}",
        frame.rows.len(),
        frame.columns.len()
    );
    Ok(())
}
