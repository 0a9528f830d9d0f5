// src/domain/bargains.rs

use crate::errors::ServerError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

/// One row of the offline-scored bargain dataset: a live listing, its
/// asking price, and what the model thinks it is worth.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BargainListing {
    pub listing_url: String,
    pub price: f64,
    pub predicted_price: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl BargainListing {
    /// How far under the model's valuation the listing is priced. Positive
    /// means the asking price sits below the prediction.
    pub fn residual(&self) -> f64 {
        self.predicted_price - self.price
    }
}

/// Load the batch-scored dataset. Refreshed offline; staleness within one
/// process lifetime is expected.
pub fn read_bargains_csv(path: &str) -> Result<Vec<BargainListing>, ServerError> {
    let file = File::open(path)
        .map_err(|e| ServerError::DataError(format!("Failed to open {path}: {e}")))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: BargainListing =
            result.map_err(|e| ServerError::DataError(format!("Bad bargain row: {e}")))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Investment opportunities: only listings priced under the model's
/// valuation, best residual first.
pub fn opportunities(rows: &[BargainListing]) -> Vec<BargainListing> {
    let mut out: Vec<BargainListing> = rows
        .iter()
        .filter(|r| r.residual() > 0.0)
        .cloned()
        .collect();
    out.sort_by(|a, b| b.residual().partial_cmp(&a.residual()).unwrap());
    out
}
