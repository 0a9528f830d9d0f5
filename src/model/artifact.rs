// src/model/artifact.rs

use crate::errors::ServerError;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;

/// The serialized regression artifact: an intercept plus one coefficient
/// per schema column, fitted offline. Loaded once at startup and read-only
/// for the life of the process; prediction is a pure function of the row.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl PricingModel {
    pub fn load(path: &str) -> Result<Self, ServerError> {
        let file = File::open(path)
            .map_err(|e| ServerError::DataError(format!("Failed to open {path}: {e}")))?;
        let model: PricingModel = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ServerError::DataError(format!("Bad model artifact in {path}: {e}")))?;
        if model.coefficients.is_empty() {
            return Err(ServerError::DataError(format!(
                "Model artifact in {path} has no coefficients"
            )));
        }
        Ok(model)
    }

    /// Number of features the model was fitted on. Checked against the
    /// column schema at startup so a stale artifact pair fails loudly.
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Predicted nightly price in EUR for one schema-ordered feature row.
    pub fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}
