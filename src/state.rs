// src/state.rs

use crate::domain::bargains::{self, BargainListing};
use crate::domain::boundaries::NeighbourhoodBoundaries;
use crate::errors::ServerError;
use crate::model::{ColumnSchema, PricingModel};
use crate::pipeline::translate::FIXED_TARGETS;
use std::sync::OnceLock;

/// Everything the request handlers share: the two read-only artifacts, the
/// lazily-cached investor dataset, and the optional boundary file. Loaded
/// once at startup, never mutated, safe for any number of concurrent
/// readers.
pub struct AppState {
    model: Option<PricingModel>,
    schema: Option<ColumnSchema>,
    bargains_path: String,
    bargains: OnceLock<Vec<BargainListing>>,
    boundaries: Option<NeighbourhoodBoundaries>,
}

impl AppState {
    pub fn new(
        model: Option<PricingModel>,
        schema: Option<ColumnSchema>,
        bargains_path: impl Into<String>,
        boundaries: Option<NeighbourhoodBoundaries>,
    ) -> Self {
        Self {
            model,
            schema,
            bargains_path: bargains_path.into(),
            bargains: OnceLock::new(),
            boundaries,
        }
    }

    /// Load the artifacts from disk. A failed load is reported and leaves
    /// the server running in degraded mode: every prediction request then
    /// answers with the model-unavailable error.
    pub fn load(
        model_path: &str,
        columns_path: &str,
        bargains_path: &str,
        boundaries_path: &str,
    ) -> Self {
        let pair = match load_artifacts(model_path, columns_path) {
            Ok((model, schema)) => {
                println!("✅ Model and column schema loaded ({} features)", schema.len());
                Some((model, schema))
            }
            Err(e) => {
                eprintln!("❌ Artifact load failed: {e}");
                None
            }
        };
        let (model, schema) = match pair {
            Some((m, s)) => (Some(m), Some(s)),
            None => (None, None),
        };

        let boundaries = match NeighbourhoodBoundaries::load(boundaries_path) {
            Ok(b) => {
                println!(
                    "✅ Neighbourhood boundaries loaded ({} neighbourhoods)",
                    b.neighbourhood_names().len()
                );
                Some(b)
            }
            Err(e) => {
                // Maps render without the overlay in this case.
                eprintln!("❌ Boundary file not loaded: {e}");
                None
            }
        };

        Self::new(model, schema, bargains_path, boundaries)
    }

    /// Both artifacts, or the error every prediction surfaces while the
    /// server runs degraded.
    pub fn artifacts(&self) -> Result<(&PricingModel, &ColumnSchema), ServerError> {
        match (&self.model, &self.schema) {
            (Some(m), Some(s)) => Ok((m, s)),
            _ => Err(ServerError::ModelUnavailable),
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some() && self.schema.is_some()
    }

    /// The investor dataset, read on first use and cached for the process
    /// lifetime. Staleness is expected; the file is refreshed offline.
    pub fn bargains(&self) -> Result<&[BargainListing], ServerError> {
        if let Some(rows) = self.bargains.get() {
            return Ok(rows);
        }
        let loaded = bargains::read_bargains_csv(&self.bargains_path)?;
        Ok(self.bargains.get_or_init(|| loaded))
    }

    pub fn boundaries(&self) -> Option<&NeighbourhoodBoundaries> {
        self.boundaries.as_ref()
    }
}

/// The artifacts only make sense as a pair: the schema shapes every row
/// the model sees. Consistency failures (missing translator targets, a
/// coefficient count that does not match the schema) are load failures.
fn load_artifacts(
    model_path: &str,
    columns_path: &str,
) -> Result<(PricingModel, ColumnSchema), ServerError> {
    let model = PricingModel::load(model_path)?;
    let schema = ColumnSchema::load(columns_path)?;
    schema.ensure_columns(&FIXED_TARGETS)?;
    if model.n_features() != schema.len() {
        return Err(ServerError::DataError(format!(
            "Model expects {} features but the column schema lists {}",
            model.n_features(),
            schema.len()
        )));
    }
    Ok((model, schema))
}
