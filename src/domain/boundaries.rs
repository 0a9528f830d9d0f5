// src/domain/boundaries.rs

use crate::errors::ServerError;
use serde::Deserialize;
use std::fs;

// The boundary file is only consumed for map rendering: the server
// validates it, keeps the raw text verbatim for the page scripts, and
// extracts the feature names it was able to match.

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<FeatureProperties>,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(default)]
    neighbourhood: Option<String>,
}

/// The Madrid neighbourhood GeoJSON, validated once at startup.
#[derive(Debug, Clone)]
pub struct NeighbourhoodBoundaries {
    raw: String,
    neighbourhoods: Vec<String>,
}

impl NeighbourhoodBoundaries {
    pub fn load(path: &str) -> Result<Self, ServerError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ServerError::DataError(format!("Failed to read {path}: {e}")))?;
        let parsed: FeatureCollection = serde_json::from_str(&raw)
            .map_err(|e| ServerError::DataError(format!("Bad GeoJSON in {path}: {e}")))?;

        let mut neighbourhoods = Vec::new();
        for feature in parsed.features {
            let Some(name) = feature.properties.and_then(|p| p.neighbourhood) else {
                continue;
            };
            if !neighbourhoods.contains(&name) {
                neighbourhoods.push(name);
            }
        }

        Ok(Self { raw, neighbourhoods })
    }

    /// The file contents, embedded verbatim into the map script.
    pub fn raw_json(&self) -> &str {
        &self.raw
    }

    pub fn neighbourhood_names(&self) -> &[String] {
        &self.neighbourhoods
    }
}
