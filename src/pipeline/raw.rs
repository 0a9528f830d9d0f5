// src/pipeline/raw.rs

use crate::errors::ServerError;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;

/// One row of the scraped listings CSV, as messy as the source ships it:
/// currency strings, percent strings, "t"/"f" booleans, free-text amenity
/// lists and bathroom descriptions, possibly-absent columns.
///
/// Every field is optional with a serde default so the same type reads
/// partial exports too. Source columns this struct does not name (ids,
/// scrape metadata, free-text descriptions, the min/max-nights variants,
/// the empty legacy `bathrooms` column, ...) are ignored by the reader,
/// which is how the noise-column drop is expressed here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub listing_url: Option<String>,

    #[serde(default)]
    pub neighbourhood_group_cleansed: Option<String>,
    #[serde(default)]
    pub neighbourhood_cleansed: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub accommodates: Option<i64>,
    #[serde(default)]
    pub bedrooms: Option<f64>,
    #[serde(default)]
    pub beds: Option<f64>,
    /// Free text like "1.5 baths" or "Half-bath"; the numeric `bathrooms`
    /// column in the source is empty and never read.
    #[serde(default)]
    pub bathrooms_text: Option<String>,

    #[serde(default)]
    pub amenities: Option<String>,

    /// Currency-formatted, e.g. "$1,234.50".
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub minimum_nights: Option<i64>,
    #[serde(default)]
    pub maximum_nights: Option<i64>,

    #[serde(default)]
    pub host_since: Option<String>,
    #[serde(default)]
    pub host_response_time: Option<String>,
    /// Percent-formatted, e.g. "95%".
    #[serde(default)]
    pub host_response_rate: Option<String>,
    #[serde(default)]
    pub host_acceptance_rate: Option<String>,
    #[serde(default)]
    pub host_is_superhost: Option<String>,
    #[serde(default)]
    pub host_has_profile_pic: Option<String>,
    #[serde(default)]
    pub host_identity_verified: Option<String>,

    #[serde(default)]
    pub has_availability: Option<String>,
    #[serde(default)]
    pub instant_bookable: Option<String>,
    #[serde(default)]
    pub availability_30: Option<i64>,
    #[serde(default)]
    pub availability_60: Option<i64>,
    #[serde(default)]
    pub availability_90: Option<i64>,
    #[serde(default)]
    pub availability_365: Option<i64>,

    #[serde(default)]
    pub number_of_reviews: Option<i64>,
    #[serde(default)]
    pub number_of_reviews_ltm: Option<i64>,
    #[serde(default)]
    pub number_of_reviews_l30d: Option<i64>,
    #[serde(default)]
    pub first_review: Option<String>,
    #[serde(default)]
    pub last_review: Option<String>,
    #[serde(default)]
    pub review_scores_rating: Option<f64>,
    #[serde(default)]
    pub review_scores_accuracy: Option<f64>,
    #[serde(default)]
    pub review_scores_cleanliness: Option<f64>,
    #[serde(default)]
    pub review_scores_checkin: Option<f64>,
    #[serde(default)]
    pub review_scores_communication: Option<f64>,
    #[serde(default)]
    pub review_scores_location: Option<f64>,
    #[serde(default)]
    pub review_scores_value: Option<f64>,
    #[serde(default)]
    pub reviews_per_month: Option<f64>,
}

/// Load the scraped listings export.
pub fn read_listings_csv(path: &str) -> Result<Vec<RawListing>, ServerError> {
    let file = File::open(path)
        .map_err(|e| ServerError::DataError(format!("Failed to open {path}: {e}")))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: RawListing =
            result.map_err(|e| ServerError::DataError(format!("Bad listing row: {e}")))?;
        rows.push(row);
    }
    Ok(rows)
}
