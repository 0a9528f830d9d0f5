// src/pipeline/translate.rs

use crate::domain::query::PropertyQuery;
use crate::errors::ServerError;
use crate::model::schema::{ColumnSchema, FeatureVector};
use crate::pipeline::features::{
    accommodates_per_bed, bathrooms_per_person, occupancy_rate_30d,
};
use crate::pipeline::geo::{
    self, AEROPUERTO, ATOCHA, BERNABEU, METROPOLITANO, PUERTA_DEL_SOL,
};
use crate::pipeline::MISSING_SENTINEL;

/// Every non-indicator column the translator writes. Verified against the
/// loaded schema at startup so a renamed or dropped column fails the load
/// instead of silently leaving zeros in the feature row. One-hot indicator
/// columns are exempt: the dropped reference category is expected to be
/// absent.
pub const FIXED_TARGETS: [&str; 43] = [
    "latitude",
    "longitude",
    "accommodates",
    "bedrooms",
    "beds",
    "bathrooms",
    "has_ac",
    "has_pool",
    "has_elevator",
    "has_parking",
    "host_is_superhost",
    "host_has_profile_pic",
    "host_identity_verified",
    "instant_bookable",
    "has_availability",
    "host_response_time",
    "host_response_rate",
    "host_acceptance_rate",
    "availability_30",
    "availability_60",
    "availability_90",
    "availability_365",
    "days_since_host_since",
    "has_reviews",
    "number_of_reviews",
    "reviews_per_month",
    "days_since_first_review",
    "days_since_last_review",
    "review_scores_rating",
    "review_scores_accuracy",
    "review_scores_cleanliness",
    "review_scores_checkin",
    "review_scores_communication",
    "review_scores_location",
    "review_scores_value",
    "distance_to_sol_km",
    "distance_to_bernabeu_km",
    "distance_to_metropolitano_km",
    "distance_to_atocha_km",
    "distance_to_aeropuerto_km",
    "accommodates_per_bed",
    "bathrooms_per_person",
    "occupancy_rate_30d",
];

// The simulated "typical host" a query cannot tell us about: verified,
// instantly bookable, answers within the hour, one year on the platform,
// middling availability windows.
const DEFAULT_RESPONSE_TIME_ORDINAL: f64 = 4.0;
const DEFAULT_RATE: f64 = 100.0;
const DEFAULT_AVAILABILITY_30: f64 = 15.0;
const DEFAULT_AVAILABILITY_60: f64 = 30.0;
const DEFAULT_AVAILABILITY_90: f64 = 45.0;
const DEFAULT_AVAILABILITY_365: f64 = 180.0;
const DEFAULT_HOST_TENURE_DAYS: f64 = 365.0;

// Review history defaults for an active host: the query only collects the
// overall rating and the review count, so the sub-scores and recency get
// fixed plausible values.
const DEFAULT_REVIEWS_PER_MONTH: f64 = 1.5;
const DEFAULT_DAYS_SINCE_FIRST_REVIEW: f64 = 180.0;
const DEFAULT_DAYS_SINCE_LAST_REVIEW: f64 = 15.0;

/// Build the one feature row the model expects from a partial property
/// description, reproducing the training-time schema without any real
/// host or review history. The output is ordered exactly by `schema`.
pub fn transform_user_input(
    query: &PropertyQuery,
    schema: &ColumnSchema,
) -> Result<Vec<f64>, ServerError> {
    let mut row = FeatureVector::zeroed(schema);

    // Direct fields the host actually told us.
    row.set("latitude", query.latitude)?;
    row.set("longitude", query.longitude)?;
    row.set("accommodates", query.accommodates as f64)?;
    row.set("bedrooms", query.bedrooms as f64)?;
    row.set("beds", query.beds as f64)?;
    row.set("bathrooms", query.bathrooms)?;
    row.set("has_ac", query.has_ac as f64)?;
    row.set("has_pool", query.has_pool as f64)?;
    row.set("has_elevator", query.has_elevator as f64)?;
    row.set("has_parking", query.has_parking as f64)?;

    // Idealized host defaults.
    row.set("host_is_superhost", query.host_is_superhost as f64)?;
    row.set("host_has_profile_pic", 1.0)?;
    row.set("host_identity_verified", 1.0)?;
    row.set("instant_bookable", 1.0)?;
    row.set("has_availability", 1.0)?;
    row.set("host_response_time", DEFAULT_RESPONSE_TIME_ORDINAL)?;
    row.set("host_response_rate", DEFAULT_RATE)?;
    row.set("host_acceptance_rate", DEFAULT_RATE)?;
    row.set("availability_30", DEFAULT_AVAILABILITY_30)?;
    row.set("availability_60", DEFAULT_AVAILABILITY_60)?;
    row.set("availability_90", DEFAULT_AVAILABILITY_90)?;
    row.set("availability_365", DEFAULT_AVAILABILITY_365)?;
    row.set("days_since_host_since", DEFAULT_HOST_TENURE_DAYS)?;

    // Review branch. A listing with no reviews must look like the cleaned
    // training rows with no reviews: sentinel -1 everywhere, not an
    // invented high score.
    if query.number_of_reviews == 0 {
        row.set("has_reviews", 0.0)?;
        row.set("number_of_reviews", 0.0)?;
        row.set("reviews_per_month", MISSING_SENTINEL)?;
        row.set("days_since_first_review", MISSING_SENTINEL)?;
        row.set("days_since_last_review", MISSING_SENTINEL)?;
        row.set("review_scores_rating", MISSING_SENTINEL)?;
        row.set("review_scores_accuracy", MISSING_SENTINEL)?;
        row.set("review_scores_cleanliness", MISSING_SENTINEL)?;
        row.set("review_scores_checkin", MISSING_SENTINEL)?;
        row.set("review_scores_communication", MISSING_SENTINEL)?;
        row.set("review_scores_location", MISSING_SENTINEL)?;
        row.set("review_scores_value", MISSING_SENTINEL)?;
    } else {
        row.set("has_reviews", 1.0)?;
        row.set("number_of_reviews", query.number_of_reviews as f64)?;
        row.set("reviews_per_month", DEFAULT_REVIEWS_PER_MONTH)?;
        row.set("days_since_first_review", DEFAULT_DAYS_SINCE_FIRST_REVIEW)?;
        row.set("days_since_last_review", DEFAULT_DAYS_SINCE_LAST_REVIEW)?;
        row.set("review_scores_rating", query.review_scores_rating)?;
        row.set("review_scores_accuracy", 4.8)?;
        row.set("review_scores_cleanliness", 4.8)?;
        row.set("review_scores_checkin", 4.9)?;
        row.set("review_scores_communication", 4.9)?;
        row.set("review_scores_location", 4.8)?;
        row.set("review_scores_value", 4.7)?;
    }

    // Geospatial features from the exact query coordinates.
    let (lat, lon) = (query.latitude, query.longitude);
    row.set("distance_to_sol_km", geo::distance_to(lat, lon, PUERTA_DEL_SOL))?;
    row.set("distance_to_bernabeu_km", geo::distance_to(lat, lon, BERNABEU))?;
    row.set(
        "distance_to_metropolitano_km",
        geo::distance_to(lat, lon, METROPOLITANO),
    )?;
    row.set("distance_to_atocha_km", geo::distance_to(lat, lon, ATOCHA))?;
    row.set("distance_to_aeropuerto_km", geo::distance_to(lat, lon, AEROPUERTO))?;

    // Derived ratios, same formulas as the training prep.
    row.set(
        "accommodates_per_bed",
        accommodates_per_bed(query.accommodates, query.beds as f64),
    )?;
    row.set(
        "bathrooms_per_person",
        bathrooms_per_person(query.bathrooms, query.accommodates),
    )?;
    row.set(
        "occupancy_rate_30d",
        occupancy_rate_30d(DEFAULT_AVAILABILITY_30 as i64),
    )?;

    // One-hot indicators: only set what the schema carries. A category
    // that maps to the dropped reference category sets nothing, which is
    // its correct encoding.
    row.set_if_present(
        &format!("neighbourhood_group_cleansed_{}", query.neighbourhood.name()),
        1.0,
    );
    row.set_if_present(&format!("room_type_{}", query.room_type.name()), 1.0);

    Ok(row.into_values())
}
