// src/pipeline/features.rs

use crate::errors::ServerError;
use crate::pipeline::clean::CleanedListing;
use crate::pipeline::geo::{self, AEROPUERTO, ATOCHA, BERNABEU, METROPOLITANO};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;

/// Training-time feature table: ordered column names, one id per listing,
/// plain numeric rows. The `price` target rides along as the first column
/// so the offline trainer can split it off; it is never part of the model
/// column schema.
#[derive(Debug, Clone)]
pub struct FeatureFrame {
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureFrame {
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, for inspection and tests.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let pos = self.column_position(name)?;
        Some(self.rows.iter().map(|r| r[pos]).collect())
    }

    pub fn write_csv(&self, path: &str) -> Result<(), ServerError> {
        let file = File::create(path)
            .map_err(|e| ServerError::DataError(format!("Failed to create {path}: {e}")))?;
        let mut wtr = csv::Writer::from_writer(BufWriter::new(file));

        let mut header = vec!["id".to_string()];
        header.extend(self.columns.iter().cloned());
        wtr.write_record(&header)
            .map_err(|e| ServerError::DataError(format!("CSV write failed: {e}")))?;

        for (id, row) in self.index.iter().zip(&self.rows) {
            let mut record = vec![id.clone()];
            record.extend(row.iter().map(|v| v.to_string()));
            wtr.write_record(&record)
                .map_err(|e| ServerError::DataError(format!("CSV write failed: {e}")))?;
        }
        wtr.flush()
            .map_err(|e| ServerError::DataError(format!("CSV write failed: {e}")))?;
        Ok(())
    }
}

/// Fixed ordinal encoding for `host_response_time`. Unmapped or missing
/// categories encode as 0, same as "Unknown".
pub fn response_time_ordinal(category: &str) -> f64 {
    match category {
        "a few days or more" => 1.0,
        "within a day" => 2.0,
        "within a few hours" => 3.0,
        "within an hour" => 4.0,
        _ => 0.0,
    }
}

/// Whole days between the reference date and a "%Y-%m-%d" date string;
/// missing or unparseable dates encode as the -1 sentinel.
fn days_since(date: Option<&str>, reference: NaiveDate) -> f64 {
    date.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .map(|d| (reference - d).num_days() as f64)
        .unwrap_or(-1.0)
}

/// `bathrooms / accommodates` with a zero-capacity guard.
pub fn bathrooms_per_person(bathrooms: f64, accommodates: i64) -> f64 {
    bathrooms / accommodates.max(1) as f64
}

/// `accommodates / beds` with a zero-bed guard.
pub fn accommodates_per_bed(accommodates: i64, beds: f64) -> f64 {
    accommodates as f64 / if beds > 0.0 { beds } else { 1.0 }
}

/// Share of the next 30 days already booked.
pub fn occupancy_rate_30d(availability_30: i64) -> f64 {
    (30.0 - availability_30 as f64) / 30.0
}

/// Sorted observed categories minus the first (the reference category,
/// implied by all-zero indicators), mirroring dummy encoding with a
/// dropped first level.
fn dummy_categories<'a>(
    rows: &'a [CleanedListing],
    select: impl Fn(&'a CleanedListing) -> &'a str,
) -> Vec<&'a str> {
    let observed: BTreeSet<&str> = rows.iter().map(select).collect();
    observed.into_iter().skip(1).collect()
}

/// Turn cleaned listings into the model-ready table: date columns become
/// day counts relative to `reference`, `host_response_time` is
/// ordinal-encoded, district and room type are one-hot encoded with the
/// first category dropped, the four remaining POI distances and the derived
/// ratios are attached. High-cardinality leftovers (`property_type`,
/// `neighbourhood_cleansed`) do not enter the frame.
///
/// `reference` is explicit so historical tables can be reproduced; the
/// `prepare` subcommand passes today.
pub fn prepare_for_modeling(rows: &[CleanedListing], reference: NaiveDate) -> FeatureFrame {
    let district_cats = dummy_categories(rows, |r| r.neighbourhood_group_cleansed.as_str());
    let room_cats = dummy_categories(rows, |r| r.room_type.as_str());

    let mut columns: Vec<String> = [
        "price",
        "host_response_time",
        "host_response_rate",
        "host_acceptance_rate",
        "host_is_superhost",
        "host_has_profile_pic",
        "host_identity_verified",
        "latitude",
        "longitude",
        "accommodates",
        "bathrooms",
        "bedrooms",
        "beds",
        "minimum_nights",
        "maximum_nights",
        "has_availability",
        "instant_bookable",
        "availability_30",
        "availability_60",
        "availability_90",
        "availability_365",
        "number_of_reviews",
        "number_of_reviews_ltm",
        "number_of_reviews_l30d",
        "review_scores_rating",
        "review_scores_accuracy",
        "review_scores_cleanliness",
        "review_scores_checkin",
        "review_scores_communication",
        "review_scores_location",
        "review_scores_value",
        "reviews_per_month",
        "has_reviews",
        "has_ac",
        "has_pool",
        "has_elevator",
        "has_parking",
        "distance_to_sol_km",
        "days_since_host_since",
        "days_since_first_review",
        "days_since_last_review",
        "distance_to_bernabeu_km",
        "distance_to_metropolitano_km",
        "distance_to_atocha_km",
        "distance_to_aeropuerto_km",
        "bathrooms_per_person",
        "accommodates_per_bed",
        "occupancy_rate_30d",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for cat in &district_cats {
        columns.push(format!("neighbourhood_group_cleansed_{cat}"));
    }
    for cat in &room_cats {
        columns.push(format!("room_type_{cat}"));
    }

    let mut index = Vec::with_capacity(rows.len());
    let mut out_rows = Vec::with_capacity(rows.len());

    for (i, r) in rows.iter().enumerate() {
        index.push(
            r.listing_url
                .clone()
                .unwrap_or_else(|| i.to_string()),
        );

        let mut row = vec![
            r.price,
            response_time_ordinal(&r.host_response_time),
            r.host_response_rate,
            r.host_acceptance_rate,
            r.host_is_superhost as f64,
            r.host_has_profile_pic as f64,
            r.host_identity_verified as f64,
            r.latitude,
            r.longitude,
            r.accommodates as f64,
            r.bathrooms,
            r.bedrooms,
            r.beds,
            r.minimum_nights as f64,
            r.maximum_nights as f64,
            r.has_availability as f64,
            r.instant_bookable as f64,
            r.availability_30 as f64,
            r.availability_60 as f64,
            r.availability_90 as f64,
            r.availability_365 as f64,
            r.number_of_reviews as f64,
            r.number_of_reviews_ltm as f64,
            r.number_of_reviews_l30d as f64,
            r.review_scores_rating,
            r.review_scores_accuracy,
            r.review_scores_cleanliness,
            r.review_scores_checkin,
            r.review_scores_communication,
            r.review_scores_location,
            r.review_scores_value,
            r.reviews_per_month,
            r.has_reviews as f64,
            r.has_ac as f64,
            r.has_pool as f64,
            r.has_elevator as f64,
            r.has_parking as f64,
            r.distance_to_sol_km,
            days_since(Some(r.host_since.as_str()), reference),
            days_since(r.first_review.as_deref(), reference),
            days_since(r.last_review.as_deref(), reference),
            geo::distance_to(r.latitude, r.longitude, BERNABEU),
            geo::distance_to(r.latitude, r.longitude, METROPOLITANO),
            geo::distance_to(r.latitude, r.longitude, ATOCHA),
            geo::distance_to(r.latitude, r.longitude, AEROPUERTO),
            bathrooms_per_person(r.bathrooms, r.accommodates),
            accommodates_per_bed(r.accommodates, r.beds),
            occupancy_rate_30d(r.availability_30),
        ];

        for cat in &district_cats {
            row.push((r.neighbourhood_group_cleansed == *cat) as i64 as f64);
        }
        for cat in &room_cats {
            row.push((r.room_type == *cat) as i64 as f64);
        }

        out_rows.push(row);
    }

    FeatureFrame {
        index,
        columns,
        rows: out_rows,
    }
}
