// src/pipeline/clean.rs

use crate::pipeline::geo::{self, PUERTA_DEL_SOL};
use crate::pipeline::raw::RawListing;
use crate::pipeline::MISSING_SENTINEL;
use std::collections::HashMap;

/// A listing after cleaning and imputation: no nulls remain in the columns
/// the modeling stage depends on. This is the anti-corruption layer between
/// the scraped export and everything downstream.
///
/// Missing-data policy, in one place:
/// - review scores, reviews_per_month and host rates carry the `-1`
///   sentinel, never 0 and never NaN;
/// - review dates keep `None` as their missing marker (the modeling stage
///   turns that into the `-1` days sentinel);
/// - `host_response_time` carries the literal category "Unknown";
/// - coordinates missing from the export are carried as NaN and propagate
///   through the distance features.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedListing {
    pub listing_url: Option<String>,

    pub neighbourhood_group_cleansed: String,
    pub neighbourhood_cleansed: String,
    pub property_type: String,
    pub room_type: String,

    pub latitude: f64,
    pub longitude: f64,

    pub accommodates: i64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub beds: f64,

    /// Supervised target; rows without a parseable price never get here.
    pub price: f64,

    pub minimum_nights: i64,
    pub maximum_nights: i64,

    pub host_since: String,
    pub host_response_time: String,
    pub host_response_rate: f64,
    pub host_acceptance_rate: f64,
    pub host_is_superhost: i64,
    pub host_has_profile_pic: i64,
    pub host_identity_verified: i64,

    pub has_availability: i64,
    pub instant_bookable: i64,
    pub availability_30: i64,
    pub availability_60: i64,
    pub availability_90: i64,
    pub availability_365: i64,

    pub number_of_reviews: i64,
    pub number_of_reviews_ltm: i64,
    pub number_of_reviews_l30d: i64,
    pub first_review: Option<String>,
    pub last_review: Option<String>,
    pub review_scores_rating: f64,
    pub review_scores_accuracy: f64,
    pub review_scores_cleanliness: f64,
    pub review_scores_checkin: f64,
    pub review_scores_communication: f64,
    pub review_scores_location: f64,
    pub review_scores_value: f64,
    pub reviews_per_month: f64,
    pub has_reviews: i64,

    pub has_ac: i64,
    pub has_pool: i64,
    pub has_elevator: i64,
    pub has_parking: i64,

    pub distance_to_sol_km: f64,
}

/// Strip `$` and `,` from a currency-formatted price and parse it.
pub fn parse_price(raw: Option<&str>) -> Option<f64> {
    let s: String = raw?
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    s.parse::<f64>().ok()
}

/// Strip `%` from a host rate and parse it; missing or unparseable → -1.
pub fn parse_rate(raw: Option<&str>) -> f64 {
    match raw {
        Some(s) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .unwrap_or(MISSING_SENTINEL),
        None => MISSING_SENTINEL,
    }
}

/// Map the source's "t"/"f" (and "True"/"False") flags to 1/0.
fn parse_flag(raw: Option<&str>) -> i64 {
    matches!(raw.map(str::trim), Some("t") | Some("True")) as i64
}

/// First decimal number inside a free-text field like "1.5 shared baths".
pub fn extract_first_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    let mut end = start;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    text[start..end].trim_end_matches('.').parse::<f64>().ok()
}

/// Median with the even-count average, matching the imputation the model
/// was trained against.
fn median(values: &mut Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Group-then-global median imputation for one capacity column. The group
/// pass (rows sharing the same `accommodates`) runs first; the global
/// median only fills groups that were entirely empty.
struct CapacityImputer {
    by_group: HashMap<i64, f64>,
    global: Option<f64>,
}

impl CapacityImputer {
    fn fit(observations: &[(i64, Option<f64>)]) -> Self {
        let mut groups: HashMap<i64, Vec<f64>> = HashMap::new();
        let mut all = Vec::new();
        for (accommodates, value) in observations {
            if let Some(v) = value {
                groups.entry(*accommodates).or_default().push(*v);
                all.push(*v);
            }
        }
        let by_group = groups
            .into_iter()
            .filter_map(|(k, mut vs)| median(&mut vs).map(|m| (k, m)))
            .collect();
        Self {
            by_group,
            global: median(&mut all),
        }
    }

    fn fill(&self, accommodates: i64, value: Option<f64>) -> f64 {
        value
            .or_else(|| self.by_group.get(&accommodates).copied())
            .or(self.global)
            .unwrap_or(f64::NAN)
    }
}

/// Rows that survive the target and ghost-host drops, with the bathroom
/// text already parsed so the imputers can be fitted in one pass.
struct Survivor<'a> {
    raw: &'a RawListing,
    price: f64,
    bathrooms: Option<f64>,
}

/// Execute the cleaning business rules over a raw export: drop rows that
/// cannot be used (no price, ghost host), normalize currency/percent/flag
/// columns, derive amenity flags and `has_reviews`, impute capacity
/// columns, and attach the Sol distance.
pub fn clean_listings(raw_rows: &[RawListing]) -> Vec<CleanedListing> {
    // Pass 1: row drops. Price is the supervised target and cannot be
    // imputed; listings missing core host identity fields are unusable.
    let survivors: Vec<Survivor> = raw_rows
        .iter()
        .filter_map(|raw| {
            let price = parse_price(raw.price.as_deref())?;
            if raw.host_since.is_none()
                || raw.host_has_profile_pic.is_none()
                || raw.host_identity_verified.is_none()
            {
                return None;
            }
            let bathrooms = raw
                .bathrooms_text
                .as_deref()
                .and_then(extract_first_number);
            Some(Survivor { raw, price, bathrooms })
        })
        .collect();

    // Pass 2: fit the capacity imputers on what survived.
    let accommodates_of = |s: &Survivor| s.raw.accommodates.unwrap_or(0);
    let bedrooms_imp = CapacityImputer::fit(
        &survivors
            .iter()
            .map(|s| (accommodates_of(s), s.raw.bedrooms))
            .collect::<Vec<_>>(),
    );
    let bathrooms_imp = CapacityImputer::fit(
        &survivors
            .iter()
            .map(|s| (accommodates_of(s), s.bathrooms))
            .collect::<Vec<_>>(),
    );
    let beds_imp = CapacityImputer::fit(
        &survivors
            .iter()
            .map(|s| (accommodates_of(s), s.raw.beds))
            .collect::<Vec<_>>(),
    );

    // Pass 3: build the cleaned records.
    survivors
        .into_iter()
        .map(|s| {
            let raw = s.raw;
            let accommodates = raw.accommodates.unwrap_or(0);

            let amenities = raw
                .amenities
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_default();

            let latitude = raw.latitude.unwrap_or(f64::NAN);
            let longitude = raw.longitude.unwrap_or(f64::NAN);

            // host_is_superhost and has_availability default to 'f' when
            // missing; the identity flags are guaranteed present by the
            // ghost-host drop.
            CleanedListing {
                listing_url: raw.listing_url.clone(),

                neighbourhood_group_cleansed: raw
                    .neighbourhood_group_cleansed
                    .clone()
                    .unwrap_or_default(),
                neighbourhood_cleansed: raw.neighbourhood_cleansed.clone().unwrap_or_default(),
                property_type: raw.property_type.clone().unwrap_or_default(),
                room_type: raw.room_type.clone().unwrap_or_default(),

                latitude,
                longitude,

                accommodates,
                bedrooms: bedrooms_imp.fill(accommodates, raw.bedrooms),
                bathrooms: bathrooms_imp.fill(accommodates, s.bathrooms),
                beds: beds_imp.fill(accommodates, raw.beds),

                price: s.price,

                minimum_nights: raw.minimum_nights.unwrap_or(0),
                maximum_nights: raw.maximum_nights.unwrap_or(0),

                host_since: raw.host_since.clone().unwrap_or_default(),
                host_response_time: raw
                    .host_response_time
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                host_response_rate: parse_rate(raw.host_response_rate.as_deref()),
                host_acceptance_rate: parse_rate(raw.host_acceptance_rate.as_deref()),
                host_is_superhost: parse_flag(raw.host_is_superhost.as_deref()),
                host_has_profile_pic: parse_flag(raw.host_has_profile_pic.as_deref()),
                host_identity_verified: parse_flag(raw.host_identity_verified.as_deref()),

                has_availability: parse_flag(raw.has_availability.as_deref()),
                instant_bookable: parse_flag(raw.instant_bookable.as_deref()),
                availability_30: raw.availability_30.unwrap_or(0),
                availability_60: raw.availability_60.unwrap_or(0),
                availability_90: raw.availability_90.unwrap_or(0),
                availability_365: raw.availability_365.unwrap_or(0),

                number_of_reviews: raw.number_of_reviews.unwrap_or(0),
                number_of_reviews_ltm: raw.number_of_reviews_ltm.unwrap_or(0),
                number_of_reviews_l30d: raw.number_of_reviews_l30d.unwrap_or(0),
                first_review: raw.first_review.clone(),
                last_review: raw.last_review.clone(),
                review_scores_rating: raw.review_scores_rating.unwrap_or(MISSING_SENTINEL),
                review_scores_accuracy: raw.review_scores_accuracy.unwrap_or(MISSING_SENTINEL),
                review_scores_cleanliness: raw
                    .review_scores_cleanliness
                    .unwrap_or(MISSING_SENTINEL),
                review_scores_checkin: raw.review_scores_checkin.unwrap_or(MISSING_SENTINEL),
                review_scores_communication: raw
                    .review_scores_communication
                    .unwrap_or(MISSING_SENTINEL),
                review_scores_location: raw.review_scores_location.unwrap_or(MISSING_SENTINEL),
                review_scores_value: raw.review_scores_value.unwrap_or(MISSING_SENTINEL),
                reviews_per_month: raw.reviews_per_month.unwrap_or(MISSING_SENTINEL),
                has_reviews: raw.reviews_per_month.is_some() as i64,

                has_ac: (amenities.contains("air conditioning") || amenities.contains("ac"))
                    as i64,
                has_pool: amenities.contains("pool") as i64,
                has_elevator: amenities.contains("elevator") as i64,
                has_parking: (amenities.contains("parking") || amenities.contains("garage"))
                    as i64,

                distance_to_sol_km: geo::distance_to(latitude, longitude, PUERTA_DEL_SOL),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usable_raw() -> RawListing {
        RawListing {
            listing_url: Some("https://example.com/rooms/1".into()),
            neighbourhood_group_cleansed: Some("Centro".into()),
            neighbourhood_cleansed: Some("Sol".into()),
            property_type: Some("Entire rental unit".into()),
            room_type: Some("Entire home/apt".into()),
            latitude: Some(40.4168),
            longitude: Some(-3.7038),
            accommodates: Some(4),
            bedrooms: Some(2.0),
            beds: Some(2.0),
            bathrooms_text: Some("1 bath".into()),
            price: Some("$100.00".into()),
            host_since: Some("2019-05-01".into()),
            host_has_profile_pic: Some("t".into()),
            host_identity_verified: Some("t".into()),
            ..RawListing::default()
        }
    }

    #[test]
    fn price_string_becomes_numeric() {
        assert_eq!(parse_price(Some("$1,234.50")), Some(1234.50));
        assert_eq!(parse_price(Some("75")), Some(75.0));
        assert_eq!(parse_price(None), None);
        assert_eq!(parse_price(Some("n/a")), None);
    }

    #[test]
    fn rate_string_becomes_numeric_with_sentinel() {
        assert_eq!(parse_rate(Some("95%")), 95.0);
        assert_eq!(parse_rate(Some("100%")), 100.0);
        assert_eq!(parse_rate(None), -1.0);
        assert_eq!(parse_rate(Some("N/A")), -1.0);
    }

    #[test]
    fn bathrooms_text_extraction() {
        assert_eq!(extract_first_number("1.5 shared baths"), Some(1.5));
        assert_eq!(extract_first_number("2 baths"), Some(2.0));
        assert_eq!(extract_first_number("Half-bath"), None);
    }

    #[test]
    fn row_without_price_is_dropped() {
        let mut no_price = usable_raw();
        no_price.price = None;
        let cleaned = clean_listings(&[no_price, usable_raw()]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].price, 100.0);
    }

    #[test]
    fn ghost_host_is_dropped() {
        let mut ghost = usable_raw();
        ghost.host_since = None;
        let cleaned = clean_listings(&[ghost, usable_raw()]);
        assert_eq!(cleaned.len(), 1);
    }

    #[test]
    fn review_columns_fill_with_sentinel_and_has_reviews_flags() {
        let silent = usable_raw();
        let mut reviewed = usable_raw();
        reviewed.reviews_per_month = Some(1.2);
        reviewed.review_scores_rating = Some(4.9);
        reviewed.number_of_reviews = Some(12);

        let cleaned = clean_listings(&[silent, reviewed]);
        assert_eq!(cleaned[0].has_reviews, 0);
        assert_eq!(cleaned[0].review_scores_rating, -1.0);
        assert_eq!(cleaned[0].reviews_per_month, -1.0);
        assert_eq!(cleaned[1].has_reviews, 1);
        assert_eq!(cleaned[1].review_scores_rating, 4.9);
        assert_eq!(cleaned[1].number_of_reviews, 12);
    }

    #[test]
    fn missing_response_time_becomes_unknown() {
        let cleaned = clean_listings(&[usable_raw()]);
        assert_eq!(cleaned[0].host_response_time, "Unknown");
    }

    #[test]
    fn superhost_missing_maps_to_false() {
        let mut row = usable_raw();
        row.host_is_superhost = None;
        row.has_availability = Some("t".into());
        let cleaned = clean_listings(&[row]);
        assert_eq!(cleaned[0].host_is_superhost, 0);
        assert_eq!(cleaned[0].has_availability, 1);
    }

    #[test]
    fn grouped_imputation_prefers_group_median_over_global() {
        // accommodates=4 rows have bedroom counts 2 and 4 (median 3);
        // accommodates=2 rows would pull a global median down to 2.
        let mut a = usable_raw();
        a.accommodates = Some(4);
        a.bedrooms = Some(2.0);
        let mut b = usable_raw();
        b.accommodates = Some(4);
        b.bedrooms = Some(4.0);
        let mut c = usable_raw();
        c.accommodates = Some(2);
        c.bedrooms = Some(1.0);
        let mut missing = usable_raw();
        missing.accommodates = Some(4);
        missing.bedrooms = None;

        let cleaned = clean_listings(&[a, b, c, missing]);
        assert_eq!(cleaned[3].bedrooms, 3.0);
    }

    #[test]
    fn entirely_empty_group_falls_back_to_global_median() {
        let mut a = usable_raw();
        a.accommodates = Some(2);
        a.bedrooms = Some(1.0);
        let mut b = usable_raw();
        b.accommodates = Some(6);
        b.bedrooms = Some(3.0);
        let mut missing = usable_raw();
        missing.accommodates = Some(4);
        missing.bedrooms = None;

        let cleaned = clean_listings(&[a, b, missing]);
        assert_eq!(cleaned[2].bedrooms, 2.0);
    }

    #[test]
    fn amenity_flags_match_patterns_case_insensitively() {
        let mut row = usable_raw();
        row.amenities =
            Some(r#"["Air conditioning", "Elevator", "Free street parking"]"#.into());
        let cleaned = clean_listings(&[row]);
        assert_eq!(cleaned[0].has_ac, 1);
        assert_eq!(cleaned[0].has_elevator, 1);
        assert_eq!(cleaned[0].has_parking, 1);
        assert_eq!(cleaned[0].has_pool, 0);
    }

    #[test]
    fn sol_distance_is_zero_at_sol() {
        let cleaned = clean_listings(&[usable_raw()]);
        assert!(cleaned[0].distance_to_sol_km.abs() < 1e-9);
    }
}
