// src/domain/query.rs

use crate::errors::ServerError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Closed set of Madrid districts accepted by the prediction endpoint.
/// The serialized names are exactly the one-hot category labels used at
/// training time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum District {
    #[serde(rename = "Barajas")]
    Barajas,
    #[serde(rename = "Carabanchel")]
    Carabanchel,
    #[serde(rename = "Centro")]
    Centro,
    #[serde(rename = "Chamartín")]
    Chamartin,
    #[serde(rename = "Chamberí")]
    Chamberi,
    #[serde(rename = "Ciudad Lineal")]
    CiudadLineal,
    #[serde(rename = "Fuencarral - El Pardo")]
    Fuencarral,
    #[serde(rename = "Hortaleza")]
    Hortaleza,
    #[serde(rename = "Latina")]
    Latina,
    #[serde(rename = "Moncloa - Aravaca")]
    Moncloa,
    #[serde(rename = "Moratalaz")]
    Moratalaz,
    #[serde(rename = "Puente de Vallecas")]
    PuenteDeVallecas,
    #[serde(rename = "Retiro")]
    Retiro,
    #[serde(rename = "Salamanca")]
    Salamanca,
    #[serde(rename = "San Blas - Canillejas")]
    SanBlas,
    #[serde(rename = "Tetuán")]
    Tetuan,
    #[serde(rename = "Usera")]
    Usera,
    #[serde(rename = "Vicálvaro")]
    Vicalvaro,
    #[serde(rename = "Villa de Vallecas")]
    VillaDeVallecas,
    #[serde(rename = "Villaverde")]
    Villaverde,
}

impl District {
    pub const ALL: [District; 20] = [
        District::Barajas,
        District::Carabanchel,
        District::Centro,
        District::Chamartin,
        District::Chamberi,
        District::CiudadLineal,
        District::Fuencarral,
        District::Hortaleza,
        District::Latina,
        District::Moncloa,
        District::Moratalaz,
        District::PuenteDeVallecas,
        District::Retiro,
        District::Salamanca,
        District::SanBlas,
        District::Tetuan,
        District::Usera,
        District::Vicalvaro,
        District::VillaDeVallecas,
        District::Villaverde,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            District::Barajas => "Barajas",
            District::Carabanchel => "Carabanchel",
            District::Centro => "Centro",
            District::Chamartin => "Chamartín",
            District::Chamberi => "Chamberí",
            District::CiudadLineal => "Ciudad Lineal",
            District::Fuencarral => "Fuencarral - El Pardo",
            District::Hortaleza => "Hortaleza",
            District::Latina => "Latina",
            District::Moncloa => "Moncloa - Aravaca",
            District::Moratalaz => "Moratalaz",
            District::PuenteDeVallecas => "Puente de Vallecas",
            District::Retiro => "Retiro",
            District::Salamanca => "Salamanca",
            District::SanBlas => "San Blas - Canillejas",
            District::Tetuan => "Tetuán",
            District::Usera => "Usera",
            District::Vicalvaro => "Vicálvaro",
            District::VillaDeVallecas => "Villa de Vallecas",
            District::Villaverde => "Villaverde",
        }
    }

    pub fn from_name(name: &str) -> Option<District> {
        District::ALL.iter().copied().find(|d| d.name() == name)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed set of room types, matching the listings dataset labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RoomType {
    #[serde(rename = "Entire home/apt")]
    EntireHome,
    #[serde(rename = "Private room")]
    PrivateRoom,
    #[serde(rename = "Shared room")]
    SharedRoom,
    #[serde(rename = "Hotel room")]
    HotelRoom,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::EntireHome,
        RoomType::PrivateRoom,
        RoomType::SharedRoom,
        RoomType::HotelRoom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoomType::EntireHome => "Entire home/apt",
            RoomType::PrivateRoom => "Private room",
            RoomType::SharedRoom => "Shared room",
            RoomType::HotelRoom => "Hotel room",
        }
    }

    pub fn from_name(name: &str) -> Option<RoomType> {
        RoomType::ALL.iter().copied().find(|r| r.name() == name)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user-entered property description: the strict subset of a cleaned
/// listing a host can actually tell us about. Everything else is
/// backfilled by the inference translator.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyQuery {
    pub neighbourhood: District,
    pub room_type: RoomType,
    pub latitude: f64,
    pub longitude: f64,

    pub accommodates: i64,
    pub bedrooms: i64,
    pub beds: i64,
    pub bathrooms: f64,

    #[serde(default)]
    pub has_ac: i64,
    #[serde(default)]
    pub has_pool: i64,
    #[serde(default)]
    pub has_elevator: i64,
    #[serde(default)]
    pub has_parking: i64,

    #[serde(default)]
    pub host_is_superhost: i64,
    #[serde(default)]
    pub number_of_reviews: i64,
    #[serde(default = "default_review_score")]
    pub review_scores_rating: f64,
}

fn default_review_score() -> f64 {
    4.70
}

impl PropertyQuery {
    /// Reject value shapes the translator cannot turn into a sane feature
    /// row. Zero beds/accommodates are allowed (the ratio features guard
    /// them); negatives and non-finite coordinates are not.
    pub fn validate(&self) -> Result<(), ServerError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(ServerError::BadRequest(
                "latitude and longitude must be finite numbers".into(),
            ));
        }
        if self.accommodates < 0 || self.bedrooms < 0 || self.beds < 0 {
            return Err(ServerError::BadRequest(
                "capacity fields must not be negative".into(),
            ));
        }
        if !self.bathrooms.is_finite() || self.bathrooms < 0.0 {
            return Err(ServerError::BadRequest(
                "bathrooms must be a non-negative number".into(),
            ));
        }
        if self.number_of_reviews < 0 {
            return Err(ServerError::BadRequest(
                "number_of_reviews must not be negative".into(),
            ));
        }
        if !self.review_scores_rating.is_finite()
            || self.review_scores_rating < 0.0
            || self.review_scores_rating > 5.0
        {
            return Err(ServerError::BadRequest(
                "review_scores_rating must be between 0 and 5".into(),
            ));
        }
        Ok(())
    }

    /// Build a query out of a submitted host form. Checkboxes arrive as
    /// "on" when ticked and are absent otherwise.
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self, ServerError> {
        let text = |key: &str| -> Result<&str, ServerError> {
            fields
                .get(key)
                .map(String::as_str)
                .ok_or_else(|| ServerError::BadRequest(format!("Missing field: {key}")))
        };
        let number = |key: &str| -> Result<f64, ServerError> {
            text(key)?
                .trim()
                .parse::<f64>()
                .map_err(|_| ServerError::BadRequest(format!("Invalid number for {key}")))
        };
        let count = |key: &str| -> Result<i64, ServerError> { Ok(number(key)? as i64) };
        let checkbox = |key: &str| -> i64 { fields.contains_key(key) as i64 };

        let district = text("neighbourhood")?;
        let neighbourhood = District::from_name(district)
            .ok_or_else(|| ServerError::BadRequest(format!("Unknown district: {district}")))?;
        let room = text("room_type")?;
        let room_type = RoomType::from_name(room)
            .ok_or_else(|| ServerError::BadRequest(format!("Unknown room type: {room}")))?;

        let query = PropertyQuery {
            neighbourhood,
            room_type,
            latitude: number("latitude")?,
            longitude: number("longitude")?,
            accommodates: count("accommodates")?,
            bedrooms: count("bedrooms")?,
            beds: count("beds")?,
            bathrooms: number("bathrooms")?,
            has_ac: checkbox("has_ac"),
            has_pool: checkbox("has_pool"),
            has_elevator: checkbox("has_elevator"),
            has_parking: checkbox("has_parking"),
            host_is_superhost: checkbox("host_is_superhost"),
            number_of_reviews: count("number_of_reviews")?,
            review_scores_rating: number("review_scores_rating")?,
        };
        query.validate()?;
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_names_round_trip() {
        for d in District::ALL {
            assert_eq!(District::from_name(d.name()), Some(d));
        }
        assert_eq!(District::from_name("Narnia"), None);
    }

    #[test]
    fn query_deserializes_with_documented_defaults() {
        let q: PropertyQuery = serde_json::from_str(
            r#"{
                "neighbourhood": "Centro",
                "room_type": "Entire home/apt",
                "latitude": 40.4168,
                "longitude": -3.7038,
                "accommodates": 4,
                "bedrooms": 2,
                "beds": 2,
                "bathrooms": 1.0
            }"#,
        )
        .unwrap();
        assert_eq!(q.neighbourhood, District::Centro);
        assert_eq!(q.host_is_superhost, 0);
        assert_eq!(q.number_of_reviews, 0);
        assert_eq!(q.review_scores_rating, 4.70);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_shapes() {
        let mut q: PropertyQuery = serde_json::from_str(
            r#"{
                "neighbourhood": "Retiro",
                "room_type": "Private room",
                "latitude": 40.41,
                "longitude": -3.68,
                "accommodates": 2,
                "bedrooms": 1,
                "beds": 1,
                "bathrooms": 1.0
            }"#,
        )
        .unwrap();
        q.latitude = f64::NAN;
        assert!(q.validate().is_err());
        q.latitude = 40.41;
        q.bedrooms = -1;
        assert!(q.validate().is_err());
        q.bedrooms = 1;
        q.review_scores_rating = 7.0;
        assert!(q.validate().is_err());
    }

    #[test]
    fn form_checkboxes_default_to_zero() {
        let mut fields = HashMap::new();
        for (k, v) in [
            ("neighbourhood", "Centro"),
            ("room_type", "Entire home/apt"),
            ("latitude", "40.4168"),
            ("longitude", "-3.7038"),
            ("accommodates", "4"),
            ("bedrooms", "2"),
            ("beds", "2"),
            ("bathrooms", "1.0"),
            ("number_of_reviews", "10"),
            ("review_scores_rating", "4.75"),
            ("has_elevator", "on"),
        ] {
            fields.insert(k.to_string(), v.to_string());
        }
        let q = PropertyQuery::from_form(&fields).unwrap();
        assert_eq!(q.has_elevator, 1);
        assert_eq!(q.has_ac, 0);
        assert_eq!(q.number_of_reviews, 10);
    }
}
