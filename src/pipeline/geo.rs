// src/pipeline/geo.rs

/// Great-circle distance between two (lat, lon) pairs in degrees, in km.
/// Haversine formula; NaN coordinates propagate to a NaN distance.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // Earth radius
    const R: f64 = 6371.0;

    let lat1_rad = lat1.to_radians();
    let lon1_rad = lon1.to_radians();
    let lat2_rad = lat2.to_radians();
    let lon2_rad = lon2.to_radians();

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    R * c
}

/// Fixed Madrid points of interest used as locational proxy features.
/// Sol is attached during cleaning; all five during modeling prep and
/// inference translation.
pub const PUERTA_DEL_SOL: (f64, f64) = (40.4168, -3.7038);
pub const BERNABEU: (f64, f64) = (40.4530, -3.6883);
pub const METROPOLITANO: (f64, f64) = (40.4361, -3.5995);
pub const ATOCHA: (f64, f64) = (40.4065, -3.6908);
pub const AEROPUERTO: (f64, f64) = (40.4839, -3.5680);

pub fn distance_to(lat: f64, lon: f64, poi: (f64, f64)) -> f64 {
    haversine_km(lat, lon, poi.0, poi.1)
}
