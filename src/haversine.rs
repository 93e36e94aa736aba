//! Great-circle distance between coordinates.
//!
//! Used to estimate the length of straight-line route approximations when
//! the planner did not report a road distance. Ignores roads entirely.

/// Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Central angle between two (lat, lng) points, in radians.
fn central_angle(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin()
}

/// Haversine distance between two points in miles.
pub fn haversine_miles(from: (f64, f64), to: (f64, f64)) -> f64 {
    EARTH_RADIUS_MILES * central_angle(from, to)
}
