//! Great-circle distance.

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in degrees.
///
/// ```
/// use station_server::nearest::haversine_km;
///
/// // One degree of longitude along the equator
/// let d = haversine_km(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111.19492664455873).abs() < 1e-9);
/// ```
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + lat1.to_radians().cos()
            * lat2.to_radians().cos()
            * (d_lng / 2.0).sin()
            * (d_lng / 2.0).sin();

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
