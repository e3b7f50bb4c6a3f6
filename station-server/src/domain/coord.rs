//! Geographic coordinate types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a coordinate outside WGS84 bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lng}): {reason}")]
pub struct InvalidCoordinate {
    lat: f64,
    lng: f64,
    reason: &'static str,
}

/// A valid WGS84 position in decimal degrees.
///
/// Latitude is always in `[-90, 90]` and longitude in `[-180, 180]`. Any
/// `LatLng` value is valid by construction, so code that receives one never
/// has to re-check its bounds.
///
/// # Examples
///
/// ```
/// use station_server::domain::LatLng;
///
/// let city_hall = LatLng::new(37.5665, 126.9780).unwrap();
/// assert_eq!(city_hall.lat(), 37.5665);
///
/// // Out of range is rejected
/// assert!(LatLng::new(91.0, 0.0).is_err());
/// assert!(LatLng::new(0.0, -180.5).is_err());
///
/// // NaN is rejected
/// assert!(LatLng::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLatLng", into = "RawLatLng")]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinate {
                lat,
                lng,
                reason: "must be finite",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                lat,
                lng,
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                lat,
                lng,
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Debug for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LatLng({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Wire form of a coordinate, validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawLatLng> for LatLng {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawLatLng) -> Result<Self, Self::Error> {
        LatLng::new(raw.lat, raw.lng)
    }
}

impl From<LatLng> for RawLatLng {
    fn from(p: LatLng) -> Self {
        RawLatLng {
            lat: p.lat,
            lng: p.lng,
        }
    }
}
