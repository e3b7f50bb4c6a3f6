//! Supported cities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{LatLng, Locale};

use super::error::CatalogError;

/// A supported city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CityId {
    Seoul,
    Tokyo,
    NewYork,
    London,
    Paris,
    Beijing,
}

impl CityId {
    /// All supported cities, in display order.
    pub const ALL: [CityId; 6] = [
        CityId::Seoul,
        CityId::Tokyo,
        CityId::NewYork,
        CityId::London,
        CityId::Paris,
        CityId::Beijing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CityId::Seoul => "seoul",
            CityId::Tokyo => "tokyo",
            CityId::NewYork => "newyork",
            CityId::London => "london",
            CityId::Paris => "paris",
            CityId::Beijing => "beijing",
        }
    }

    /// Language used for walking-time labels in this city.
    pub fn locale(&self) -> Locale {
        match self {
            CityId::Seoul => Locale::Korean,
            _ => Locale::English,
        }
    }

    /// Static metadata for this city.
    pub fn config(&self) -> CityConfig {
        let (name, name_local, (lat, lng), country) = match self {
            CityId::Seoul => ("Seoul", Some("서울"), (37.5665, 126.978), "South Korea"),
            CityId::Tokyo => ("Tokyo", Some("東京"), (35.6812, 139.7671), "Japan"),
            CityId::NewYork => ("New York", None, (40.7128, -74.006), "United States"),
            CityId::London => ("London", None, (51.5074, -0.1278), "United Kingdom"),
            CityId::Paris => ("Paris", None, (48.8566, 2.3522), "France"),
            CityId::Beijing => ("Beijing", Some("北京"), (39.9042, 116.4074), "China"),
        };

        CityConfig {
            id: *self,
            name,
            name_local,
            center: MapCenter { lat, lng },
            zoom: 12,
            country,
        }
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CityId {
    type Err = CatalogError;

    /// Parse a city id, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        CityId::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| CatalogError::UnknownCity(s.to_string()))
    }
}

/// Default map centre for a city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lng: f64,
}

/// Display metadata for a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityConfig {
    pub id: CityId,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_local: Option<&'static str>,
    pub center: MapCenter,
    pub zoom: u8,
    pub country: &'static str,
}

impl CityConfig {
    /// The map centre as a validated coordinate.
    pub fn center(&self) -> Option<LatLng> {
        LatLng::new(self.center.lat, self.center.lng).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!("seoul".parse::<CityId>().unwrap(), CityId::Seoul);
        assert_eq!("NewYork".parse::<CityId>().unwrap(), CityId::NewYork);
        assert_eq!(" LONDON ".parse::<CityId>().unwrap(), CityId::London);
    }

    #[test]
    fn parse_unknown() {
        let err = "atlantis".parse::<CityId>().unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCity(ref s) if s == "atlantis"));
    }

    #[test]
    fn as_str_roundtrip() {
        for city in CityId::ALL {
            assert_eq!(city.as_str().parse::<CityId>().unwrap(), city);
        }
    }

    #[test]
    fn serde_matches_as_str() {
        for city in CityId::ALL {
            let json = serde_json::to_string(&city).unwrap();
            assert_eq!(json, format!("\"{}\"", city.as_str()));
        }
    }

    #[test]
    fn every_centre_is_valid() {
        for city in CityId::ALL {
            assert!(city.config().center().is_some(), "{city} centre invalid");
        }
    }

    #[test]
    fn only_seoul_is_korean() {
        assert_eq!(CityId::Seoul.locale(), Locale::Korean);
        assert_eq!(CityId::Tokyo.locale(), Locale::English);
    }
}
