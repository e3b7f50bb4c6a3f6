//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{CityCatalog, CityConfig, CityId};
use crate::domain::{
    LatLng, Locale, RankedStation, Station, format_distance, format_walking_distance,
    format_walking_time,
};
use crate::enrich::EnrichedStation;
use crate::routing::{RouteStatus, WalkingRoute};

/// Query for nearest stations.
#[derive(Debug, Deserialize)]
pub struct NearestRequest {
    /// City id (defaults to Seoul)
    pub city: Option<String>,

    /// Origin latitude in degrees
    pub lat: f64,

    /// Origin longitude in degrees
    pub lng: f64,

    /// Number of stations to return; signed so negatives can be rejected
    pub k: Option<i64>,
}

/// A city in the city list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResult {
    #[serde(flatten)]
    pub config: CityConfig,

    /// Number of stations in the loaded catalog
    pub station_count: usize,
}

/// Response listing supported cities.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<CityResult>,
}

/// Full catalog for one city.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStationsResponse {
    pub city: CityId,
    pub line_colors: BTreeMap<String, String>,
    pub stations: Vec<Station>,
}

/// A ranked station in results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    /// Local-language name
    pub name: String,

    /// English name, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,

    /// Name with English appended when it differs
    pub display_name: String,

    pub line: String,

    /// Line colour from the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,

    pub lat: f64,
    pub lng: f64,

    /// Straight-line distance in kilometres
    pub distance: f64,

    /// Straight-line distance for display (e.g. "450m", "1.46km")
    pub distance_label: String,

    /// Walking route; absent when not requested or unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walking: Option<WalkingResult>,
}

/// Walking route in results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkingResult {
    /// Seconds
    pub duration: f64,

    /// Metres
    pub distance: f64,

    /// e.g. "12 min walk" / "도보 12분"
    pub duration_label: String,

    /// e.g. "950m", "1.2km"
    pub distance_label: String,

    /// `[lat, lng]` pairs
    pub geometry: Vec<[f64; 2]>,

    /// `[lng, lat]` pairs
    pub geometry_lng_lat: Vec<[f64; 2]>,

    pub status: RouteStatus,
}

/// Response for a straight-line nearest query.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub city: CityId,
    pub origin: LatLng,
    pub stations: Vec<StationResult>,
}

/// Response for a nearest query enriched with walking routes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestWalkingResponse {
    pub city: CityId,
    pub origin: LatLng,
    pub stations: Vec<StationResult>,

    /// Stations that received a walking route
    pub routed_count: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl CityResult {
    /// Create from a city and its loaded catalog.
    pub fn new(city: CityId, catalog: &CityCatalog) -> Self {
        Self {
            config: city.config(),
            station_count: catalog.stations.len(),
        }
    }
}

impl StationResult {
    /// Create from a ranked station.
    pub fn from_ranked(ranked: &RankedStation, catalog: &CityCatalog) -> Self {
        let station = &ranked.station;
        Self {
            name: station.name.clone(),
            name_en: station.name_en.clone(),
            display_name: station.display_name(),
            line: station.line.clone(),
            line_color: catalog.line_color(&station.line).map(str::to_string),
            lat: station.lat,
            lng: station.lng,
            distance: ranked.distance,
            distance_label: format_distance(ranked.distance),
            walking: None,
        }
    }

    /// Create from an enriched station, labelling walking data in `locale`.
    pub fn from_enriched(
        enriched: &EnrichedStation,
        catalog: &CityCatalog,
        locale: Locale,
    ) -> Self {
        let mut result = Self::from_ranked(&enriched.ranked, catalog);
        result.walking = enriched
            .walking
            .as_ref()
            .map(|w| WalkingResult::from_route(w, locale));
        result
    }
}

impl WalkingResult {
    /// Create from a walking route.
    pub fn from_route(route: &WalkingRoute, locale: Locale) -> Self {
        Self {
            duration: route.duration,
            distance: route.distance,
            duration_label: format_walking_time(route.duration, locale),
            distance_label: format_walking_distance(route.distance),
            geometry: route.geometry.clone(),
            geometry_lng_lat: route.geometry_lng_lat.clone(),
            status: route.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CityCatalog {
        let mut line_colors = BTreeMap::new();
        line_colors.insert("1".to_string(), "#0052A4".to_string());
        CityCatalog {
            line_colors,
            stations: vec![],
        }
    }

    fn ranked() -> RankedStation {
        RankedStation {
            station: Station {
                name: "서울역".into(),
                name_en: Some("Seoul Station".into()),
                line: "1".into(),
                lat: 37.5547,
                lng: 126.9707,
            },
            distance: 1.4614,
        }
    }

    fn route() -> WalkingRoute {
        WalkingRoute {
            duration: 1230.0,
            distance: 1720.0,
            geometry: vec![[37.5665, 126.978], [37.5547, 126.9707]],
            geometry_lng_lat: vec![[126.978, 37.5665], [126.9707, 37.5547]],
            status: RouteStatus::Loaded,
        }
    }

    #[test]
    fn station_result_from_ranked() {
        let result = StationResult::from_ranked(&ranked(), &catalog());

        assert_eq!(result.display_name, "서울역 (Seoul Station)");
        assert_eq!(result.line_color.as_deref(), Some("#0052A4"));
        assert_eq!(result.distance_label, "1.46km");
        assert!(result.walking.is_none());
    }

    #[test]
    fn station_result_with_walking() {
        let enriched = EnrichedStation {
            ranked: ranked(),
            walking: Some(route()),
        };
        let result = StationResult::from_enriched(&enriched, &catalog(), Locale::Korean);

        let walking = result.walking.unwrap();
        assert_eq!(walking.duration_label, "도보 21분");
        assert_eq!(walking.distance_label, "1.7km");
        assert_eq!(walking.geometry[0], [37.5665, 126.978]);
    }

    #[test]
    fn walking_omitted_from_json_when_absent() {
        let result = StationResult::from_ranked(&ranked(), &CityCatalog::default());
        let value = serde_json::to_value(&result).unwrap();

        assert!(value.get("walking").is_none());
        assert!(value.get("lineColor").is_none());
        assert_eq!(value["nameEn"], "Seoul Station");
        assert_eq!(value["distanceLabel"], "1.46km");
    }

    #[test]
    fn city_result_flattens_config() {
        let value = serde_json::to_value(CityResult::new(CityId::Tokyo, &catalog())).unwrap();

        assert_eq!(value["id"], "tokyo");
        assert_eq!(value["nameLocal"], "東京");
        assert_eq!(value["stationCount"], 0);
    }
}
