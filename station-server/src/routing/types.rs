//! Wire types for the routing service's route response.
//!
//! Only the fields used to build a walking route are modelled; anything
//! else in the body is ignored.

use serde::Deserialize;

/// Top-level route response.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// "Ok" on success, otherwise an error code such as "NoRoute".
    pub code: String,

    /// Human-readable detail accompanying an error code.
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub routes: Vec<RouteItem>,
}

/// One route alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteItem {
    /// Seconds.
    pub duration: f64,

    /// Metres.
    pub distance: f64,

    pub geometry: RouteGeometry,
}

/// GeoJSON LineString geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteGeometry {
    /// `[lng, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}
