//! Walking route results.

use serde::Serialize;

use super::error::{RoutingError, truncate_body};
use super::types::RouteResponse;

/// Whether a walking route was obtained.
///
/// Only `Loaded` is produced here: a failed lookup yields no route at all.
/// `Error` is part of the wire vocabulary for clients that keep a
/// placeholder entry per station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Loaded,
    Error,
}

/// Walking route from an origin to a station.
///
/// Geometry is kept in both axis orders: map layers that take `[lat, lng]`
/// and those that take `[lng, lat]` can each use theirs directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkingRoute {
    /// Seconds.
    pub duration: f64,

    /// Metres.
    pub distance: f64,

    /// `[lat, lng]` pairs.
    pub geometry: Vec<[f64; 2]>,

    /// `[lng, lat]` pairs, as returned by the routing service.
    pub geometry_lng_lat: Vec<[f64; 2]>,

    pub status: RouteStatus,
}

impl WalkingRoute {
    /// Build a walking route from the first route of a response.
    pub fn from_response(response: RouteResponse) -> Result<Self, RoutingError> {
        if response.code != "Ok" {
            return Err(RoutingError::Provider {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRoute)?;

        let geometry_lng_lat = route.geometry.coordinates;
        let geometry = geometry_lng_lat
            .iter()
            .map(|&[lng, lat]| [lat, lng])
            .collect();

        Ok(Self {
            duration: route.duration,
            distance: route.distance,
            geometry,
            geometry_lng_lat,
            status: RouteStatus::Loaded,
        })
    }

    /// Parse a raw response body.
    pub fn from_body(body: &str) -> Result<Self, RoutingError> {
        let response: RouteResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
                body: Some(truncate_body(body)),
            })?;

        Self::from_response(response)
    }
}
