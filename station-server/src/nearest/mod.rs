//! Straight-line nearest-station ranking.
//!
//! Distances are great-circle distances computed with the haversine
//! formula. Catalogs are a few hundred stations per city at most, so
//! every query is a full linear scan with no spatial index.

mod haversine;
mod rank;

pub use haversine::{EARTH_RADIUS_KM, haversine_km};
pub use rank::{DEFAULT_NEAREST_COUNT, rank_nearest};
