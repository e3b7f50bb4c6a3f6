//! Domain types for the nearest-station finder.
//!
//! This module contains the core value types: validated coordinates,
//! catalog stations and their ranked form. Coordinates enforce their
//! bounds at construction time, so code that receives a `LatLng` can
//! trust it.

mod coord;
mod error;
mod format;
mod station;

pub use coord::{InvalidCoordinate, LatLng};
pub use error::DomainError;
pub use format::{Locale, format_distance, format_walking_distance, format_walking_time};
pub use station::{RankedStation, Station, StationKey};
