//! Walking routes from an OSRM-compatible foot-routing service.
//!
//! Key characteristics of the routing service:
//! - Coordinates in the request path and in returned geometry are
//!   longitude-first
//! - A successful body has `code == "Ok"` and at least one route
//! - Failures of any kind are collapsed to "no route" by
//!   [`fetch_walking_route`]; callers fall back to straight-line distance

mod client;
mod error;
mod provider;
mod types;
mod walking;

pub use client::{FootRoutingClient, RoutingConfig};
pub use error::RoutingError;
pub use provider::{RouteProvider, fetch_walking_route};
pub use types::{RouteGeometry, RouteItem, RouteResponse};
pub use walking::{RouteStatus, WalkingRoute};
