//! Nearest subway station finder.
//!
//! Ranks a city's stations by straight-line distance from a chosen point
//! and enriches the nearest ones with walking routes from a foot-routing
//! service, cancelling superseded lookups when the point changes.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod nearest;
pub mod routing;
pub mod web;
