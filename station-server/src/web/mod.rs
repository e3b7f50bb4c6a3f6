//! Web layer for the nearest-station finder.
//!
//! Provides JSON endpoints for city catalogs, straight-line ranking and
//! walking-route enrichment.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
