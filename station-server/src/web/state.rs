//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::routing::FootRoutingClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station catalogs, read-only after startup
    pub catalog: Arc<Catalog>,

    /// Foot-routing client, shared by every request's coordinator
    pub routing: Arc<FootRoutingClient>,

    /// Number of stations returned when a query gives no `k`
    pub default_count: usize,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: Catalog, routing: FootRoutingClient, default_count: usize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            routing: Arc::new(routing),
            default_count,
        }
    }
}
