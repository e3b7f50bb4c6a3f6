//! Walking-route enrichment of ranked stations.
//!
//! A *selection* is an origin paired with the ranked stations computed
//! for it. For each selection the coordinator looks up a walking route to
//! every station concurrently and publishes the ranked list annotated
//! with whichever routes came back.
//!
//! Selections are identified by a generation number. Choosing a new
//! selection cancels every outstanding lookup of the previous one, and
//! results tagged with an older generation are dropped when they arrive.

mod coordinator;
mod merge;
mod snapshot;

pub use coordinator::{RouteCoordinator, SelectionPhase};
pub use merge::merge_routes;
pub use snapshot::{EnrichedStation, EnrichmentSnapshot};
