//! Published enrichment state.

use serde::Serialize;

use crate::domain::RankedStation;
use crate::routing::WalkingRoute;

/// A ranked station with its walking route, when one is available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedStation {
    #[serde(flatten)]
    pub ranked: RankedStation,

    /// `None` while loading, or when no route could be obtained.
    pub walking: Option<WalkingRoute>,
}

/// What observers of the coordinator see.
///
/// A station without walking data is "still loading" when `is_loading` is
/// true and "no route" otherwise. Straight-line distance is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentSnapshot {
    /// Selection this snapshot belongs to.
    pub generation: u64,

    /// Stations in ranked order.
    pub enriched_stations: Vec<EnrichedStation>,

    pub is_loading: bool,
}

impl EnrichmentSnapshot {
    /// Number of stations that have a walking route.
    pub fn routed_count(&self) -> usize {
        self.enriched_stations
            .iter()
            .filter(|s| s.walking.is_some())
            .count()
    }
}
