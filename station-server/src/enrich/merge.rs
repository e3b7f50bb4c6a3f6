//! Attaching resolved routes to the ranked list.

use std::collections::HashMap;

use crate::domain::{RankedStation, StationKey};
use crate::routing::WalkingRoute;

use super::snapshot::EnrichedStation;

/// Annotate ranked stations with their walking routes.
///
/// Output order is the ranked order. Routes are matched by name + line
/// key, so two entries sharing both receive the same route.
pub fn merge_routes(
    stations: &[RankedStation],
    routes: &HashMap<StationKey, WalkingRoute>,
) -> Vec<EnrichedStation> {
    stations
        .iter()
        .map(|ranked| EnrichedStation {
            ranked: ranked.clone(),
            walking: routes.get(&ranked.key()).cloned(),
        })
        .collect()
}
