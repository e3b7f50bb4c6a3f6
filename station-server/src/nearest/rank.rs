//! k-nearest selection.

use crate::domain::{LatLng, RankedStation, Station};

use super::haversine::haversine_km;

/// Number of stations returned when the caller does not ask for a count.
pub const DEFAULT_NEAREST_COUNT: usize = 5;

/// Rank catalog stations by straight-line distance from `origin`.
///
/// Returns at most `k` stations, nearest first. The sort is stable, so
/// stations at equal distance (e.g. sharing coordinates) keep their
/// catalog order. `k == 0` or an empty catalog yields an empty list, and
/// `k` larger than the catalog yields every station.
///
/// Pure: identical inputs always give identical output.
pub fn rank_nearest(origin: LatLng, catalog: &[Station], k: usize) -> Vec<RankedStation> {
    if k == 0 || catalog.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedStation> = catalog
        .iter()
        .map(|station| RankedStation {
            station: station.clone(),
            distance: haversine_km(origin.lat(), origin.lng(), station.lat, station.lng),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(k);

    ranked
}
