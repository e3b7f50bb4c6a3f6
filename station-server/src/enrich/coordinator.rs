//! Selection state machine and lookup fan-out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::domain::{LatLng, RankedStation, StationKey};
use crate::routing::{RouteProvider, WalkingRoute, fetch_walking_route};

use super::merge::merge_routes;
use super::snapshot::EnrichmentSnapshot;

/// Where the current selection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPhase {
    /// No origin, or no stations. Nothing in flight.
    Idle,
    /// Lookups for the current selection are in flight.
    Loading,
    /// Every lookup for the current selection has resolved.
    Settled,
}

/// Outcome of one station's lookup.
type LookupResult = (StationKey, Option<WalkingRoute>);

/// State owned by the coordinator. Only mutated under the lock, never
/// held across an await.
struct Selection {
    generation: u64,
    cancel: CancellationToken,
    origin: Option<LatLng>,
    stations: Vec<RankedStation>,
    routes: HashMap<StationKey, WalkingRoute>,
    phase: SelectionPhase,
}

impl Selection {
    fn snapshot(&self) -> EnrichmentSnapshot {
        EnrichmentSnapshot {
            generation: self.generation,
            enriched_stations: merge_routes(&self.stations, &self.routes),
            is_loading: self.phase == SelectionPhase::Loading,
        }
    }

    /// Record the lookups of `generation`, unless a newer selection has
    /// replaced it. Returns whether the results were applied.
    fn apply_results(&mut self, generation: u64, results: Vec<LookupResult>) -> bool {
        if generation != self.generation {
            return false;
        }

        // Later duplicates of a key overwrite earlier ones.
        for (key, route) in results {
            if let Some(route) = route {
                self.routes.insert(key, route);
            }
        }
        self.phase = SelectionPhase::Settled;
        true
    }
}

/// Enriches ranked stations with walking routes for the current selection.
///
/// Observers call [`subscribe`](Self::subscribe) and receive a new
/// [`EnrichmentSnapshot`] whenever the selection changes or settles.
/// Methods that start lookups must be called from within a Tokio runtime.
pub struct RouteCoordinator<P: RouteProvider> {
    provider: Arc<P>,
    inner: Arc<Mutex<Selection>>,
    tx: watch::Sender<EnrichmentSnapshot>,
}

impl<P: RouteProvider> RouteCoordinator<P> {
    /// Create an idle coordinator.
    pub fn new(provider: P) -> Self {
        Self::with_shared(Arc::new(provider))
    }

    /// Create an idle coordinator around a provider shared with others.
    pub fn with_shared(provider: Arc<P>) -> Self {
        let (tx, _rx) = watch::channel(EnrichmentSnapshot::default());
        let inner = Selection {
            generation: 0,
            cancel: CancellationToken::new(),
            origin: None,
            stations: Vec::new(),
            routes: HashMap::new(),
            phase: SelectionPhase::Idle,
        };

        Self {
            provider,
            inner: Arc::new(Mutex::new(inner)),
            tx,
        }
    }

    /// Start a new selection.
    ///
    /// Cancels every lookup of the previous selection. With an origin and
    /// at least one station the coordinator enters `Loading` and issues
    /// one lookup per station concurrently; otherwise it becomes `Idle`.
    /// Every call is a new selection, so selecting the same point again
    /// retries lookups that failed.
    ///
    /// Returns the generation number of the new selection.
    pub fn select(&self, origin: Option<LatLng>, stations: Vec<RankedStation>) -> u64 {
        let mut sel = self.lock();
        sel.cancel.cancel();
        sel.generation += 1;
        sel.routes.clear();

        let generation = sel.generation;

        let origin = match origin {
            Some(origin) if !stations.is_empty() => origin,
            _ => {
                sel.origin = origin;
                sel.stations = Vec::new();
                sel.phase = SelectionPhase::Idle;
                self.tx.send_replace(sel.snapshot());
                debug!(generation, "Selection idle");
                return generation;
            }
        };

        let cancel = CancellationToken::new();
        sel.cancel = cancel.clone();
        sel.origin = Some(origin);
        sel.phase = SelectionPhase::Loading;

        // Stations with unusable coordinates get no lookup and stay unrouted.
        let targets: Vec<(StationKey, Option<LatLng>)> = stations
            .iter()
            .map(|s| (s.key(), s.station.position().ok()))
            .collect();

        sel.stations = stations;
        self.tx.send_replace(sel.snapshot());
        drop(sel);

        debug!(
            generation,
            %origin,
            stations = targets.len(),
            "Selection loading"
        );

        let provider = Arc::clone(&self.provider);
        let inner = Arc::clone(&self.inner);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let lookups = targets.into_iter().map(|(key, dest)| {
                let provider = &provider;
                let cancel = &cancel;
                async move {
                    let route = match dest {
                        Some(dest) => {
                            fetch_walking_route(provider.as_ref(), origin, dest, cancel).await
                        }
                        None => None,
                    };
                    (key, route)
                }
            });

            let results = join_all(lookups).await;
            let routed = results.iter().filter(|(_, r)| r.is_some()).count();

            let mut sel = inner.lock().unwrap_or_else(PoisonError::into_inner);
            if sel.apply_results(generation, results) {
                tx.send_replace(sel.snapshot());
                debug!(generation, routed, "Selection settled");
            } else {
                trace!(
                    generation,
                    current = sel.generation,
                    "Dropping results of superseded selection"
                );
            }
        });

        generation
    }

    /// Drop the current selection and cancel its lookups.
    pub fn clear(&self) -> u64 {
        self.select(None, Vec::new())
    }

    /// Receive a snapshot every time the selection changes or settles.
    pub fn subscribe(&self) -> watch::Receiver<EnrichmentSnapshot> {
        self.tx.subscribe()
    }

    /// Current enriched list and loading flag.
    pub fn snapshot(&self) -> EnrichmentSnapshot {
        self.tx.borrow().clone()
    }

    /// Lifecycle phase of the current selection.
    pub fn phase(&self) -> SelectionPhase {
        self.lock().phase
    }

    /// Origin of the current selection, if any.
    pub fn origin(&self) -> Option<LatLng> {
        self.lock().origin
    }

    /// Wait until the current selection has settled (or is idle).
    ///
    /// If the selection is replaced while waiting, waits for the new one.
    pub async fn settled(&self) -> EnrichmentSnapshot {
        let mut rx = self.tx.subscribe();
        match rx.wait_for(|s| !s.is_loading).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Selection> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: RouteProvider> Drop for RouteCoordinator<P> {
    fn drop(&mut self) {
        self.lock().cancel.cancel();
    }
}
