//! Route provider abstraction and the cancellable lookup.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::domain::LatLng;

use super::error::RoutingError;
use super::walking::WalkingRoute;

/// Source of walking routes.
///
/// This abstraction allows the enrichment coordinator to be tested with
/// mock routes instead of a live routing service.
pub trait RouteProvider: Send + Sync + 'static {
    /// Get the walking route from `from` to `to`.
    fn walking_route(
        &self,
        from: LatLng,
        to: LatLng,
    ) -> impl Future<Output = Result<WalkingRoute, RoutingError>> + Send;
}

/// Look up a walking route, collapsing every failure to `None`.
///
/// `None` is the uniform "no route available" signal: HTTP and provider
/// errors, empty route lists and cancellation all produce it, and the
/// caller falls back to straight-line distance. Cancellation wins over a
/// result that completes at the same time. A single attempt is made.
pub async fn fetch_walking_route<P: RouteProvider>(
    provider: &P,
    from: LatLng,
    to: LatLng,
    cancel: &CancellationToken,
) -> Option<WalkingRoute> {
    tokio::select! {
        biased;

        _ = cancel.cancelled() => {
            trace!(%from, %to, "Walking route lookup cancelled");
            None
        }

        result = provider.walking_route(from, to) => match result {
            Ok(route) => Some(route),
            Err(e) => {
                debug!(%from, %to, error = %e, "Walking route unavailable, using straight line");
                None
            }
        },
    }
}
