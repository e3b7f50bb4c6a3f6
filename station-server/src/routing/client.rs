//! Foot-routing HTTP client.
//!
//! Provides async walking-route queries against an OSRM-compatible
//! `foot` profile. Handles request shaping, concurrency limiting, and
//! conversion to [`WalkingRoute`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::LatLng;

use super::error::{RoutingError, truncate_body};
use super::provider::RouteProvider;
use super::walking::WalkingRoute;

/// Default base URL for the public OSM foot-routing service.
const DEFAULT_BASE_URL: &str = "https://routing.openstreetmap.de/routed-foot/route/v1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL up to and excluding the profile segment
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutingConfig {
    /// Create a config pointing at the public foot-routing service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (self-hosted OSRM, or a test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Foot-routing API client.
///
/// Uses a semaphore to limit concurrent requests so a burst of lookups
/// does not trip the public service's rate limit.
#[derive(Debug, Clone)]
pub struct FootRoutingClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl FootRoutingClient {
    /// Create a new routing client with the given configuration.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        if config.max_concurrent == 0 {
            return Err(RoutingError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// URL for a two-point walking route request.
    fn route_url(&self, from: LatLng, to: LatLng) -> String {
        format!(
            "{}/foot/{},{};{},{}",
            self.base_url,
            from.lng(),
            from.lat(),
            to.lng(),
            to.lat()
        )
    }

    /// Get the walking route between two points.
    ///
    /// Requests the full route overview with GeoJSON geometry and returns
    /// the first route alternative.
    pub async fn get_walking_route(
        &self,
        from: LatLng,
        to: LatLng,
    ) -> Result<WalkingRoute, RoutingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::NotConfigured("semaphore closed".to_string()))?;

        let url = self.route_url(from, to);
        debug!(%url, "Requesting walking route");

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        let body = response.text().await?;

        WalkingRoute::from_body(&body)
    }
}

impl RouteProvider for FootRoutingClient {
    async fn walking_route(&self, from: LatLng, to: LatLng) -> Result<WalkingRoute, RoutingError> {
        self.get_walking_route(from, to).await
    }
}
