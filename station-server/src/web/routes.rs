//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::catalog::{CatalogError, CityCatalog, CityId};
use crate::config::MAX_NEAREST_COUNT;
use crate::domain::{DomainError, LatLng, RankedStation};
use crate::enrich::RouteCoordinator;
use crate::nearest::rank_nearest;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cities", get(list_cities))
        .route("/api/cities/:city/stations", get(city_stations))
        .route("/api/nearest", get(nearest))
        .route("/api/nearest/walking", get(nearest_walking))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List supported cities with their station counts.
async fn list_cities(State(state): State<AppState>) -> Json<CitiesResponse> {
    let cities = CityId::ALL
        .into_iter()
        .map(|city| CityResult::new(city, state.catalog.city(city)))
        .collect();

    Json(CitiesResponse { cities })
}

/// Full station table and line colours for one city.
async fn city_stations(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<CityStationsResponse>, AppError> {
    let city: CityId = city.parse()?;
    let catalog = state.catalog.city(city);

    Ok(Json(CityStationsResponse {
        city,
        line_colors: catalog.line_colors.clone(),
        stations: catalog.stations.clone(),
    }))
}

/// A validated nearest-station query.
struct NearestQuery {
    city: CityId,
    origin: LatLng,
    ranked: Vec<RankedStation>,
}

/// Validate the request and rank the city's stations.
fn rank_request(state: &AppState, req: &NearestRequest) -> Result<NearestQuery, AppError> {
    let city: CityId = req.city.as_deref().unwrap_or("seoul").parse()?;
    let origin = LatLng::new(req.lat, req.lng).map_err(DomainError::from)?;
    let k = match req.k {
        Some(k) => DomainError::check_count(k)?.min(MAX_NEAREST_COUNT),
        None => state.default_count,
    };

    let ranked = rank_nearest(origin, state.catalog.stations(city), k);

    Ok(NearestQuery {
        city,
        origin,
        ranked,
    })
}

/// Stations nearest to a point by straight-line distance.
async fn nearest(
    State(state): State<AppState>,
    req: Result<Query<NearestRequest>, QueryRejection>,
) -> Result<Json<NearestResponse>, AppError> {
    let Query(req) = req?;
    let query = rank_request(&state, &req)?;
    let catalog: &CityCatalog = state.catalog.city(query.city);

    let stations = query
        .ranked
        .iter()
        .map(|r| StationResult::from_ranked(r, catalog))
        .collect();

    Ok(Json(NearestResponse {
        city: query.city,
        origin: query.origin,
        stations,
    }))
}

/// Stations nearest to a point, with walking routes once every lookup
/// has resolved. Stations whose lookup failed carry no `walking` field.
async fn nearest_walking(
    State(state): State<AppState>,
    req: Result<Query<NearestRequest>, QueryRejection>,
) -> Result<Json<NearestWalkingResponse>, AppError> {
    let Query(req) = req?;
    let query = rank_request(&state, &req)?;
    let catalog = state.catalog.city(query.city);
    let locale = query.city.locale();

    // One selection per request; dropping the coordinator (e.g. when the
    // client disconnects) cancels its lookups.
    let coordinator = RouteCoordinator::with_shared(state.routing.clone());
    coordinator.select(Some(query.origin), query.ranked);
    let snapshot = coordinator.settled().await;

    let stations = snapshot
        .enriched_stations
        .iter()
        .map(|e| StationResult::from_enriched(e, catalog, locale))
        .collect();

    Ok(Json(NearestWalkingResponse {
        city: query.city,
        origin: query.origin,
        stations,
        routed_count: snapshot.routed_count(),
    }))
}

// Error handling

#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::UnknownCity(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = %status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::Station;
    use crate::routing::{FootRoutingClient, RoutingConfig};

    fn station(name: &str, line: &str, lat: f64, lng: f64) -> Station {
        Station {
            name: name.to_string(),
            name_en: None,
            line: line.to_string(),
            lat,
            lng,
        }
    }

    fn catalog() -> Catalog {
        let seoul = CityCatalog {
            line_colors: [("1".to_string(), "#0052A4".to_string())].into(),
            stations: vec![
                station("서울역", "1", 37.5547, 126.9707),
                station("시청", "1", 37.5657, 126.9769),
                station("종각", "1", 37.5702, 126.9831),
                station("강남", "2", 37.4979, 127.0276),
            ],
        };
        Catalog::from_cities([(CityId::Seoul, seoul)]).unwrap()
    }

    fn state_with_routing(base_url: &str) -> AppState {
        let routing =
            FootRoutingClient::new(RoutingConfig::new().with_base_url(base_url)).unwrap();
        AppState::new(catalog(), routing, 3)
    }

    fn state() -> AppState {
        state_with_routing("http://127.0.0.1:9")
    }

    fn request(lat: f64, lng: f64, k: Option<i64>) -> NearestRequest {
        NearestRequest {
            city: Some("seoul".into()),
            lat,
            lng,
            k,
        }
    }

    fn query(
        lat: f64,
        lng: f64,
        k: Option<i64>,
    ) -> Result<Query<NearestRequest>, QueryRejection> {
        Ok(Query(request(lat, lng, k)))
    }

    /// Serve a router on an ephemeral port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Mock routing service: every route is Ok except those ending at 강남.
    async fn serve_routes() -> String {
        let router = Router::new().route(
            "/foot/:coords",
            get(|Path(coords): Path<String>| async move {
                if coords.ends_with("127.0276,37.4979") {
                    return r#"{"code":"NoRoute","routes":[]}"#.to_string();
                }
                r#"{"code":"Ok","routes":[{"duration":600.0,"distance":800.0,
                    "geometry":{"coordinates":[[126.978,37.5665],[126.9769,37.5657]]}}]}"#
                    .to_string()
            }),
        );
        serve(router).await
    }

    /// Serve the application router over a test catalog.
    async fn serve_app(state: AppState) -> String {
        serve(create_router(state)).await
    }

    /// GET a path and return the status and parsed JSON body.
    async fn get_json(url: String) -> (StatusCode, serde_json::Value) {
        let resp = reqwest::get(url).await.unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(
            content_type.starts_with("application/json"),
            "expected JSON, got {content_type}"
        );
        (status, resp.json().await.unwrap())
    }

    #[tokio::test]
    async fn nearest_ranks_by_distance() {
        let Json(resp) = nearest(State(state()), query(37.5665, 126.978, Some(2)))
            .await
            .unwrap();

        assert_eq!(resp.city, CityId::Seoul);
        let names: Vec<_> = resp.stations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["시청", "종각"]);
        assert_eq!(resp.stations[0].line_color.as_deref(), Some("#0052A4"));
    }

    #[tokio::test]
    async fn nearest_uses_default_count() {
        let Json(resp) = nearest(State(state()), query(37.5665, 126.978, None))
            .await
            .unwrap();
        assert_eq!(resp.stations.len(), 3);
    }

    #[tokio::test]
    async fn nearest_zero_k_is_empty() {
        let Json(resp) = nearest(State(state()), query(37.5665, 126.978, Some(0)))
            .await
            .unwrap();
        assert!(resp.stations.is_empty());
    }

    #[tokio::test]
    async fn negative_k_is_bad_request() {
        let err = nearest(State(state()), query(37.5665, 126.978, Some(-1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn invalid_origin_is_bad_request() {
        let err = nearest(State(state()), query(95.0, 126.978, Some(3)))
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::BadRequest { ref message } if message.contains("latitude"))
        );
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let mut req = request(37.5665, 126.978, Some(3));
        req.city = Some("atlantis".into());
        let err = nearest(State(state()), Ok(Query(req))).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn city_without_data_is_empty() {
        let mut req = request(48.8566, 2.3522, Some(3));
        req.city = Some("paris".into());
        let Json(resp) = nearest(State(state()), Ok(Query(req))).await.unwrap();
        assert!(resp.stations.is_empty());
    }

    #[tokio::test]
    async fn lists_cities() {
        let Json(resp) = list_cities(State(state())).await;
        assert_eq!(resp.cities.len(), 6);
        assert_eq!(resp.cities[0].station_count, 4);
        assert_eq!(resp.cities[1].station_count, 0);
    }

    #[tokio::test]
    async fn city_stations_by_id() {
        let Json(resp) = city_stations(State(state()), Path("Seoul".into()))
            .await
            .unwrap();
        assert_eq!(resp.stations.len(), 4);
        assert_eq!(resp.line_colors.get("1").map(String::as_str), Some("#0052A4"));
    }

    #[tokio::test]
    async fn walking_enrichment_end_to_end() {
        let base = serve_routes().await;
        let state = state_with_routing(&base);

        // Four stations; the route to 강남 fails.
        let Json(resp) = nearest_walking(State(state), query(37.5665, 126.978, Some(4)))
            .await
            .unwrap();

        assert_eq!(resp.stations.len(), 4);
        assert_eq!(resp.routed_count, 3);

        let gangnam = resp.stations.iter().find(|s| s.name == "강남").unwrap();
        assert!(gangnam.walking.is_none());
        assert!(gangnam.distance > 0.0);

        let city_hall = &resp.stations[0];
        let walking = city_hall.walking.as_ref().unwrap();
        assert_eq!(walking.duration_label, "도보 10분");
        assert_eq!(walking.distance_label, "800m");
    }

    #[test]
    fn error_status_codes() {
        let resp = AppError::BadRequest {
            message: "bad".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::from(CatalogError::UnknownCity("x".into())).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::Internal {
            message: "boom".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn router_health() {
        let base = serve_app(state()).await;
        let resp = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn router_lists_cities() {
        let base = serve_app(state()).await;
        let (status, body) = get_json(format!("{base}/api/cities")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cities"].as_array().unwrap().len(), 6);
        assert_eq!(body["cities"][0]["id"], "seoul");
        assert_eq!(body["cities"][0]["stationCount"], 4);
    }

    #[tokio::test]
    async fn router_city_stations() {
        let base = serve_app(state()).await;

        let (status, body) = get_json(format!("{base}/api/cities/seoul/stations")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["city"], "seoul");
        assert_eq!(body["lineColors"]["1"], "#0052A4");
        assert_eq!(body["stations"].as_array().unwrap().len(), 4);

        let (status, body) = get_json(format!("{base}/api/cities/atlantis/stations")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("atlantis"));
    }

    #[tokio::test]
    async fn router_nearest() {
        let base = serve_app(state()).await;
        let (status, body) = get_json(format!(
            "{base}/api/nearest?city=seoul&lat=37.5665&lng=126.978&k=2"
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["origin"]["lat"], 37.5665);
        let stations = body["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0]["name"], "시청");
        assert_eq!(stations[0]["lineColor"], "#0052A4");
        assert!(stations[0].get("walking").is_none());
    }

    #[tokio::test]
    async fn router_nearest_defaults_to_seoul() {
        let base = serve_app(state()).await;
        let (status, body) = get_json(format!("{base}/api/nearest?lat=37.5665&lng=126.978")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["city"], "seoul");
        assert_eq!(body["stations"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn router_unparseable_query_is_json_error() {
        let base = serve_app(state()).await;

        let (status, body) = get_json(format!("{base}/api/nearest?lat=abc&lng=1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("deserialize"));

        let (status, body) = get_json(format!("{base}/api/nearest?lng=1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("lat"));

        let (status, body) = get_json(format!("{base}/api/nearest/walking?lat=1&lng=x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn router_invalid_values_are_json_errors() {
        let base = serve_app(state()).await;

        let (status, body) = get_json(format!("{base}/api/nearest?lat=37.5&lng=127&k=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = get_json(format!("{base}/api/nearest?lat=91&lng=127")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("latitude"));

        let (status, _) = get_json(format!("{base}/api/nearest?city=gotham&lat=1&lng=1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn router_nearest_walking() {
        let routing = serve_routes().await;
        let base = serve_app(state_with_routing(&routing)).await;

        let (status, body) = get_json(format!(
            "{base}/api/nearest/walking?city=seoul&lat=37.5665&lng=126.978&k=4"
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["routedCount"], 3);
        let stations = body["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 4);
        assert_eq!(stations[0]["walking"]["durationLabel"], "도보 10분");
        assert_eq!(stations[0]["walking"]["status"], "loaded");

        let gangnam = stations.iter().find(|s| s["name"] == "강남").unwrap();
        assert!(gangnam.get("walking").is_none());
    }

    #[tokio::test]
    async fn router_allows_cross_origin() {
        let base = serve_app(state()).await;
        let resp = reqwest::Client::new()
            .get(format!("{base}/api/cities"))
            .header(reqwest::header::ORIGIN, "http://map.example")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let allow = resp
            .headers()
            .get(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap();
        assert_eq!(allow, "*");
    }
}
