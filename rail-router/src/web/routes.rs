//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::geocoder::{GeocodeError, Geocoder};
use crate::overpass::RailNetworkProvider;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<G, R>(state: AppState<G, R>) -> Router
where
    G: Geocoder + Send + Sync + 'static,
    R: RailNetworkProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/geocode", get(geocode_stop::<G, R>))
        .route("/route", post(plan_route::<G, R>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve a single stop name.
async fn geocode_stop<G, R>(
    State(state): State<AppState<G, R>>,
    Query(req): Query<GeocodeRequest>,
) -> Result<Json<StationResult>, AppError>
where
    G: Geocoder + Send + Sync + 'static,
    R: RailNetworkProvider + Send + Sync + 'static,
{
    let q = req.q.trim();
    if q.is_empty() {
        return Err(AppError::BadRequest {
            message: "Query must not be empty".to_string(),
        });
    }

    let stop = state
        .builder
        .geocoder()
        .geocode(q)
        .await
        .map_err(AppError::from)?;

    Ok(Json(StationResult::from(&stop)))
}

/// Geocode a stop list and draw a route through it.
async fn plan_route<G, R>(
    State(state): State<AppState<G, R>>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError>
where
    G: Geocoder + Send + Sync + 'static,
    R: RailNetworkProvider + Send + Sync + 'static,
{
    if req.stops.is_empty() {
        return Err(AppError::BadRequest {
            message: "At least one stop is required".to_string(),
        });
    }

    let plan = state.builder.plan(&req.stops).await;

    Ok(Json(RouteResponse::new(&req.stops, &plan)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::NoMatch { .. } | GeocodeError::Unusable(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Upstream {
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
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{BoundingBox, Coordinate, GeocodedStop};
    use crate::overpass::{OverpassElement, OverpassError, OverpassResponse};
    use crate::route::RouteBuilder;
    use crate::test_support::serve;

    struct FakeGeocoder;

    impl Geocoder for FakeGeocoder {
        async fn geocode(&self, stop: &str) -> Result<GeocodedStop, GeocodeError> {
            let (lat, lon) = match stop {
                "Budapest" => (47.50, 19.08),
                "Győr" => (47.68, 17.64),
                "Down" => return Err(GeocodeError::RateLimited),
                _ => {
                    return Err(GeocodeError::NoMatch {
                        query: stop.to_string(),
                    });
                }
            };
            let mut place = GeocodedStop::new(stop, Coordinate::new(lat, lon).unwrap());
            place.country = Some("Magyarország".to_string());
            Ok(place)
        }
    }

    /// Rail network source that is always unavailable.
    struct NoNetwork;

    impl RailNetworkProvider for NoNetwork {
        async fn fetch_rail_network(
            &self,
            _bbox: &BoundingBox,
        ) -> Result<OverpassResponse, OverpassError> {
            Err(OverpassError::RateLimited)
        }
    }

    /// A single straight piece of track between the two cities.
    struct DirectLine;

    impl RailNetworkProvider for DirectLine {
        async fn fetch_rail_network(
            &self,
            _bbox: &BoundingBox,
        ) -> Result<OverpassResponse, OverpassError> {
            Ok(OverpassResponse {
                elements: vec![
                    OverpassElement::Node { id: 1, lat: 47.50, lon: 19.08 },
                    OverpassElement::Node { id: 2, lat: 47.68, lon: 17.64 },
                    OverpassElement::Way {
                        id: 10,
                        nodes: vec![1, 2],
                        tags: None,
                        geometry: None,
                    },
                ],
                remark: None,
            })
        }
    }

    async fn server<R>(network: R) -> String
    where
        R: RailNetworkProvider + Send + Sync + 'static,
    {
        let state = AppState::new(RouteBuilder::new(FakeGeocoder, network));
        serve(create_router(state)).await
    }

    async fn post_route(base: &str, body: Value) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(format!("{base}/route"))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let base = server(NoNetwork).await;
        let body = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn geocode_returns_station() {
        let base = server(NoNetwork).await;

        let response = reqwest::get(format!("{base}/geocode?q=Budapest")).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["original_name"], "Budapest");
        assert_eq!(body["latitude"], 47.5);
        assert_eq!(body["country"], "Magyarország");
    }

    #[tokio::test]
    async fn geocode_unknown_is_not_found() {
        let base = server(NoNetwork).await;

        let response = reqwest::get(format!("{base}/geocode?q=Atlantis")).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);

        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("Atlantis"));
    }

    #[tokio::test]
    async fn geocode_upstream_failure_is_bad_gateway() {
        let base = server(NoNetwork).await;
        let response = reqwest::get(format!("{base}/geocode?q=Down")).await.unwrap();
        assert_eq!(response.status().as_u16(), 502);
    }

    #[tokio::test]
    async fn geocode_blank_query_is_bad_request() {
        let base = server(NoNetwork).await;
        let response = reqwest::get(format!("{base}/geocode?q=%20")).await.unwrap();
        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn route_follows_track() {
        let base = server(DirectLine).await;

        let (status, body) = post_route(&base, json!({ "stops": ["Budapest", "Győr"] })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"]["coordinates"].as_array().unwrap().len(), 2);
        assert_eq!(body["route"]["legs"][0]["method"], "track");
        assert!(body["route"]["distance_meters"].is_number());
        assert!(body["route"]["duration_seconds"].is_null());
        assert_eq!(body["summary"]["distance_is_estimate"], false);
    }

    #[tokio::test]
    async fn route_falls_back_and_estimates_distance() {
        let base = server(NoNetwork).await;

        let (status, body) =
            post_route(&base, json!({ "stops": ["Budapest", "Atlantis", "Győr"] })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["unmatched"], json!(["Atlantis"]));
        assert_eq!(body["stations"].as_array().unwrap().len(), 2);
        assert!(body["route"]["distance_meters"].is_null());
        assert_eq!(body["summary"]["stop_count"], 2);
        assert_eq!(body["summary"]["distance_is_estimate"], true);

        let itinerary = body["itinerary"].as_array().unwrap();
        assert_eq!(itinerary.len(), 3);
        assert_eq!(itinerary[0]["locality"], "Magyarország");
        assert_eq!(itinerary[1]["stop"], "Atlantis");
        assert_eq!(itinerary[1]["matched"], false);
        assert!(itinerary[1]["locality"].is_null());
        assert!(body["summary"]["distance_display"].as_str().unwrap().ends_with(" km"));
    }

    #[tokio::test]
    async fn route_with_no_matches_is_empty_not_error() {
        let base = server(NoNetwork).await;

        let (status, body) = post_route(&base, json!({ "stops": ["Atlantis"] })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"]["coordinates"], json!([]));
        assert_eq!(body["summary"]["distance_display"], "N/A");
    }

    #[tokio::test]
    async fn empty_stop_list_is_bad_request() {
        let base = server(NoNetwork).await;

        let (status, body) = post_route(&base, json!({ "stops": [] })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
