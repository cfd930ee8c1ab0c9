//! End-to-end route construction with fallback.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{BoundingBox, GeocodedStop, RouteGeometry};
use crate::geocoder::{GeocodeResult, Geocoder, geocode_stops};
use crate::graph::RailGraph;
use crate::overpass::{OverpassError, RailNetworkProvider};

use super::assembly::assemble_route;

/// Reasons the track graph could not be used for a route.
///
/// These never leave [`RouteBuilder::build_route`]; each one turns into the
/// straight-line route.
#[derive(Debug, Error)]
pub(crate) enum RouteError {
    #[error("no stops to cover")]
    NoStops,

    #[error("rail network fetch failed: {0}")]
    Fetch(#[from] OverpassError),

    #[error("rail network is empty inside {bbox:?}")]
    EmptyGraph { bbox: BoundingBox },
}

/// Geocoding outcome plus the route drawn through the matched stops.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub geocode: GeocodeResult,
    pub route: RouteGeometry,
}

/// Builds routes from stop names using a geocoder and a rail network source.
#[derive(Debug, Clone)]
pub struct RouteBuilder<G, R> {
    geocoder: G,
    network: R,
}

impl<G, R> RouteBuilder<G, R>
where
    G: Geocoder + Sync,
    R: RailNetworkProvider + Sync,
{
    /// Create a builder from its two providers.
    pub fn new(geocoder: G, network: R) -> Self {
        Self { geocoder, network }
    }

    /// The geocoder this builder resolves stops with.
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Geocode `stops` and build a route through the ones that resolved.
    pub async fn plan(&self, stops: &[String]) -> RoutePlan {
        let geocode = geocode_stops(&self.geocoder, stops).await;
        let route = self.build_route(&geocode.stations).await;
        RoutePlan { geocode, route }
    }

    /// Build a route through already-geocoded stations.
    ///
    /// Never fails. With fewer than two stations, when the rail network
    /// cannot be fetched or is empty, or if construction panics, the result
    /// is the straight polyline through `stations` with no distance.
    pub async fn build_route(&self, stations: &[GeocodedStop]) -> RouteGeometry {
        if stations.len() < 2 {
            return RouteGeometry::straight_line(stations);
        }

        let attempt = AssertUnwindSafe(self.try_build_route(stations))
            .catch_unwind()
            .await;

        match attempt {
            Ok(Ok(route)) => {
                info!(
                    stops = stations.len(),
                    points = route.coordinates.len(),
                    fallback_legs = route.fallback_leg_count(),
                    distance_meters = route.distance_meters,
                    "route built"
                );
                route
            }
            Ok(Err(e)) => {
                warn!(error = %e, "using straight-line route");
                RouteGeometry::straight_line(stations)
            }
            Err(_) => {
                error!(stops = stations.len(), "route construction panicked; using straight-line route");
                RouteGeometry::straight_line(stations)
            }
        }
    }

    async fn try_build_route(&self, stations: &[GeocodedStop]) -> Result<RouteGeometry, RouteError> {
        let bbox = BoundingBox::covering(stations.iter().map(|s| &s.coordinate))
            .ok_or(RouteError::NoStops)?;

        let response = self.network.fetch_rail_network(&bbox).await?;

        let graph = RailGraph::from_elements(&response.elements);
        if graph.is_empty() {
            return Err(RouteError::EmptyGraph { bbox });
        }

        Ok(assemble_route(&graph, stations))
    }
}
