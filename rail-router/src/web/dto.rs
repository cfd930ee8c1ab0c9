//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{GeocodedStop, LegMethod, LegReport, RouteGeometry, straight_line_distance};
use crate::geocoder::GeocodeResult;
use crate::route::RoutePlan;

/// Query for a single stop lookup.
#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    /// Stop name
    pub q: String,
}

/// Request to build a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Stop names in travel order
    pub stops: Vec<String>,
}

/// A resolved stop.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub original_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    /// "City, Country" label, if anything is known
    pub locality: Option<String>,
}

/// A requested stop annotated with what it resolved to.
#[derive(Debug, Serialize)]
pub struct ItineraryEntry {
    /// Stop name as requested
    pub stop: String,
    /// Whether the stop was resolved
    pub matched: bool,
    /// Name reported by the place-search service
    pub name: Option<String>,
    /// "City, Country" label of the resolved place
    pub locality: Option<String>,
}

/// Outcome of one leg.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from_index: usize,
    pub to_index: usize,
    /// `track` or `straight_line`
    pub method: &'static str,
    pub distance_meters: f64,
}

/// Route geometry.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// `[lat, lon]` pairs
    pub coordinates: Vec<[f64; 2]>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
    pub legs: Vec<LegResult>,
}

/// Display-ready summary of a route.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    /// Number of resolved stops
    pub stop_count: usize,

    /// Route distance, or the straight-line distance when the route has none
    pub distance_km: Option<f64>,

    /// e.g. "109.8 km", or "N/A"
    pub distance_display: String,

    /// Whether `distance_km` came from the straight-line estimate
    pub distance_is_estimate: bool,
}

/// Response for a route request.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Requested stops in request order
    pub itinerary: Vec<ItineraryEntry>,
    pub stations: Vec<StationResult>,
    pub unmatched: Vec<String>,
    pub route: RouteResult,
    pub summary: RouteSummary,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&GeocodedStop> for StationResult {
    fn from(stop: &GeocodedStop) -> Self {
        Self {
            name: stop.name.clone(),
            original_name: stop.original_name.clone(),
            latitude: stop.latitude(),
            longitude: stop.longitude(),
            display_name: stop.display_name.clone(),
            city: stop.city.clone(),
            country: stop.country.clone(),
            locality: stop.locality(),
        }
    }
}

impl From<&LegReport> for LegResult {
    fn from(leg: &LegReport) -> Self {
        Self {
            from_index: leg.from_index,
            to_index: leg.to_index,
            method: match leg.method {
                LegMethod::Track => "track",
                LegMethod::StraightLine => "straight_line",
            },
            distance_meters: leg.distance_meters,
        }
    }
}

impl From<&RouteGeometry> for RouteResult {
    fn from(route: &RouteGeometry) -> Self {
        Self {
            coordinates: route.coordinates.iter().map(|c| c.as_pair()).collect(),
            distance_meters: route.distance_meters,
            duration_seconds: route.duration_seconds,
            legs: route.legs.iter().map(LegResult::from).collect(),
        }
    }
}

/// Format a distance in kilometres to one decimal place.
pub fn format_distance_km(km: Option<f64>) -> String {
    match km {
        Some(km) => format!("{km:.1} km"),
        None => "N/A".to_string(),
    }
}

impl RouteSummary {
    /// Summarise a route through `stations`.
    pub fn new(stations: &[GeocodedStop], route: &RouteGeometry) -> Self {
        let (meters, is_estimate) = match route.distance_meters {
            Some(m) => (Some(m), false),
            None => {
                let estimate = straight_line_distance(stations);
                (estimate, estimate.is_some())
            }
        };
        let distance_km = meters.map(|m| m / 1000.0);

        Self {
            stop_count: stations.len(),
            distance_km,
            distance_display: format_distance_km(distance_km),
            distance_is_estimate: is_estimate,
        }
    }
}

impl ItineraryEntry {
    /// Annotate a requested stop from the geocoding outcome.
    pub fn new(stop: &str, geocode: &GeocodeResult) -> Self {
        let found = geocode.find(stop);
        Self {
            stop: stop.to_string(),
            matched: found.is_some(),
            name: found.map(|s| s.name.clone()),
            locality: found.and_then(GeocodedStop::locality),
        }
    }
}

impl RouteResponse {
    /// Build the response for a plan made from `stops`.
    pub fn new(stops: &[String], plan: &RoutePlan) -> Self {
        let stations = &plan.geocode.stations;
        Self {
            itinerary: stops
                .iter()
                .map(|stop| ItineraryEntry::new(stop, &plan.geocode))
                .collect(),
            stations: stations.iter().map(StationResult::from).collect(),
            unmatched: plan.geocode.unmatched.clone(),
            route: RouteResult::from(&plan.route),
            summary: RouteSummary::new(stations, &plan.route),
        }
    }
}
