//! Concurrent geocoding of a stop list.

use futures::future::join_all;
use tracing::{debug, info};

use crate::domain::GeocodedStop;

use super::Geocoder;

/// Matched/unmatched partition of a stop list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodeResult {
    /// Resolved stops, in input order.
    pub stations: Vec<GeocodedStop>,
    /// Stop names that could not be resolved, verbatim and in input order.
    pub unmatched: Vec<String>,
}

impl GeocodeResult {
    /// Find the resolved stop for a name, ignoring case.
    ///
    /// Matches on the caller-supplied name first, then on the name the
    /// place-search service reported. With duplicate names the first
    /// occurrence wins.
    pub fn find(&self, stop: &str) -> Option<&GeocodedStop> {
        let wanted = stop.to_lowercase();
        self.stations
            .iter()
            .find(|s| s.original_name.to_lowercase() == wanted)
            .or_else(|| self.stations.iter().find(|s| s.name.to_lowercase() == wanted))
    }

    /// Whether every stop was resolved.
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Resolve every stop name concurrently.
///
/// All lookups are started together and awaited together. A failed lookup
/// only affects its own stop, which is recorded in `unmatched`.
pub async fn geocode_stops<G: Geocoder>(geocoder: &G, stops: &[String]) -> GeocodeResult {
    let lookups = stops.iter().map(|stop| async move {
        let result = geocoder.geocode(stop).await;
        (stop, result)
    });

    let results = join_all(lookups).await;

    let mut out = GeocodeResult::default();
    for (stop, result) in results {
        match result {
            Ok(station) => out.stations.push(station),
            Err(e) => {
                debug!(stop = %stop, error = %e, "stop could not be geocoded");
                out.unmatched.push(stop.clone());
            }
        }
    }

    info!(
        requested = stops.len(),
        matched = out.stations.len(),
        unmatched = out.unmatched.len(),
        "geocoding complete"
    );

    out
}
