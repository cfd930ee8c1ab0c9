//! Stop-name geocoding.
//!
//! Resolves free-text stop names to coordinates through a Nominatim-style
//! place-search service. Each name is looked up on its own; a failure for one
//! name never affects the others.

mod batch;
mod client;
mod convert;
mod error;
mod types;

use std::future::Future;

use crate::domain::GeocodedStop;

pub use batch::{GeocodeResult, geocode_stops};
pub use client::{NominatimClient, NominatimConfig};
pub use convert::{ConversionError, convert_place};
pub use error::GeocodeError;
pub use types::{NominatimAddress, NominatimPlace};

/// Trait for resolving a single stop name.
///
/// This abstraction allows the route builder to be tested without network
/// access.
pub trait Geocoder {
    /// Resolve `stop` to its best-matching location.
    fn geocode(&self, stop: &str)
    -> impl Future<Output = Result<GeocodedStop, GeocodeError>> + Send;
}
