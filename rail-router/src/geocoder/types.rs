//! Place-search API response DTOs.
//!
//! These map onto the Nominatim `/search?format=json` response. Coordinates
//! arrive as decimal strings; everything except the coordinates and the
//! display name is optional.

use serde::Deserialize;

/// One ranked match from a place search.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    /// Latitude as a decimal string.
    pub lat: String,

    /// Longitude as a decimal string.
    pub lon: String,

    /// Full comma-separated description of the place.
    pub display_name: String,

    /// Short name of the place, when the service has one.
    pub name: Option<String>,

    /// Structured address, present when `addressdetails=1` was requested.
    pub address: Option<NominatimAddress>,
}

/// Structured address fields, most specific first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub county: Option<String>,
    pub country: Option<String>,
}
