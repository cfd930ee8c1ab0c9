//! Conversion from place-search DTOs to domain types.

use crate::domain::{Coordinate, GeocodedStop};

use super::types::{NominatimAddress, NominatimPlace};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// A coordinate string could not be parsed as a number
    #[error("unparsable {field}: {value:?}")]
    UnparsableNumber { field: &'static str, value: String },

    /// The parsed coordinate is not usable
    #[error(transparent)]
    InvalidCoordinate(#[from] crate::domain::InvalidCoordinate),
}

/// Convert the top-ranked place for `stop` into a geocoded stop.
///
/// Rejects places whose coordinates are missing, non-numeric, non-finite
/// or out of range.
pub fn convert_place(place: &NominatimPlace, stop: &str) -> Result<GeocodedStop, ConversionError> {
    let latitude = parse_degrees("lat", &place.lat)?;
    let longitude = parse_degrees("lon", &place.lon)?;
    let coordinate = Coordinate::new(latitude, longitude)?;

    let name = place
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(stop)
        .to_string();

    let address = place.address.as_ref();

    Ok(GeocodedStop {
        name,
        original_name: stop.to_string(),
        coordinate,
        display_name: place.display_name.clone(),
        city: address.and_then(most_specific_settlement),
        country: address.and_then(|a| a.country.clone()),
    })
}

fn parse_degrees(field: &'static str, value: &str) -> Result<f64, ConversionError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ConversionError::UnparsableNumber {
            field,
            value: value.to_string(),
        })
}

/// city > town > village > municipality > county
fn most_specific_settlement(address: &NominatimAddress) -> Option<String> {
    [
        &address.city,
        &address.town,
        &address.village,
        &address.municipality,
        &address.county,
    ]
    .into_iter()
    .find_map(|field| field.clone())
}
