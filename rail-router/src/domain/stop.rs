//! Geocoded stop type.

use super::Coordinate;

/// A stop name resolved to a location.
///
/// Produced once per route request by the geocoder and never mutated
/// afterwards. Duplicate stop names yield independent values; position in
/// the enclosing list is what identifies a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedStop {
    /// Name reported by the place-search service, or the original name.
    pub name: String,

    /// The stop name exactly as supplied by the caller.
    pub original_name: String,

    /// Resolved location.
    pub coordinate: Coordinate,

    /// Full human-readable place description.
    pub display_name: String,

    /// Most specific settlement name available.
    pub city: Option<String>,

    /// Country name.
    pub country: Option<String>,
}

impl GeocodedStop {
    /// Create a stop with only the required fields set.
    pub fn new(original_name: impl Into<String>, coordinate: Coordinate) -> Self {
        let original_name = original_name.into();
        Self {
            name: original_name.clone(),
            display_name: original_name.clone(),
            original_name,
            coordinate,
            city: None,
            country: None,
        }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude()
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude()
    }

    /// "City, Country" style locality label, if anything is known.
    pub fn locality(&self) -> Option<String> {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => Some(format!("{city}, {country}")),
            (Some(city), None) => Some(city.clone()),
            (None, Some(country)) => Some(country.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> GeocodedStop {
        GeocodedStop::new("Győr", Coordinate::new(47.68, 17.64).unwrap())
    }

    #[test]
    fn new_copies_name_into_display_fields() {
        let s = stop();
        assert_eq!(s.name, "Győr");
        assert_eq!(s.original_name, "Győr");
        assert_eq!(s.display_name, "Győr");
        assert_eq!(s.latitude(), 47.68);
        assert_eq!(s.longitude(), 17.64);
    }

    #[test]
    fn locality_variants() {
        let mut s = stop();
        assert_eq!(s.locality(), None);

        s.country = Some("Magyarország".into());
        assert_eq!(s.locality().as_deref(), Some("Magyarország"));

        s.city = Some("Győr".into());
        assert_eq!(s.locality().as_deref(), Some("Győr, Magyarország"));

        s.country = None;
        assert_eq!(s.locality().as_deref(), Some("Győr"));
    }
}
