//! Geographic coordinate types.

use std::fmt;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Error returned when constructing a coordinate from unusable values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinate {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// Both components are finite and within their valid ranges. This type
/// guarantees that any `Coordinate` can be fed into distance calculations
/// without producing NaN.
///
/// # Examples
///
/// ```
/// use rail_router::domain::Coordinate;
///
/// let budapest = Coordinate::new(47.50, 19.08).unwrap();
/// assert_eq!(budapest.latitude(), 47.50);
///
/// // Non-finite values are rejected
/// assert!(Coordinate::new(f64::NAN, 19.08).is_err());
///
/// // Out-of-range values are rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, validating both components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let invalid = |reason| InvalidCoordinate {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("components must be finite numbers"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another coordinate, in meters (haversine).
    pub fn haversine_meters(&self, other: &Coordinate) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_METERS * c
    }

    /// Returns the coordinate as a `[lat, lon]` pair.
    pub fn as_pair(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// The smallest box containing every coordinate.
    ///
    /// Returns `None` for an empty input.
    pub fn covering<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = iter.next()?;

        let init = BoundingBox {
            min_lat: first.latitude,
            min_lon: first.longitude,
            max_lat: first.latitude,
            max_lon: first.longitude,
        };

        Some(iter.fold(init, |b, c| BoundingBox {
            min_lat: b.min_lat.min(c.latitude),
            min_lon: b.min_lon.min(c.longitude),
            max_lat: b.max_lat.max(c.latitude),
            max_lon: b.max_lon.max(c.longitude),
        }))
    }

    /// Whether a coordinate lies inside the box (edges inclusive).
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.latitude)
            && (self.min_lon..=self.max_lon).contains(&coord.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn accepts_valid_coordinates() {
        assert!(Coordinate::new(0.0, 0.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(47.4979, 19.0402).is_ok());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
        assert!(Coordinate::new(f64::INFINITY, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.1).is_err());
        assert!(Coordinate::new(0.0, -200.0).is_err());
    }

    #[test]
    fn error_display() {
        let err = Coordinate::new(f64::NAN, 1.0).unwrap_err();
        assert!(err.to_string().contains("must be finite"));

        let err = Coordinate::new(95.0, 1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinate (95, 1): latitude must be within [-90, 90]"
        );
    }

    #[test]
    fn haversine_budapest_gyor() {
        let budapest = coord(47.50, 19.08);
        let gyor = coord(47.68, 17.64);

        let d = budapest.haversine_meters(&gyor);

        // Roughly 110 km as the crow flies
        assert!(d > 105_000.0 && d < 115_000.0, "got {d}");
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let a = coord(0.0, 0.0);
        let b = coord(1.0, 0.0);
        let expected = EARTH_RADIUS_METERS * 1.0_f64.to_radians();
        assert!((a.haversine_meters(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn bounding_box_covers_all() {
        let coords = [coord(47.5, 19.08), coord(47.68, 17.64), coord(46.25, 20.15)];
        let bbox = BoundingBox::covering(&coords).unwrap();

        assert_eq!(bbox.min_lat, 46.25);
        assert_eq!(bbox.max_lat, 47.68);
        assert_eq!(bbox.min_lon, 17.64);
        assert_eq!(bbox.max_lon, 20.15);
        assert!(coords.iter().all(|c| bbox.contains(c)));
    }

    #[test]
    fn bounding_box_of_single_point_is_degenerate() {
        let c = coord(47.5, 19.08);
        let bbox = BoundingBox::covering([&c]).unwrap();
        assert_eq!(bbox.min_lat, bbox.max_lat);
        assert_eq!(bbox.min_lon, bbox.max_lon);
    }

    #[test]
    fn bounding_box_of_nothing() {
        let empty: [Coordinate; 0] = [];
        assert!(BoundingBox::covering(&empty).is_none());
    }

    #[test]
    fn display_and_debug() {
        let c = coord(47.5, 19.25);
        assert_eq!(format!("{c}"), "47.5, 19.25");
        assert_eq!(format!("{c:?}"), "Coordinate(47.5, 19.25)");
    }
}
