//! Route geometry produced by the route builder.

use super::{Coordinate, GeocodedStop};

/// How a single leg between two consecutive stops was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegMethod {
    /// Shortest path along the rail graph.
    Track,
    /// Straight great-circle segment between the two stops.
    StraightLine,
}

/// Outcome of routing one leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegReport {
    /// Index of the departing stop in the geocoded stop list.
    pub from_index: usize,
    /// Index of the arriving stop in the geocoded stop list.
    pub to_index: usize,
    pub method: LegMethod,
    /// Track length (sum of edge weights) or straight-line distance.
    pub distance_meters: f64,
}

/// A drawable route through a sequence of stops.
///
/// `distance_meters` is `None` when the whole route degraded to the
/// straight-line polyline; `duration_seconds` is never computed here.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    pub coordinates: Vec<Coordinate>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
    /// Per-leg outcomes. Empty for the whole-route fallback.
    pub legs: Vec<LegReport>,
}

impl RouteGeometry {
    /// Straight polyline through every stop, with no distance.
    pub fn straight_line(stops: &[GeocodedStop]) -> Self {
        Self {
            coordinates: stops.iter().map(|s| s.coordinate).collect(),
            distance_meters: None,
            duration_seconds: None,
            legs: Vec::new(),
        }
    }

    /// Whether any leg was routed along track.
    pub fn follows_track(&self) -> bool {
        self.legs.iter().any(|l| l.method == LegMethod::Track)
    }

    /// Number of legs that fell back to a straight segment.
    pub fn fallback_leg_count(&self) -> usize {
        self.legs
            .iter()
            .filter(|l| l.method == LegMethod::StraightLine)
            .count()
    }
}

/// Sum of great-circle distances between consecutive stops.
///
/// Returns `None` for fewer than two stops.
pub fn straight_line_distance(stops: &[GeocodedStop]) -> Option<f64> {
    if stops.len() < 2 {
        return None;
    }
    Some(
        stops
            .windows(2)
            .map(|pair| pair[0].coordinate.haversine_meters(&pair[1].coordinate))
            .sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str, lat: f64, lon: f64) -> GeocodedStop {
        GeocodedStop::new(name, Coordinate::new(lat, lon).unwrap())
    }

    #[test]
    fn straight_line_keeps_order_and_duplicates() {
        let stops = vec![
            stop("Budapest", 47.50, 19.08),
            stop("Győr", 47.68, 17.64),
            stop("Budapest", 47.50, 19.08),
        ];
        let route = RouteGeometry::straight_line(&stops);

        assert_eq!(route.coordinates.len(), 3);
        assert_eq!(route.coordinates[0], route.coordinates[2]);
        assert_eq!(route.distance_meters, None);
        assert_eq!(route.duration_seconds, None);
        assert!(route.legs.is_empty());
        assert!(!route.follows_track());
    }

    #[test]
    fn straight_line_distance_needs_two_stops() {
        assert_eq!(straight_line_distance(&[]), None);
        assert_eq!(straight_line_distance(&[stop("A", 47.5, 19.08)]), None);
    }

    #[test]
    fn straight_line_distance_sums_legs() {
        let stops = vec![
            stop("Budapest", 47.50, 19.08),
            stop("Győr", 47.68, 17.64),
            stop("Budapest", 47.50, 19.08),
        ];
        let one_way = stops[0].coordinate.haversine_meters(&stops[1].coordinate);
        let total = straight_line_distance(&stops).unwrap();
        assert!((total - 2.0 * one_way).abs() < 1e-6);
    }

    #[test]
    fn fallback_leg_count() {
        let route = RouteGeometry {
            coordinates: vec![],
            distance_meters: Some(0.0),
            duration_seconds: None,
            legs: vec![
                LegReport {
                    from_index: 0,
                    to_index: 1,
                    method: LegMethod::Track,
                    distance_meters: 10.0,
                },
                LegReport {
                    from_index: 1,
                    to_index: 2,
                    method: LegMethod::StraightLine,
                    distance_meters: 5.0,
                },
            ],
        };
        assert!(route.follows_track());
        assert_eq!(route.fallback_leg_count(), 1);
    }
}
