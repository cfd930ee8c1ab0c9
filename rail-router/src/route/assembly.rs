//! Leg-by-leg route assembly over a built graph.

use tracing::debug;

use crate::domain::{Coordinate, GeocodedStop, LegMethod, LegReport, RouteGeometry};
use crate::graph::{RailGraph, nearest_vertex, shortest_path};

/// Polyline under construction that drops a point equal to the one before it.
#[derive(Debug, Default)]
struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    fn push(&mut self, point: Coordinate) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }
}

/// Route a single leg along track, if the graph allows it.
///
/// Returns the vertex coordinates of the path and its length, or `None` when
/// either stop cannot be snapped or the snapped vertices are not connected.
fn track_leg(
    graph: &RailGraph,
    from: &GeocodedStop,
    to: &GeocodedStop,
) -> Option<(Vec<Coordinate>, f64)> {
    let start = nearest_vertex(graph, &from.coordinate)?;
    let goal = nearest_vertex(graph, &to.coordinate)?;

    let path = shortest_path(graph, start, goal);
    if path.is_empty() {
        return None;
    }

    let points = path
        .iter()
        .filter_map(|id| graph.vertex(*id).map(|v| v.coordinate))
        .collect();
    Some((points, graph.path_length(&path)))
}

/// Assemble a route through `stations` over `graph`.
///
/// Each consecutive pair is routed along track where possible and drawn as a
/// straight segment otherwise; straight segments contribute their
/// great-circle length to the total. Fewer than two stations, or an assembly
/// that yields no points, produce the straight-line route with no distance.
pub fn assemble_route(graph: &RailGraph, stations: &[GeocodedStop]) -> RouteGeometry {
    if stations.len() < 2 {
        return RouteGeometry::straight_line(stations);
    }

    let mut line = Polyline::default();
    let mut legs = Vec::with_capacity(stations.len() - 1);
    let mut total = 0.0;

    for (index, pair) in stations.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);

        let (method, distance) = match track_leg(graph, from, to) {
            Some((points, distance)) => {
                for point in points {
                    line.push(point);
                }
                (LegMethod::Track, distance)
            }
            None => {
                debug!(
                    from = %from.original_name,
                    to = %to.original_name,
                    "no track path; drawing straight segment"
                );
                line.push(from.coordinate);
                line.push(to.coordinate);
                (
                    LegMethod::StraightLine,
                    from.coordinate.haversine_meters(&to.coordinate),
                )
            }
        };

        total += distance;
        legs.push(LegReport {
            from_index: index,
            to_index: index + 1,
            method,
            distance_meters: distance,
        });
    }

    if line.points.is_empty() {
        return RouteGeometry::straight_line(stations);
    }

    RouteGeometry {
        coordinates: line.points,
        distance_meters: Some(total),
        duration_seconds: None,
        legs,
    }
}
