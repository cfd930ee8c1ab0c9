//! Nearest-vertex lookup.

use crate::domain::Coordinate;

use super::rail_graph::{RailGraph, VertexId};

/// Find the graph vertex closest to `point` by great-circle distance.
///
/// Linear scan over every vertex. Ties break on the smaller vertex ID so the
/// result does not depend on hash map iteration order. Returns `None` for an
/// empty graph.
pub fn nearest_vertex(graph: &RailGraph, point: &Coordinate) -> Option<VertexId> {
    graph
        .vertices()
        .map(|v| (point.haversine_meters(&v.coordinate), v.id))
        .min_by(|(da, ia), (db, ib)| da.total_cmp(db).then(ia.cmp(ib)))
        .map(|(_, id)| id)
}
