//! Undirected weighted graph of rail track.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::Coordinate;
use crate::overpass::OverpassElement;

/// Provider-assigned vertex identifier (an OSM node ID).
pub type VertexId = i64;

/// A point on the track network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub coordinate: Coordinate,
}

/// Half of an undirected edge, stored in the adjacency list of its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: VertexId,
    pub distance_meters: f64,
}

/// Rail network graph scoped to a single route request.
///
/// Edges are symmetric: `add_edge(a, b, d)` makes `b` reachable from `a` and
/// `a` reachable from `b`, both with weight `d`.
#[derive(Debug, Clone, Default)]
pub struct RailGraph {
    vertices: HashMap<VertexId, Vertex>,
    adjacency: HashMap<VertexId, Vec<Edge>>,
    edge_count: usize,
}

impl RailGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from Overpass elements.
    ///
    /// Every node becomes a vertex. Each consecutive pair of node references
    /// along a way becomes an edge weighted by great-circle distance. Pairs
    /// that reference a missing node are skipped, as are nodes whose
    /// coordinates are unusable.
    pub fn from_elements(elements: &[OverpassElement]) -> Self {
        let mut graph = Self::new();
        let mut rejected_nodes = 0usize;
        let mut skipped_pairs = 0usize;

        for element in elements {
            if let OverpassElement::Node { id, lat, lon } = element {
                match Coordinate::new(*lat, *lon) {
                    Ok(coordinate) => graph.add_vertex(*id, coordinate),
                    Err(e) => {
                        trace!(node = id, error = %e, "dropping node");
                        rejected_nodes += 1;
                    }
                }
            }
        }

        for element in elements {
            let OverpassElement::Way { nodes, .. } = element else {
                continue;
            };

            for pair in nodes.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let (Some(va), Some(vb)) = (graph.vertices.get(&a), graph.vertices.get(&b)) else {
                    skipped_pairs += 1;
                    continue;
                };
                let distance = va.coordinate.haversine_meters(&vb.coordinate);
                graph.add_edge(a, b, distance);
            }
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            rejected_nodes,
            skipped_pairs,
            "built rail graph"
        );

        graph
    }

    /// Insert or replace a vertex.
    pub fn add_vertex(&mut self, id: VertexId, coordinate: Coordinate) {
        self.vertices.insert(id, Vertex { id, coordinate });
    }

    /// Add an undirected edge between two vertices.
    ///
    /// Both endpoints should already be vertices; edges to unknown IDs are
    /// stored but can never be reached by the snapper.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, distance_meters: f64) {
        self.adjacency.entry(a).or_default().push(Edge {
            to: b,
            distance_meters,
        });
        self.adjacency.entry(b).or_default().push(Edge {
            to: a,
            distance_meters,
        });
        self.edge_count += 1;
    }

    /// Look up a vertex.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Whether the graph contains a vertex.
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Iterate over all vertices in unspecified order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Edges leaving a vertex, in insertion order.
    pub fn neighbors(&self, id: VertexId) -> &[Edge] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Sum of edge weights along consecutive vertices of `path`.
    ///
    /// Between two vertices joined by parallel edges the cheapest one counts,
    /// matching what [`shortest_path`](super::shortest_path) traverses.
    /// Consecutive vertices with no edge between them contribute nothing.
    pub fn path_length(&self, path: &[VertexId]) -> f64 {
        path.windows(2)
            .filter_map(|pair| {
                self.neighbors(pair[0])
                    .iter()
                    .filter(|e| e.to == pair[1])
                    .map(|e| e.distance_meters)
                    .min_by(f64::total_cmp)
            })
            .sum()
    }
}
