//! Rail network graph, nearest-vertex snapping, and shortest paths.
//!
//! A graph is built fresh for every route request from the Overpass
//! response and discarded afterwards.

mod dijkstra;
mod rail_graph;
mod snap;

pub use dijkstra::shortest_path;
pub use rail_graph::{Edge, RailGraph, Vertex, VertexId};
pub use snap::nearest_vertex;
