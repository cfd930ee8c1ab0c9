//! Single-pair shortest paths over the rail graph.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::rail_graph::{RailGraph, VertexId};

/// Entry in the frontier. Ordered so that `BinaryHeap` pops the smallest
/// cost first, then the smallest vertex ID.
#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    vertex: VertexId,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Minimum-weight path from `start` to `goal`, inclusive of both ends.
///
/// Returns:
/// - `[start]` when `start == goal` and the vertex exists
/// - an empty vec when either endpoint is missing or `goal` is unreachable
///
/// Stale heap entries are skipped on pop rather than decreased in place, and
/// the search stops as soon as `goal` is settled.
pub fn shortest_path(graph: &RailGraph, start: VertexId, goal: VertexId) -> Vec<VertexId> {
    if !graph.contains(start) || !graph.contains(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let mut dist: HashMap<VertexId, f64> = HashMap::new();
    let mut prev: HashMap<VertexId, VertexId> = HashMap::new();
    let mut settled: HashSet<VertexId> = HashSet::new();
    let mut heap = BinaryHeap::new();

    dist.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        vertex: start,
    });

    while let Some(State { cost, vertex }) = heap.pop() {
        if !settled.insert(vertex) {
            continue;
        }
        if vertex == goal {
            return reconstruct(&prev, start, goal);
        }

        for edge in graph.neighbors(vertex) {
            if settled.contains(&edge.to) {
                continue;
            }
            let candidate = cost + edge.distance_meters;
            let better = dist
                .get(&edge.to)
                .is_none_or(|&known| candidate < known);
            if better {
                dist.insert(edge.to, candidate);
                prev.insert(edge.to, vertex);
                heap.push(State {
                    cost: candidate,
                    vertex: edge.to,
                });
            }
        }
    }

    Vec::new()
}

fn reconstruct(prev: &HashMap<VertexId, VertexId>, start: VertexId, goal: VertexId) -> Vec<VertexId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match prev.get(&current) {
            Some(&p) => {
                path.push(p);
                current = p;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
