//! Weighted shortest routes over the road graph.
//!
//! Edge cost is [`RoadNetwork::edge_weight`]: the longest lane divided by
//! the edge priority, so higher-priority roads look shorter.  Edges without
//! lanes weigh `+∞` and are never used.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ts_core::{EdgeId, JunctionId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered list of edges and the summed edge weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    /// Sum of [`RoadNetwork::edge_weight`] over `edges`.
    pub total_weight: f64,
}

impl Route {
    /// `true` if the source and destination are the same junction.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Heap key ordered by `f64::total_cmp`.
#[derive(Copy, Clone, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Cheapest route from `from` to `to`.
///
/// Ties are broken by junction id, so the result is deterministic.
pub fn shortest_route(network: &RoadNetwork, from: JunctionId, to: JunctionId) -> SpatialResult<Route> {
    network.junction(from)?;
    network.junction(to)?;
    if from == to {
        return Ok(Route { edges: vec![], total_weight: 0.0 });
    }

    let n = network.junction_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(Cost, JunctionId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), junction))) = heap.pop() {
        if junction == to {
            return Ok(reconstruct(network, &prev_edge, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[junction.index()] {
            continue;
        }

        for edge in network.out_edges(junction) {
            let weight = network.edge_weight(edge)?;
            if !weight.is_finite() {
                continue;
            }
            let neighbor = network.edges()[edge.index()].end();
            let new_cost = cost + weight;

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], to: JunctionId, total_weight: f64) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if !e.is_valid() {
            break;
        }
        edges.push(e);
        cur = network.edges()[e.index()].start();
    }
    edges.reverse();
    Route { edges, total_weight }
}
