//! Edge selection at junctions.
//!
//! # Pluggability
//!
//! When an agent runs off the end of a lane, the motion step collects the
//! edges leaving the junction and asks an [`EdgeSelector`] which one to take.
//! Applications swap in their own policy; the built-ins cover deterministic
//! tests ([`FirstEdge`], [`HighestPriority`]), the classic uniform random
//! choice ([`SeededRandom`]) and goal-directed driving ([`TowardsJunction`]).

use ts_core::{EdgeId, JunctionId, SimRng};

use crate::network::RoadNetwork;
use crate::router::shortest_route;

/// Pluggable next-edge policy.
pub trait EdgeSelector: Send {
    /// Pick one of `candidates` (never empty, all leaving `junction`).
    ///
    /// Returning `None` leaves the agent nowhere to go: its motion stops with
    /// the distance still unspent.
    fn select(&mut self, network: &RoadNetwork, junction: JunctionId, candidates: &[EdgeId]) -> Option<EdgeId>;
}

impl<S: EdgeSelector + ?Sized> EdgeSelector for Box<S> {
    fn select(&mut self, network: &RoadNetwork, junction: JunctionId, candidates: &[EdgeId]) -> Option<EdgeId> {
        (**self).select(network, junction, candidates)
    }
}

/// Always the first candidate in incidence order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstEdge;

impl EdgeSelector for FirstEdge {
    fn select(&mut self, _network: &RoadNetwork, _junction: JunctionId, candidates: &[EdgeId]) -> Option<EdgeId> {
        candidates.first().copied()
    }
}

/// The highest-priority candidate; ties go to the lower weight, then the
/// lower id.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighestPriority;

impl EdgeSelector for HighestPriority {
    fn select(&mut self, network: &RoadNetwork, _junction: JunctionId, candidates: &[EdgeId]) -> Option<EdgeId> {
        candidates
            .iter()
            .copied()
            .filter_map(|e| {
                let priority = network.edge(e).ok()?.priority();
                let weight = network.edge_weight(e).ok()?;
                Some((e, priority, weight))
            })
            .min_by(|a, b| {
                b.1.cmp(&a.1)
                    .then_with(|| a.2.total_cmp(&b.2))
                    .then_with(|| a.0.cmp(&b.0))
            })
            .map(|(e, _, _)| e)
    }
}

/// Uniform random choice from a seeded RNG.
pub struct SeededRandom {
    rng: SimRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: SimRng::new(seed) }
    }
}

impl EdgeSelector for SeededRandom {
    fn select(&mut self, _network: &RoadNetwork, _junction: JunctionId, candidates: &[EdgeId]) -> Option<EdgeId> {
        self.rng.choose(candidates).copied()
    }
}

/// Head for `target` along the weighted shortest route.  Falls back to the
/// first candidate when the target is unreachable or already reached.
#[derive(Debug, Clone, Copy)]
pub struct TowardsJunction {
    pub target: JunctionId,
}

impl EdgeSelector for TowardsJunction {
    fn select(&mut self, network: &RoadNetwork, junction: JunctionId, candidates: &[EdgeId]) -> Option<EdgeId> {
        let planned = shortest_route(network, junction, self.target)
            .ok()
            .and_then(|route| route.edges.first().copied())
            .filter(|e| candidates.contains(e));
        planned.or_else(|| candidates.first().copied())
    }
}
