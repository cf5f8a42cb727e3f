//! Read-only simulation state passed to every decision callback.

use ts_core::Tick;
use ts_mobility::AgentStore;
use ts_spatial::RoadNetwork;

/// A read-only view of the world for one tick's decision phase.
///
/// Built once per tick by ts-sim and shared by every
/// [`DecisionModel::think`][crate::DecisionModel::think] call.  Nothing is
/// mutated while it is live; decisions are written back afterwards.
pub struct DecisionContext<'a> {
    /// The tick being computed.
    pub tick: Tick,

    /// Seconds this tick will simulate.
    pub elapsed: f64,

    pub network: &'a RoadNetwork,

    pub agents: &'a AgentStore,
}

impl<'a> DecisionContext<'a> {
    #[inline]
    pub fn new(tick: Tick, elapsed: f64, network: &'a RoadNetwork, agents: &'a AgentStore) -> Self {
        Self { tick, elapsed, network, agents }
    }
}
