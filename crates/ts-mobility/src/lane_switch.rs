//! Edge-level lane switching.

use tracing::trace;

use ts_core::{AgentId, EdgeId, LaneId};
use ts_spatial::RoadNetwork;

use crate::{AgentStore, MobilityResult};

/// Move every moving agent on `edge` to the lane its decision routes to.
///
/// Agents with velocity `<= 0` stay put.  The relative position is kept.
/// The (lane, agent) pairs are collected before anything moves, so an agent
/// switched onto a lane visited later is not switched twice.
///
/// Returns the number of agents that changed lane.
pub fn switch_lanes(network: &mut RoadNetwork, agents: &mut AgentStore, edge: EdgeId) -> MobilityResult<usize> {
    let snapshot: Vec<(LaneId, AgentId)> = {
        let net: &RoadNetwork = network;
        net.edge(edge)?
            .lanes()
            .iter()
            .flat_map(|&lane| net.lanes()[lane.index()].occupants().iter().map(move |&a| (lane, a)))
            .collect()
    };

    let mut moved = 0;
    for (lane, id) in snapshot {
        let Some(agent) = agents.get(id) else { continue };
        if agent.velocity() <= 0.0 {
            continue;
        }
        let target = network.lane(lane)?.decision_lane(agent.decision());
        if target == lane {
            continue;
        }
        let position = agent.position();
        agents.relocate(network, id, target, position)?;
        trace!(agent = %id, from = %lane, to = %target, "lane switch");
        moved += 1;
    }
    Ok(moved)
}
