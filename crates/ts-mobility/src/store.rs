//! The `AgentStore` — slot storage for agents and the single place where an
//! agent's lane changes.

use ts_core::{AgentId, LaneId};
use ts_spatial::RoadNetwork;

use crate::agent::check_position;
use crate::{Agent, MobilityError, MobilityResult, Vehicle};

/// Agents indexed by `AgentId`.
///
/// Ids are slot indices and are never reused, so per-agent side tables (RNG
/// streams, observer state) can be keyed by id for the whole run.  A removed
/// agent leaves an empty slot behind.
#[derive(Default)]
pub struct AgentStore {
    slots: Vec<Option<Agent>>,
    live:  usize,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of ids handed out so far (live or removed).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.get(id).is_some()
    }

    /// Live agents in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> + '_ {
        self.slots.iter_mut().flatten()
    }

    /// Ids of live agents, in id order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.iter().map(Agent::id).collect()
    }

    /// Ids of live agents flagged with [`Agent::mark_for_removal`].
    pub fn removal_candidates(&self) -> Vec<AgentId> {
        self.iter().filter(|a| a.is_remove_candidate()).map(Agent::id).collect()
    }

    /// Create an agent on `lane` and register it as an occupant there.
    pub fn place(
        &mut self,
        network:  &mut RoadNetwork,
        lane:     LaneId,
        position: f64,
        velocity: f64,
        vehicle:  Vehicle,
    ) -> MobilityResult<AgentId> {
        network.lane(lane)?;
        let id = AgentId::try_from(self.slots.len())?;
        let agent = Agent::new(id, lane, position, velocity, vehicle)?;
        network.enter_lane(lane, id)?;
        self.slots.push(Some(agent));
        self.live += 1;
        Ok(id)
    }

    /// Move `agent` to `position` on `lane`.
    ///
    /// This is the only function that changes an agent's lane.  When the
    /// lane differs, the agent leaves the old lane's occupants and joins the
    /// new one's.  All arguments are validated before anything changes.
    pub fn relocate(
        &mut self,
        network:  &mut RoadNetwork,
        agent:    AgentId,
        lane:     LaneId,
        position: f64,
    ) -> MobilityResult<()> {
        check_position(position)?;
        network.lane(lane)?;
        let a = self
            .slots
            .get_mut(agent.index())
            .and_then(Option::as_mut)
            .ok_or(MobilityError::AgentNotFound(agent))?;

        if a.lane != lane {
            network.leave_lane(a.lane, agent)?;
            network.enter_lane(lane, agent)?;
            a.lane = lane;
        }
        a.set_position(position)?;
        Ok(())
    }

    /// Take `agent` out of the store and off its lane.
    pub fn remove(&mut self, network: &mut RoadNetwork, agent: AgentId) -> MobilityResult<Agent> {
        let removed = self
            .slots
            .get_mut(agent.index())
            .and_then(Option::take)
            .ok_or(MobilityError::AgentNotFound(agent))?;
        self.live -= 1;
        network.leave_lane(removed.lane(), agent)?;
        Ok(removed)
    }
}
