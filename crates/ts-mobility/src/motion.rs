//! Constant-velocity motion along the lane graph.
//!
//! An agent drives `velocity * elapsed` metres per tick.  The distance is
//! walked with [`ts_core::follow`] over a [`LaneChain`]: the successor of a
//! lane is the first lane of an edge leaving the junction the lane's edge ends
//! in, picked by an [`EdgeSelector`].
//!
//! A junction with no way out is a [`MobilityError::DeadEnd`].  A selector
//! that declines every candidate ends the chain instead, and the unspent
//! distance comes back as [`MobilityError::NoOutgoingPath`].

use ts_core::{follow, AgentId, CoreError, EdgeId, Followed, LaneId, SegmentChain};
use ts_spatial::{EdgeSelector, RoadNetwork};

use crate::{AgentStore, MobilityError, MobilityResult};

/// The lane graph seen as a segment chain.
pub struct LaneChain<'a, S: ?Sized> {
    network:  &'a RoadNetwork,
    selector: &'a mut S,
}

impl<'a, S: EdgeSelector + ?Sized> LaneChain<'a, S> {
    pub fn new(network: &'a RoadNetwork, selector: &'a mut S) -> Self {
        Self { network, selector }
    }
}

impl<S: EdgeSelector + ?Sized> SegmentChain for LaneChain<'_, S> {
    type Segment = LaneId;
    type Error   = MobilityError;

    fn length(&self, lane: LaneId) -> f64 {
        self.network.lanes()[lane.index()].length()
    }

    fn next(&mut self, lane: LaneId) -> MobilityResult<Option<LaneId>> {
        let edge = self.network.lane(lane)?.edge();
        let junction = self.network.edge(edge)?.end();

        let candidates: Vec<EdgeId> = self.network.out_edges(junction).collect();
        if candidates.is_empty() {
            return Err(MobilityError::DeadEnd { junction });
        }
        let Some(chosen) = self.selector.select(self.network, junction, &candidates) else {
            return Ok(None);
        };
        let entry = self
            .network
            .edge(chosen)?
            .first_lane()
            .ok_or(MobilityError::EdgeHasNoLanes(chosen))?;

        Ok(Some(entry))
    }
}

/// Advance `agent` by `velocity * elapsed` metres.
///
/// On success the agent is relocated to the lane and position where the
/// distance ran out.  On failure nothing changes.
///
/// # Errors
///
/// - `CoreError::InvalidArgument` if `elapsed` is negative or not finite, or
///   the resulting distance is negative.
/// - [`MobilityError::DeadEnd`] / [`MobilityError::EdgeHasNoLanes`] when the
///   walk reaches a junction it cannot leave.
/// - [`MobilityError::NoOutgoingPath`] when the selector declines every edge
///   leaving a junction.
pub fn advance<S: EdgeSelector + ?Sized>(
    network:  &mut RoadNetwork,
    agents:   &mut AgentStore,
    selector: &mut S,
    agent:    AgentId,
    elapsed:  f64,
) -> MobilityResult<()> {
    let a = agents.get(agent).ok_or(MobilityError::AgentNotFound(agent))?;
    if !elapsed.is_finite() || elapsed < 0.0 {
        return Err(CoreError::invalid("elapsed", format!("{elapsed} s is not a finite duration >= 0")).into());
    }
    let distance = a.velocity() * elapsed;
    if distance < 0.0 {
        return Err(CoreError::invalid("distance", format!("cannot drive {distance} m backwards")).into());
    }

    let (start, offset) = (a.lane(), a.position());
    let outcome = {
        let mut chain = LaneChain::new(network, selector);
        follow(&mut chain, start, offset, distance)?
    };

    match outcome {
        Followed::Within { segment, offset } => agents.relocate(network, agent, segment, offset),
        Followed::Exhausted { segment, remainder } => {
            Err(MobilityError::NoOutgoingPath { lane: segment, remainder })
        }
    }
}
