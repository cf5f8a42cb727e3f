//! A single moving agent.

use ts_core::{AgentId, CoreError, CoreResult, Decision, LaneId};

use crate::Vehicle;

/// Validate a relative lane position: finite and in `[0, 1)`.
///
/// `1.0` is not a resting state: an agent reaching the end of a lane is on
/// the next lane at `0.0`.
pub fn check_position(position: f64) -> CoreResult<()> {
    if !(0.0..1.0).contains(&position) {
        return Err(CoreError::invalid("position", format!("{position} is outside [0, 1)")));
    }
    Ok(())
}

/// Simulation state of one agent.
///
/// The agent only names its lane; which agents a lane holds is recorded by
/// the lane.  Both sides change together in
/// [`AgentStore::relocate`](crate::AgentStore::relocate), which is why the
/// lane has no public setter here.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    id:               AgentId,
    pub(crate) lane:  LaneId,
    position:         f64,
    velocity:         f64,
    decision:         Decision,
    vehicle:          Vehicle,
    remove_candidate: bool,
}

impl Agent {
    pub(crate) fn new(id: AgentId, lane: LaneId, position: f64, velocity: f64, vehicle: Vehicle) -> CoreResult<Self> {
        let mut agent = Self {
            id,
            lane,
            position: 0.0,
            velocity: 0.0,
            decision: Decision::KEEP,
            vehicle,
            remove_candidate: false,
        };
        agent.set_position(position)?;
        agent.set_velocity(velocity)?;
        Ok(agent)
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn lane(&self) -> LaneId {
        self.lane
    }

    /// Relative position on the current lane, in `[0, 1)`.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set_position(&mut self, position: f64) -> CoreResult<()> {
        check_position(position)?;
        self.position = position;
        Ok(())
    }

    /// Velocity in m/s.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Set the velocity.  Must be finite and within the vehicle's bounds.
    pub fn set_velocity(&mut self, velocity: f64) -> CoreResult<()> {
        if !velocity.is_finite() || !self.vehicle.admits_velocity(velocity) {
            return Err(CoreError::invalid(
                "velocity",
                format!(
                    "{velocity} m/s is outside the vehicle range [{}, {}]",
                    self.vehicle.min_velocity(),
                    self.vehicle.max_velocity()
                ),
            ));
        }
        self.velocity = velocity;
        Ok(())
    }

    /// The decision lane switching acts on.
    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn set_decision(&mut self, decision: Decision) {
        self.decision = decision;
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Flag the agent for removal at the end of the tick.
    pub fn mark_for_removal(&mut self) {
        self.remove_candidate = true;
    }

    pub fn is_remove_candidate(&self) -> bool {
        self.remove_candidate
    }
}
