//! Random lane changes.

use ts_core::{AgentRng, Decision};
use ts_mobility::Agent;

use crate::{BehaviorError, BehaviorResult, DecisionContext, DecisionModel};

/// With probability `p` per tick, pick one of the decisions the agent's lane
/// routes; otherwise keep the lane.
pub struct RandomLaneChange {
    probability: f64,
}

impl RandomLaneChange {
    /// `probability` must lie in `[0, 1]`.
    pub fn new(probability: f64) -> BehaviorResult<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(BehaviorError::Config(format!(
                "lane change probability {probability} is outside [0, 1]"
            )));
        }
        Ok(Self { probability })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl DecisionModel for RandomLaneChange {
    fn think(&self, agent: &Agent, ctx: &DecisionContext<'_>, rng: &mut AgentRng) -> Decision {
        let Ok(lane) = ctx.network.lane(agent.lane()) else {
            return Decision::KEEP;
        };
        let options = lane.routed_decisions();
        if options.is_empty() || !rng.gen_bool(self.probability) {
            return Decision::KEEP;
        }
        rng.choose(&options).copied().unwrap_or(Decision::KEEP)
    }
}
