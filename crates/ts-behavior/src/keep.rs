//! A decision model that never changes lane.

use ts_core::{AgentRng, Decision};
use ts_mobility::Agent;

use crate::{DecisionContext, DecisionModel};

/// Always [`Decision::KEEP`].
///
/// Useful for tests and for runs that only exercise motion.
pub struct KeepLane;

impl DecisionModel for KeepLane {
    fn think(
        &self,
        _agent: &Agent,
        _ctx:   &DecisionContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Decision {
        Decision::KEEP
    }
}
