//! The `DecisionModel` trait — the extension point for driver behaviour.

use ts_core::{AgentRng, Decision};
use ts_mobility::Agent;

use crate::DecisionContext;

/// Pluggable decision making.
///
/// Called once per live agent per tick when thinking is enabled.  The
/// returned [`Decision`] is stored on the agent and read by lane switching,
/// which looks it up in the routing table of the agent's lane.
///
/// # Thread safety
///
/// With the `parallel` feature of ts-sim, `think` runs for many agents at
/// once on Rayon, so implementations must be `Send + Sync`.  Randomness must
/// come from the per-agent `rng` so results do not depend on thread order.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysLeft;
///
/// impl DecisionModel for AlwaysLeft {
///     fn think(&self, _agent: &Agent, _ctx: &DecisionContext<'_>, _rng: &mut AgentRng) -> Decision {
///         Decision::LEFT
///     }
/// }
/// ```
pub trait DecisionModel: Send + Sync + 'static {
    fn think(
        &self,
        agent: &Agent,
        ctx:   &DecisionContext<'_>,
        rng:   &mut AgentRng,
    ) -> Decision;
}
