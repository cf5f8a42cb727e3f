//! What the layered scheduler runs.

use ts_core::{AgentId, EdgeId};

/// Lane switching runs in this layer.
pub const EDGE_LAYER: i32 = 1;

/// Agent motion runs in this layer, after every edge has switched lanes.
pub const AGENT_LAYER: i32 = 3;

/// A simulatable object, by id.
///
/// The scheduler holds ids only; the data lives in the road network and the
/// agent store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimObject {
    /// Lane switching for every lane of the edge.
    Edge(EdgeId),
    /// Constant-velocity motion of one agent.
    Agent(AgentId),
}

impl SimObject {
    /// The layer this kind of object is registered in.
    pub fn layer(self) -> i32 {
        match self {
            SimObject::Edge(_) => EDGE_LAYER,
            SimObject::Agent(_) => AGENT_LAYER,
        }
    }
}
