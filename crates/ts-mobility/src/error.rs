use thiserror::Error;

use ts_core::{AgentId, CoreError, EdgeId, JunctionId, LaneId};
use ts_spatial::SpatialError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MobilityError {
    #[error("dead end: no edge leaves {junction}")]
    DeadEnd { junction: JunctionId },

    #[error("edge {0} has no lanes to enter")]
    EdgeHasNoLanes(EdgeId),

    #[error("no outgoing path after {lane}, {remainder} m left to drive")]
    NoOutgoingPath { lane: LaneId, remainder: f64 },

    #[error("agent {0} is not in the store")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl MobilityError {
    /// `true` for failures caused by the shape of the road graph rather than
    /// by a bad argument.
    pub fn is_topology(&self) -> bool {
        matches!(
            self,
            MobilityError::DeadEnd { .. } | MobilityError::EdgeHasNoLanes(_) | MobilityError::NoOutgoingPath { .. }
        )
    }
}

pub type MobilityResult<T> = Result<T, MobilityError>;
