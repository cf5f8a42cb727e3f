//! Spatial-subsystem error type.

use thiserror::Error;

use ts_core::{CoreError, EdgeId, JunctionId, LaneId};

/// Errors produced by `ts-spatial`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: JunctionId, to: JunctionId },

    #[error("junction {0} not found in network")]
    JunctionNotFound(JunctionId),

    #[error("edge {0} not found in network")]
    EdgeNotFound(EdgeId),

    #[error("lane {0} not found in network")]
    LaneNotFound(LaneId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
