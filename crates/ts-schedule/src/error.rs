use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The layer was never registered.  This is a caller bug, not a
    /// recoverable condition.
    #[error("layer {0} was never registered")]
    UnknownLayer(i32),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
