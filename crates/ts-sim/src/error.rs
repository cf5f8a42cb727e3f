use thiserror::Error;

use ts_mobility::MobilityError;
use ts_schedule::ScheduleError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("clock produced an unusable step of {0} s")]
    BadClockStep(f64),

    #[error("command queue is closed")]
    QueueClosed,

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Mobility(#[from] MobilityError),
}

pub type SimResult<T> = Result<T, SimError>;
