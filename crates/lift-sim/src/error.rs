use lift_core::{ElevatorId, Floor, LiftError, RequestId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration or a malformed queued request.
    #[error(transparent)]
    Setup(#[from] LiftError),

    #[error("{elevator}: passengers aboard but no stop ahead of floor {floor}")]
    NoProgress {
        elevator: ElevatorId,
        floor:    Floor,
    },

    #[error("{elevator}: onboard passengers head both up and down from floor {floor}")]
    MixedOnboardDirections {
        elevator: ElevatorId,
        floor:    Floor,
    },

    #[error("{elevator}: {request} finished without all service timestamps")]
    IncompleteTimestamps {
        elevator: ElevatorId,
        request:  RequestId,
    },
}

pub type SimResult<T> = Result<T, SimError>;
