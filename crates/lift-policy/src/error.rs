use lift_core::LiftError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    /// Invalid configuration or a malformed request.
    #[error(transparent)]
    Setup(#[from] LiftError),

    #[error("{requests} requests to assign but no elevators")]
    NoElevators { requests: usize },
}

pub type PolicyResult<T> = Result<T, PolicyError>;
