//! Setup-time error type.
//!
//! Sub-crates define their own error enums and wrap `LiftError` as one
//! variant via `#[from]`.  Both variants here are fatal to the run they
//! belong to and are raised before any simulation step executes.

use thiserror::Error;

use crate::RequestId;

#[derive(Debug, Error)]
pub enum LiftError {
    /// Malformed request: bad load, floor out of range, bad arrival time.
    #[error("invalid request {request}: {reason}")]
    Validation {
        request: RequestId,
        reason:  String,
    },

    /// Missing or contradictory tunables.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
