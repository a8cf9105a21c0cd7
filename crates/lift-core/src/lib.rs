//! `lift-core` — foundational types for the `liftsim` elevator-bank simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and a single required external one (`thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `ElevatorId`, `RequestId`                                  |
//! | [`floor`]       | `Floor`, `Direction`                                       |
//! | [`request`]     | `Request` (trip record + service timestamps)               |
//! | [`elevator`]    | `ElevatorState` (car position, queue, served requests)     |
//! | [`config`]      | `LiftConfig` and its parameter groups                      |
//! | [`error`]       | `LiftError`, `LiftResult`                                  |
//!
//! # Ownership phases
//!
//! An `ElevatorState::queue` is written only by an assignment policy; the
//! dispatch simulator then takes the queue and writes `served_requests` and
//! `floor`.  Nothing is shared across the two phases, so every type here is
//! plain owned data.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod elevator;
pub mod error;
pub mod floor;
pub mod ids;
pub mod request;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    BuildingConfig, DwellParams, EnergyParams, HorizonParams, KinematicsParams, LiftConfig,
    ObjectiveWeights, WaitPenalty,
};
pub use elevator::ElevatorState;
pub use error::{LiftError, LiftResult};
pub use floor::{Direction, Floor};
pub use ids::{ElevatorId, RequestId};
pub use request::Request;
