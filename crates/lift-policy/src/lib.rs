//! `lift-policy` — decides which car serves which request.
//!
//! Every policy only rewrites `ElevatorState::queue`; nothing here runs the
//! event loop.  The dispatch simulator consumes the queues afterwards.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`policy`]      | `AssignmentPolicy` trait, shared queue preparation             |
//! | [`greedy`]      | `GreedyBaseline` — balanced queues, hall-call forecast         |
//! | [`horizon`]     | `RollingHorizon` — batched incremental-cost heuristic          |
//! | [`predictor`]   | `DestinationPredictor`, `CertainDestination`, `EmpiricalPredictor` |
//! | [`external`]    | `ExternalScheduler` seam with greedy fallback                  |
//! | [`error`]       | `PolicyError`, `PolicyResult`                                  |
//!
//! # Failure model
//!
//! A policy either fills every queue or leaves every queue empty.  Invalid
//! input is reported as `PolicyError` after the queues have been cleared; an
//! external solver failing is not an error at all, it selects the greedy
//! fallback.

pub mod error;
pub mod external;
pub mod greedy;
pub mod horizon;
pub mod policy;
pub mod predictor;


pub use error::{PolicyError, PolicyResult};
pub use external::{assign_with_fallback, AppliedPolicy, ExternalScheduler, SolverFailure};
pub use greedy::GreedyBaseline;
pub use horizon::{estimate_incremental_cost, CostEstimate, PlanState, RollingHorizon};
pub use policy::AssignmentPolicy;
pub use predictor::{CertainDestination, DayType, DestinationPredictor, EmpiricalPredictor};
