//! `lift-models` — the physical and cost models shared by the dispatch
//! simulator and the assignment policies.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`kinematics`] | load-dependent speed/acceleration, `travel_time`                |
//! | [`energy`]     | `segment_energy`, `standby_energy`                              |
//! | [`dwell`]      | `hold_time` (door dwell vs. passenger mass)                     |
//! | [`segment`]    | `TravelSegment` — duration + energy of one floor-to-floor move  |
//! | [`objective`]  | cost breakdown, wait penalty, passenger metrics, lower bound    |
//!
//! All functions are pure: they read an explicit `&LiftConfig` (or one of its
//! parameter groups) and never touch shared state, so the simulator and the
//! rolling-horizon policy get bit-identical numbers for the same inputs.

pub mod dwell;
pub mod energy;
pub mod kinematics;
pub mod objective;
pub mod segment;


pub use dwell::hold_time;
pub use energy::{segment_energy, standby_energy};
pub use kinematics::travel_time;
pub use objective::{
    compute_objective, compute_theoretical_limit, summarize_passenger_metrics, wait_penalty,
    wait_times, ObjectiveBreakdown, PassengerMetrics, TheoreticalLimit,
};
pub use segment::TravelSegment;
