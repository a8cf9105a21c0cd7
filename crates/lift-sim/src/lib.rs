//! `lift-sim` — the collective-control dispatch simulator.
//!
//! # Per-car event loop
//!
//! ```text
//! while pending ∪ waiting ∪ onboard ≠ ∅:
//!   ① Pull      — requests whose call time has passed move pending → waiting.
//!   ② Idle      — nothing waiting or aboard: fast-forward to the next call,
//!                 charging standby energy for the gap.
//!   ③ Pick up   — empty car: go to the earliest (then nearest) waiting call,
//!                 board every compatible group there, adopt its direction.
//!   ④ Serve     — loaded car: stop at the nearest floor ahead that is an
//!                 onboard destination or a same-direction waiting origin;
//!                 alight/board; repeat until nothing lies ahead.
//! ```
//!
//! Cars never interact: each one consumes the queue its assignment policy
//! built.  With the `parallel` feature, [`Dispatcher::run_parallel`] runs
//! them on Rayon's pool.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Adds `Dispatcher::run_parallel` (Rayon).               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::{ElevatorState, LiftConfig};
//! use lift_sim::{Dispatcher, NoopObserver};
//!
//! let config = LiftConfig::default();
//! let mut cars = ElevatorState::bank(4, 1);
//! // … an assignment policy fills cars[i].queue …
//! let outcome = Dispatcher::new(&config)?.run(&mut cars, &mut NoopObserver)?;
//! println!("{:.0} J", outcome.total_energy);
//! ```

pub mod car;
pub mod dispatcher;
pub mod error;
pub mod observer;
pub mod outcome;

#[cfg(test)]
mod tests;

pub use car::{next_stop, onboard_heading, OnboardHeading};
pub use dispatcher::{served_requests, Dispatcher};
pub use error::{SimError, SimResult};
pub use observer::{DispatchObserver, NoopObserver, StopEvent};
pub use outcome::{DispatchOutcome, ElevatorRun};
