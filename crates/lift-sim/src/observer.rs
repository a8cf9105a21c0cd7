//! Observer trait for per-event tracing and data collection.

use lift_core::{ElevatorId, Floor};
use lift_models::TravelSegment;

use crate::ElevatorRun;

/// One door cycle at a floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StopEvent {
    pub elevator:         ElevatorId,
    pub floor:            Floor,
    /// Time the car reached the floor (doors start opening).
    pub arrived_at:       f64,
    pub dwell:            f64,
    pub boarded:          usize,
    pub alighted:         usize,
    pub boarding_weight:  f64,
    pub alighting_weight: f64,
    /// Mass aboard when the doors close.
    pub load_after:       f64,
}

/// Callbacks invoked by [`Dispatcher::run`][crate::Dispatcher::run] as each
/// car is simulated.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — stop counter
///
/// ```rust,ignore
/// struct StopCounter(usize);
///
/// impl DispatchObserver for StopCounter {
///     fn on_stop(&mut self, _stop: &StopEvent) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// Called before a car starts consuming its queue.
    fn on_elevator_start(&mut self, _elevator: ElevatorId, _floor: Floor, _queued: usize) {}

    /// Called for every floor-to-floor move, before the clock advances.
    fn on_travel(
        &mut self,
        _elevator: ElevatorId,
        _from:     Floor,
        _to:       Floor,
        _depart:   f64,
        _load:     f64,
        _segment:  &TravelSegment,
    ) {}

    /// Called after every stop that boarded or alighted someone.
    fn on_stop(&mut self, _stop: &StopEvent) {}

    /// Called once a car has served its whole queue.
    fn on_elevator_end(&mut self, _run: &ElevatorRun) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
