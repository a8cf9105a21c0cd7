//! The `Dispatcher` — runs every car's queue through the event loop.

use log::debug;

use lift_core::{ElevatorState, LiftConfig, Request};

use crate::car::CarRun;
use crate::{DispatchObserver, DispatchOutcome, ElevatorRun, NoopObserver, SimResult};

/// Drives the per-car event loop for a whole bank.
///
/// Validation happens up front: a malformed request anywhere in the bank, or
/// a car parked off the building, fails the run before any car moves.  Results are written back to the
/// elevators only once every car has finished, so an `Err` leaves each
/// `ElevatorState` exactly as it was handed in.
pub struct Dispatcher<'a> {
    config: &'a LiftConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a LiftConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LiftConfig {
        self.config
    }

    /// Simulate every car in slice order.
    ///
    /// On success each car's `queue` is consumed, `served_requests` holds the
    /// requests in drop-off order with all four timestamps set, and `floor`
    /// is the car's final position.
    pub fn run<O: DispatchObserver>(
        &self,
        elevators: &mut [ElevatorState],
        observer:  &mut O,
    ) -> SimResult<DispatchOutcome> {
        self.validate_queues(elevators)?;

        let mut results = Vec::with_capacity(elevators.len());
        for car in elevators.iter() {
            results.push(
                CarRun::new(self.config, observer, car.id, car.floor, car.queue.clone()).run()?,
            );
        }
        Ok(self.commit(elevators, results))
    }

    /// Like [`run`][Self::run] but simulates cars on Rayon's thread pool.
    ///
    /// Observers are not shared across threads, so none is called.  The
    /// outcome is identical to `run` with a [`NoopObserver`].
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&self, elevators: &mut [ElevatorState]) -> SimResult<DispatchOutcome> {
        use rayon::prelude::*;

        self.validate_queues(elevators)?;

        let results = elevators
            .par_iter()
            .map(|car| {
                CarRun::new(self.config, &mut NoopObserver, car.id, car.floor, car.queue.clone())
                    .run()
            })
            .collect::<SimResult<Vec<_>>>()?;
        Ok(self.commit(elevators, results))
    }

    /// Convenience for callers that need no callbacks.
    pub fn run_quiet(&self, elevators: &mut [ElevatorState]) -> SimResult<DispatchOutcome> {
        self.run(elevators, &mut NoopObserver)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn validate_queues(&self, elevators: &[ElevatorState]) -> SimResult<()> {
        self.config.validate_elevators(elevators)?;
        self.config
            .validate_requests(elevators.iter().flat_map(|car| car.queue.iter()))?;
        Ok(())
    }

    fn commit(
        &self,
        elevators: &mut [ElevatorState],
        results:   Vec<(ElevatorRun, Vec<Request>)>,
    ) -> DispatchOutcome {
        let mut runs = Vec::with_capacity(results.len());
        for (car, (run, served)) in elevators.iter_mut().zip(results) {
            car.queue.clear();
            car.served_requests = served;
            car.floor = run.final_floor;
            runs.push(run);
        }
        let outcome = DispatchOutcome::from_runs(runs);
        debug!(
            "dispatch: {} cars served {} requests, running {:.1} s, energy {:.0} J ({:.0} J empty)",
            outcome.runs.len(),
            outcome.served_count(),
            outcome.total_running_time,
            outcome.total_energy,
            outcome.emptyload_energy
        );
        outcome
    }
}

/// Every served request across the bank, car by car.
pub fn served_requests(elevators: &[ElevatorState]) -> impl Iterator<Item = &Request> {
    elevators.iter().flat_map(|car| car.served_requests.iter())
}
