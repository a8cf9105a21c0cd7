//! The `AssignmentPolicy` trait.

use lift_core::{ElevatorState, LiftConfig, Request};

use crate::{PolicyError, PolicyResult};

/// Partitions a request stream into per-car queues.
///
/// Implementations must be deterministic: the same `(requests, elevators,
/// config)` always yields the same queues.  They must also be reentrant; all
/// tunables come from `config`, never from shared state, so several sweeps
/// may run on different threads at once.
///
/// # Example
///
/// ```rust,ignore
/// let mut cars = ElevatorState::bank(config.building.elevator_count, 1);
/// GreedyBaseline.assign(&requests, &mut cars, &config)?;
/// let outcome = Dispatcher::new(&config)?.run_quiet(&mut cars)?;
/// ```
pub trait AssignmentPolicy: Send + Sync {
    /// Short label for logs and reports.
    fn name(&self) -> &str;

    /// Clear every car's queue and served list, then rebuild the queues.
    ///
    /// On `Err` every queue is empty.
    fn assign(
        &self,
        requests:  &[Request],
        elevators: &mut [ElevatorState],
        config:    &LiftConfig,
    ) -> PolicyResult<()>;
}

/// Shared entry step for every policy: clear all cars, then validate.
pub(crate) fn prepare(
    requests:  &[Request],
    elevators: &mut [ElevatorState],
    config:    &LiftConfig,
) -> PolicyResult<()> {
    for car in elevators.iter_mut() {
        car.clear();
    }
    config.validate()?;
    config.validate_elevators(elevators)?;
    config.validate_requests(requests)?;
    if elevators.is_empty() && !requests.is_empty() {
        return Err(PolicyError::NoElevators { requests: requests.len() });
    }
    Ok(())
}

/// Copy of `requests` in ascending arrival order, stable on ties.
pub(crate) fn by_arrival(requests: &[Request]) -> Vec<Request> {
    let mut sorted = requests.to_vec();
    sorted.sort_by(|a, b| a.arrival_time.total_cmp(&b.arrival_time));
    sorted
}
