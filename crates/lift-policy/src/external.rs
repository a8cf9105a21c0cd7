//! Seam for solver-backed schedulers.
//!
//! An external solver (an optimisation model, a remote service) gets the same
//! `(requests, elevators)` contract as the built-in policies but may fail.
//! A failure is not a run failure: [`assign_with_fallback`] wipes whatever
//! the solver wrote and hands the run to [`GreedyBaseline`].

use std::collections::HashSet;

use log::{info, warn};
use thiserror::Error;

use lift_core::{ElevatorState, LiftConfig, Request};

use crate::policy::prepare;
use crate::{AssignmentPolicy, GreedyBaseline, PolicyResult};

/// Why an external solver produced no usable assignment.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SolverFailure {
    #[error("model is infeasible")]
    Infeasible,

    #[error("solver hit its time limit")]
    TimedOut,

    #[error("solver unavailable: {0}")]
    Unavailable(String),

    /// The solver reported success but its queues do not hold every request
    /// exactly once.
    #[error("solver assignment is incomplete: {0}")]
    InvalidAssignment(String),
}

/// A scheduler that may fail to produce an assignment.
pub trait ExternalScheduler {
    fn name(&self) -> &str;

    /// Fill `elevators[i].queue` for every car.  Queues arrive empty.  On
    /// `Err` the queues may hold anything; the caller discards them.
    fn try_assign(
        &self,
        requests:  &[Request],
        elevators: &mut [ElevatorState],
        config:    &LiftConfig,
    ) -> Result<(), SolverFailure>;
}

/// Which policy populated the queues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppliedPolicy {
    External,
    GreedyFallback(SolverFailure),
}

/// Run `solver`, falling back to the Greedy Baseline if it fails.
///
/// Input is validated before the solver sees it, so a `PolicyError` always
/// means bad input, never a solver problem.  After a failure every queue is
/// cleared before the fallback runs.
pub fn assign_with_fallback<S>(
    solver:    &S,
    requests:  &[Request],
    elevators: &mut [ElevatorState],
    config:    &LiftConfig,
) -> PolicyResult<AppliedPolicy>
where
    S: ExternalScheduler + ?Sized,
{
    prepare(requests, elevators, config)?;

    let failure = match solver
        .try_assign(requests, elevators, config)
        .and_then(|()| check_conservation(requests, elevators))
    {
        Ok(()) => {
            info!("{}: assigned {} requests", solver.name(), requests.len());
            return Ok(AppliedPolicy::External);
        }
        Err(failure) => failure,
    };

    warn!("{}: {failure}; falling back to greedy", solver.name());
    GreedyBaseline.assign(requests, elevators, config)?;
    Ok(AppliedPolicy::GreedyFallback(failure))
}

/// Every input request queued exactly once, nothing else queued.
fn check_conservation(requests: &[Request], elevators: &[ElevatorState]) -> Result<(), SolverFailure> {
    let expected: HashSet<_> = requests.iter().map(|r| r.id).collect();
    let mut seen = HashSet::with_capacity(expected.len());
    for req in elevators.iter().flat_map(|car| car.queue.iter()) {
        if !expected.contains(&req.id) {
            return Err(SolverFailure::InvalidAssignment(format!("unknown {}", req.id)));
        }
        if !seen.insert(req.id) {
            return Err(SolverFailure::InvalidAssignment(format!("{} queued twice", req.id)));
        }
    }
    if seen.len() != expected.len() {
        return Err(SolverFailure::InvalidAssignment(format!(
            "{} of {} requests queued",
            seen.len(),
            expected.len()
        )));
    }
    Ok(())
}
