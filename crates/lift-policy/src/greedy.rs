//! Greedy Baseline: balanced queues with a hall-call-only forecast.

use log::debug;

use lift_core::{ElevatorState, Floor, LiftConfig, Request};

use crate::policy::{by_arrival, prepare};
use crate::{AssignmentPolicy, PolicyResult};

/// Assigns each request, in arrival order, to the car minimising
/// `(queue length, |forecast floor − origin|, elevator id)`.
///
/// The forecast floor starts at the car's resting floor and moves to the
/// *origin* of each request the car takes.  The destination is never used:
/// this baseline models a dispatcher that only sees hall calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyBaseline;

impl AssignmentPolicy for GreedyBaseline {
    fn name(&self) -> &str {
        "greedy"
    }

    fn assign(
        &self,
        requests:  &[Request],
        elevators: &mut [ElevatorState],
        config:    &LiftConfig,
    ) -> PolicyResult<()> {
        prepare(requests, elevators, config)?;
        if requests.is_empty() {
            return Ok(());
        }

        let mut forecast: Vec<Floor> = elevators.iter().map(|car| car.floor).collect();
        for req in by_arrival(requests) {
            let Some(best) = (0..elevators.len()).min_by_key(|&i| {
                (
                    elevators[i].queue.len(),
                    (forecast[i] - req.origin).abs(),
                    elevators[i].id,
                )
            }) else {
                break;
            };
            elevators[best].queue.push(req);
            forecast[best] = req.origin;
        }

        debug!(
            "greedy: {} requests over {} cars, queue lengths {:?}",
            requests.len(),
            elevators.len(),
            elevators.iter().map(|c| c.queue.len()).collect::<Vec<_>>()
        );
        Ok(())
    }
}
