//! Per-car state handed between assignment and simulation.

use crate::{ElevatorId, Floor, Request};

/// One simulated car.
///
/// `queue` belongs to the assignment policy until the dispatch simulator
/// takes it; `floor` and `served_requests` belong to the simulator.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevatorState {
    pub id:              ElevatorId,
    /// Resting floor before a run; final floor after it.
    pub floor:           Floor,
    /// Requests assigned to this car, in assignment order.
    pub queue:           Vec<Request>,
    /// Requests served in the last run, in drop-off order.
    pub served_requests: Vec<Request>,
}

impl ElevatorState {
    pub fn new(id: ElevatorId, floor: Floor) -> Self {
        Self {
            id,
            floor,
            queue:           Vec::new(),
            served_requests: Vec::new(),
        }
    }

    /// `count` cars with IDs `1..=count`, all resting at `floor`.
    pub fn bank(count: usize, floor: Floor) -> Vec<ElevatorState> {
        (0..count)
            .map(|i| ElevatorState::new(ElevatorId::from_index(i), floor))
            .collect()
    }

    /// Empty both the queue and the served list before a new assignment.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.served_requests.clear();
    }
}
