//! Run results.

use lift_core::{ElevatorId, Floor};

/// Time and energy totals for one car.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevatorRun {
    pub elevator:         ElevatorId,
    pub initial_floor:    Floor,
    pub final_floor:      Floor,
    pub served:           usize,
    /// Seconds spent travelling or dwelling (idle gaps excluded).
    pub running_time:     f64,
    /// Motion + standby energy, J, including idle gaps.
    pub energy:           f64,
    /// The share of `energy` spent moving with nobody aboard.
    pub emptyload_energy: f64,
}

/// Aggregate over every car of one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DispatchOutcome {
    /// One entry per car, in the order the cars were given.
    pub runs:               Vec<ElevatorRun>,
    pub total_running_time: f64,
    pub total_energy:       f64,
    pub emptyload_energy:   f64,
}

impl DispatchOutcome {
    pub fn from_runs(runs: Vec<ElevatorRun>) -> Self {
        let total_running_time = runs.iter().map(|r| r.running_time).sum();
        let total_energy = runs.iter().map(|r| r.energy).sum();
        let emptyload_energy = runs.iter().map(|r| r.emptyload_energy).sum();
        Self {
            runs,
            total_running_time,
            total_energy,
            emptyload_energy,
        }
    }

    pub fn served_count(&self) -> usize {
        self.runs.iter().map(|r| r.served).sum()
    }
}
