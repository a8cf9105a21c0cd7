//! One floor-to-floor move with its time and energy.

use lift_core::{Direction, Floor, LiftConfig};

use crate::{segment_energy, standby_energy, travel_time};

/// Duration and energy of a single move between two floors.
///
/// Both motion and standby energy accrue while the car travels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TravelSegment {
    pub duration:       f64,
    pub motion_energy:  f64,
    pub standby_energy: f64,
}

impl TravelSegment {
    /// The move of `load` kg from `from` to `to`.  All-zero for `from == to`.
    pub fn between(cfg: &LiftConfig, load: f64, from: Floor, to: Floor) -> Self {
        let Some(direction) = Direction::between(from, to) else {
            return Self::default();
        };
        let duration = travel_time(cfg, load, from, to);
        let distance = cfg.building.distance(from, to);
        Self {
            duration,
            motion_energy:  segment_energy(&cfg.energy, load, distance, direction),
            standby_energy: standby_energy(&cfg.energy, duration),
        }
    }

    #[inline]
    pub fn energy(&self) -> f64 {
        self.motion_energy + self.standby_energy
    }
}
