//! Drive and standby energy.

use lift_core::{Direction, EnergyParams};

/// Motion energy, J, to move `load` kg over `distance` metres.
///
/// Gravitational work acts on the car-plus-load mass net of the
/// counterweight, so a light car going up (or a heavy one going down) is
/// helped by gravity.  Regeneration is not modelled: the result is floored
/// at zero before dividing by motor efficiency.
pub fn segment_energy(e: &EnergyParams, load: f64, distance: f64, direction: Direction) -> f64 {
    let delta_mass = e.car_mass + load - e.counterweight_mass;
    let motion = direction.sign() * e.gravity * delta_mass * distance
        + e.friction_per_meter * distance;
    motion.max(0.0) / e.motor_efficiency
}

/// Background energy, J, drawn over `duration` seconds.
#[inline]
pub fn standby_energy(e: &EnergyParams, duration: f64) -> f64 {
    e.standby_power * duration.max(0.0)
}
