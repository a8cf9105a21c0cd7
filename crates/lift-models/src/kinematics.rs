//! Inter-floor travel time under a load-dependent velocity profile.
//!
//! A move accelerates at `a_acc`, optionally cruises at `v_max`, then
//! decelerates at `a_dec`.  Short moves never reach `v_max` and follow a
//! triangular profile; longer ones are trapezoidal.  Both limits shrink as
//! the car fills up.

use lift_core::{Direction, Floor, KinematicsParams, LiftConfig};

/// `full + (empty − full) · exp(−rate · load / capacity)`
#[inline]
fn decay(empty: f64, full: f64, rate: f64, load: f64, capacity: f64) -> f64 {
    full + (empty - full) * (-rate * load / capacity).exp()
}

/// Speed limit for `load` kg moving in `direction`, m/s.
pub fn max_speed(k: &KinematicsParams, capacity: f64, load: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Up => decay(k.speed_up_empty, k.speed_up_full, k.speed_decay_rate, load, capacity),
        Direction::Down => {
            decay(k.speed_down_empty, k.speed_down_full, k.speed_decay_rate, load, capacity)
        }
    }
}

/// Acceleration for `load` kg, m/s².
pub fn acceleration(k: &KinematicsParams, capacity: f64, load: f64) -> f64 {
    decay(k.acc_empty, k.acc_full, k.acc_decay_rate, load, capacity)
}

/// Deceleration for `load` kg, m/s².
pub fn deceleration(k: &KinematicsParams, capacity: f64, load: f64) -> f64 {
    decay(k.dec_empty, k.dec_full, k.acc_decay_rate, load, capacity)
}

/// Seconds to move `load` kg from `origin` to `destination`.
///
/// Same-floor moves return `0.0` without evaluating the profile.
pub fn travel_time(cfg: &LiftConfig, load: f64, origin: Floor, destination: Floor) -> f64 {
    let Some(direction) = Direction::between(origin, destination) else {
        return 0.0;
    };
    let capacity = cfg.building.capacity;
    let k = &cfg.kinematics;

    let distance = cfg.building.distance(origin, destination);
    let v_max = max_speed(k, capacity, load, direction);
    let a_acc = acceleration(k, capacity, load);
    let a_dec = deceleration(k, capacity, load);

    let v_peak = (2.0 * distance * a_acc * a_dec / (a_acc + a_dec)).sqrt();

    if v_peak <= v_max {
        // Triangular: accelerate straight into braking.
        v_peak * (1.0 / a_acc + 1.0 / a_dec)
    } else {
        let d_acc = v_max * v_max / (2.0 * a_acc);
        let d_dec = v_max * v_max / (2.0 * a_dec);
        let d_const = (distance - d_acc - d_dec).max(0.0);
        v_max / a_acc + v_max / a_dec + d_const / v_max
    }
}
