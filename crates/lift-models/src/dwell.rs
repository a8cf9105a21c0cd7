//! Door dwell time.

use lift_core::DwellParams;

/// Seconds the doors stay open for `boarding_weight + alighting_weight` kg
/// of passengers.
///
/// Piecewise linear: `normal_rate` per kg up to the congestion threshold,
/// `congested_rate` per kg beyond it.  Continuous at the threshold.
pub fn hold_time(d: &DwellParams, boarding_weight: f64, alighting_weight: f64) -> f64 {
    let total = boarding_weight + alighting_weight;
    if total <= d.congestion_threshold {
        d.base + d.normal_rate * total
    } else {
        d.base
            + d.normal_rate * d.congestion_threshold
            + d.congested_rate * (total - d.congestion_threshold)
    }
}
