//! Scalar cost of a served request set, and its theoretical lower bound.
//!
//! # Cost model
//!
//! ```text
//! wait_cost             = w.wait · Σ wait + Σ penalty(wait)
//! ride_cost             = w.ride · Σ in_cab
//! running_energy_cost   = w.energy · running_energy
//! emptyload_energy_cost = w.energy · w.emptyload_multiplier · emptyload_energy
//! total                 = sum of the four
//! ```
//!
//! `running_energy` already contains the empty-car share; the empty-load term
//! is a surcharge on top, discouraging dead-heading.

use lift_core::{LiftConfig, Request, WaitPenalty};

use crate::TravelSegment;

// ── Breakdown ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObjectiveBreakdown {
    pub total:                 f64,
    pub wait_cost:             f64,
    pub ride_cost:             f64,
    pub running_energy_cost:   f64,
    pub emptyload_energy_cost: f64,
}

/// Weighted combination of accumulated time and energy.
pub fn compute_objective(
    cfg:              &LiftConfig,
    wait_time:        f64,
    in_cab_time:      f64,
    emptyload_energy: f64,
    running_energy:   f64,
    wait_penalty:     f64,
) -> ObjectiveBreakdown {
    let w = &cfg.weights;
    let wait_cost             = w.wait * wait_time + wait_penalty;
    let ride_cost             = w.ride * in_cab_time;
    let running_energy_cost   = w.energy * running_energy;
    let emptyload_energy_cost = w.energy * w.emptyload_multiplier * emptyload_energy;
    ObjectiveBreakdown {
        total: wait_cost + ride_cost + running_energy_cost + emptyload_energy_cost,
        wait_cost,
        ride_cost,
        running_energy_cost,
        emptyload_energy_cost,
    }
}

/// Surcharge for one passenger who waited `wait` seconds.
pub fn wait_penalty(p: &WaitPenalty, wait: f64) -> f64 {
    let excess = wait - p.threshold;
    if excess <= 0.0 {
        return 0.0;
    }
    let normalised = if p.threshold > 0.0 { excess / p.threshold } else { excess };
    p.scale * normalised.powf(p.exponent)
}

// ── Passenger metrics ─────────────────────────────────────────────────────────

/// Time totals over a served request set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PassengerMetrics {
    pub served_count:         usize,
    pub total_passenger_time: f64,
    pub total_wait_time:      f64,
    pub total_in_cab_time:    f64,
    pub wait_penalty_total:   f64,
}

/// Sum wait, ride, and penalty over `served`.
///
/// Requests the car never delivered (no destination arrival) are skipped.
/// A request with no recorded origin arrival counts its whole trip as ride
/// time.
pub fn summarize_passenger_metrics<'a, I>(cfg: &LiftConfig, served: I) -> PassengerMetrics
where
    I: IntoIterator<Item = &'a Request>,
{
    let mut m = PassengerMetrics::default();
    for req in served {
        let Some(passenger) = req.passenger_time() else {
            continue;
        };
        m.served_count += 1;
        m.total_passenger_time += passenger;

        match (req.wait_time(), req.in_cab_time()) {
            (Some(wait), Some(in_cab)) => {
                m.total_wait_time += wait;
                m.total_in_cab_time += in_cab;
                m.wait_penalty_total += wait_penalty(&cfg.wait_penalty, wait);
            }
            _ => m.total_in_cab_time += passenger,
        }
    }
    m
}

/// Per-request waits (origin arrival − call time, or pickup if the origin
/// arrival is missing), in the order given.
pub fn wait_times<'a, I>(served: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Request>,
{
    served
        .into_iter()
        .filter_map(|r| {
            let boarded = r.origin_arrival_time.or(r.pickup_time)?;
            Some((boarded - r.arrival_time).max(0.0))
        })
        .collect()
}

// ── Theoretical limit ─────────────────────────────────────────────────────────

/// Best case for a request set: every passenger finds a car waiting at the
/// origin and rides alone, straight to the destination.
///
/// Used for reporting only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TheoreticalLimit {
    pub breakdown:      ObjectiveBreakdown,
    pub wait_time:      f64,
    pub wait_penalty:   f64,
    pub in_cab_time:    f64,
    pub running_energy: f64,
}

pub fn compute_theoretical_limit<'a, I>(cfg: &LiftConfig, served: I) -> TheoreticalLimit
where
    I: IntoIterator<Item = &'a Request>,
{
    let mut in_cab_time = 0.0;
    let mut running_energy = 0.0;
    for req in served {
        let trip = TravelSegment::between(cfg, req.load, req.origin, req.destination);
        in_cab_time += trip.duration;
        running_energy += trip.energy();
    }
    TheoreticalLimit {
        breakdown: compute_objective(cfg, 0.0, in_cab_time, 0.0, running_energy, 0.0),
        wait_time: 0.0,
        wait_penalty: 0.0,
        in_cab_time,
        running_energy,
    }
}
