//! Run configuration.
//!
//! # Design
//!
//! Every tunable the models and policies read lives in one `LiftConfig`
//! value that is passed explicitly to each call.  There is no process-wide
//! parameter state, so two parameter sweeps running on different threads
//! never observe each other's settings.
//!
//! `Default` reproduces the reference building: 15 floors of 3.5 m served by
//! four 1000 kg cars parked at the lobby.

use std::collections::HashSet;

use crate::{ElevatorState, Floor, LiftError, LiftResult, Request};

// ── BuildingConfig ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingConfig {
    /// Floors are numbered `1..=floor_count`.
    pub floor_count:    Floor,
    /// Metres between consecutive floors.
    pub floor_height:   f64,
    pub elevator_count: usize,
    /// Rated car load, kg.
    pub capacity:       f64,
    /// Floor every car rests at before the first run.
    pub initial_floor:  Floor,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            floor_count:    15,
            floor_height:   3.5,
            elevator_count: 4,
            capacity:       1000.0,
            initial_floor:  1,
        }
    }
}

impl BuildingConfig {
    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        (1..=self.floor_count).contains(&floor)
    }

    /// Shaft distance in metres between two floors.
    #[inline]
    pub fn distance(&self, from: Floor, to: Floor) -> f64 {
        f64::from((to - from).abs()) * self.floor_height
    }
}

// ── KinematicsParams ──────────────────────────────────────────────────────────

/// Load-dependent motion limits.
///
/// Each limit decays exponentially from its `_empty` value toward its
/// `_full` value as `load / capacity` grows:
///
/// ```text
/// limit(load) = full + (empty − full) · exp(−rate · load / capacity)
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicsParams {
    pub speed_up_empty:   f64,
    pub speed_up_full:    f64,
    pub speed_down_empty: f64,
    pub speed_down_full:  f64,
    pub acc_empty:        f64,
    pub acc_full:         f64,
    pub dec_empty:        f64,
    pub dec_full:         f64,
    /// Decay rate shared by both speed limits.
    pub speed_decay_rate: f64,
    /// Decay rate shared by acceleration and deceleration.
    pub acc_decay_rate:   f64,
}

impl Default for KinematicsParams {
    fn default() -> Self {
        Self {
            speed_up_empty:   2.5,
            speed_up_full:    1.75,
            speed_down_empty: 2.5,
            speed_down_full:  2.0,
            acc_empty:        1.0,
            acc_full:         0.6,
            dec_empty:        1.0,
            dec_full:         0.7,
            speed_decay_rate: 1.5,
            acc_decay_rate:   1.2,
        }
    }
}

// ── EnergyParams ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyParams {
    /// Empty car mass, kg.
    pub car_mass:           f64,
    pub counterweight_mass: f64,
    /// Guide-rail and rope friction, J per metre travelled.
    pub friction_per_meter: f64,
    /// Fraction of drive energy that becomes useful work, `(0, 1]`.
    pub motor_efficiency:   f64,
    /// Background draw (lighting, controller, ventilation), W.
    pub standby_power:      f64,
    pub gravity:            f64,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            car_mass:           1000.0,
            counterweight_mass: 1450.0,
            friction_per_meter: 120.0,
            motor_efficiency:   0.8,
            standby_power:      150.0,
            gravity:            9.81,
        }
    }
}

// ── DwellParams ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DwellParams {
    /// Fixed door open/close time, s.
    pub base:                 f64,
    /// Seconds per kg moved through the doors below the threshold.
    pub normal_rate:          f64,
    /// Seconds per kg moved through the doors above the threshold.
    pub congested_rate:       f64,
    /// Boarding + alighting mass, kg, at which the doorway congests.
    pub congestion_threshold: f64,
}

impl Default for DwellParams {
    fn default() -> Self {
        Self {
            base:                 2.0,
            normal_rate:          0.01,
            congested_rate:       0.025,
            congestion_threshold: 400.0,
        }
    }
}

// ── Objective ─────────────────────────────────────────────────────────────────

/// Linear weights of the scalar cost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveWeights {
    /// Cost per second of passenger waiting.
    pub wait:                 f64,
    /// Cost per second of passenger riding.
    pub ride:                 f64,
    /// Cost per joule of running energy.
    pub energy:               f64,
    /// Extra multiple of `energy` charged on empty-car energy.
    pub emptyload_multiplier: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            wait:                 1.0,
            ride:                 1.0,
            energy:               1e-3,
            emptyload_multiplier: 2.0,
        }
    }
}

/// Convex surcharge on individual waits longer than `threshold` seconds:
///
/// ```text
/// penalty(w) = scale · ((w − threshold) / threshold)^exponent   for w > threshold
/// ```
///
/// With `threshold == 0` the excess is used unnormalised.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitPenalty {
    pub scale:     f64,
    pub exponent:  f64,
    pub threshold: f64,
}

impl Default for WaitPenalty {
    fn default() -> Self {
        Self {
            scale:     60.0,
            exponent:  1.5,
            threshold: 25.0,
        }
    }
}

// ── HorizonParams ─────────────────────────────────────────────────────────────

/// Rolling-horizon policy tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HorizonParams {
    /// Seconds past the earliest unassigned arrival that join a batch.
    pub lookahead_window:  f64,
    /// Batch cap.  `0` means `max(3 × elevator_count, 1)`.
    pub max_batch:         usize,
    /// Costs within this distance are treated as tied.
    pub tie_epsilon:       f64,
    /// Weight of the finish-time term added to every candidate cost.
    pub finish_time_bias:  f64,
    /// Predicted destinations kept per request before renormalising.
    pub destination_top_k: usize,
}

impl Default for HorizonParams {
    fn default() -> Self {
        Self {
            lookahead_window:  240.0,
            max_batch:         36,
            tie_epsilon:       1e-9,
            finish_time_bias:  1e-6,
            destination_top_k: 3,
        }
    }
}

impl HorizonParams {
    /// Batch cap with the `0 = auto` rule applied.
    pub fn effective_batch(&self, elevator_count: usize) -> usize {
        if self.max_batch == 0 {
            (elevator_count * 3).max(1)
        } else {
            self.max_batch
        }
    }
}

// ── LiftConfig ────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically built by the application (or deserialized with the `serde`
/// feature) and passed by reference to policies, the simulator, and the
/// objective model.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiftConfig {
    pub building:     BuildingConfig,
    pub kinematics:   KinematicsParams,
    pub energy:       EnergyParams,
    pub dwell:        DwellParams,
    pub weights:      ObjectiveWeights,
    pub wait_penalty: WaitPenalty,
    pub horizon:      HorizonParams,
}

impl LiftConfig {
    /// Reject missing or contradictory tunables.
    pub fn validate(&self) -> LiftResult<()> {
        let b = &self.building;
        if b.floor_count < 1 {
            return Err(config_err(format!("floor_count must be ≥ 1, got {}", b.floor_count)));
        }
        if b.elevator_count == 0 {
            return Err(config_err("elevator_count must be ≥ 1".into()));
        }
        positive("floor_height", b.floor_height)?;
        positive("capacity", b.capacity)?;
        if !b.contains(b.initial_floor) {
            return Err(config_err(format!(
                "initial_floor {} outside 1..={}",
                b.initial_floor, b.floor_count
            )));
        }

        let k = &self.kinematics;
        for (name, v) in [
            ("speed_up_empty", k.speed_up_empty),
            ("speed_up_full", k.speed_up_full),
            ("speed_down_empty", k.speed_down_empty),
            ("speed_down_full", k.speed_down_full),
            ("acc_empty", k.acc_empty),
            ("acc_full", k.acc_full),
            ("dec_empty", k.dec_empty),
            ("dec_full", k.dec_full),
        ] {
            positive(name, v)?;
        }
        non_negative("speed_decay_rate", k.speed_decay_rate)?;
        non_negative("acc_decay_rate", k.acc_decay_rate)?;

        let e = &self.energy;
        non_negative("car_mass", e.car_mass)?;
        non_negative("counterweight_mass", e.counterweight_mass)?;
        non_negative("friction_per_meter", e.friction_per_meter)?;
        non_negative("standby_power", e.standby_power)?;
        positive("gravity", e.gravity)?;
        if !(e.motor_efficiency > 0.0 && e.motor_efficiency <= 1.0) {
            return Err(config_err(format!(
                "motor_efficiency must lie in (0, 1], got {}",
                e.motor_efficiency
            )));
        }

        let d = &self.dwell;
        non_negative("dwell base", d.base)?;
        non_negative("normal_rate", d.normal_rate)?;
        non_negative("congested_rate", d.congested_rate)?;
        non_negative("congestion_threshold", d.congestion_threshold)?;

        let w = &self.weights;
        non_negative("wait weight", w.wait)?;
        non_negative("ride weight", w.ride)?;
        non_negative("energy weight", w.energy)?;
        non_negative("emptyload_multiplier", w.emptyload_multiplier)?;

        let p = &self.wait_penalty;
        non_negative("wait penalty scale", p.scale)?;
        non_negative("wait penalty threshold", p.threshold)?;
        if !(p.exponent.is_finite() && p.exponent >= 1.0) {
            return Err(config_err(format!(
                "wait penalty exponent must be ≥ 1 to stay convex, got {}",
                p.exponent
            )));
        }

        let h = &self.horizon;
        non_negative("lookahead_window", h.lookahead_window)?;
        non_negative("tie_epsilon", h.tie_epsilon)?;
        non_negative("finish_time_bias", h.finish_time_bias)?;
        if h.destination_top_k == 0 {
            return Err(config_err("destination_top_k must be ≥ 1".into()));
        }
        Ok(())
    }

    /// Reject a request that no car in this building could ever serve.
    pub fn validate_request(&self, req: &Request) -> LiftResult<()> {
        let invalid = |reason: String| LiftError::Validation { request: req.id, reason };
        let b = &self.building;

        if !(req.load.is_finite() && req.load > 0.0) {
            return Err(invalid(format!("load must be positive, got {}", req.load)));
        }
        if req.load > b.capacity {
            return Err(invalid(format!(
                "load {} kg exceeds car capacity {} kg",
                req.load, b.capacity
            )));
        }
        if !b.contains(req.origin) {
            return Err(invalid(format!("origin {} outside 1..={}", req.origin, b.floor_count)));
        }
        if !b.contains(req.destination) {
            return Err(invalid(format!(
                "destination {} outside 1..={}",
                req.destination, b.floor_count
            )));
        }
        if !(req.arrival_time.is_finite() && req.arrival_time >= 0.0) {
            return Err(invalid(format!(
                "arrival_time must be finite and ≥ 0, got {}",
                req.arrival_time
            )));
        }
        Ok(())
    }

    /// Validate every request and reject duplicate IDs.
    pub fn validate_requests<'a, I>(&self, requests: I) -> LiftResult<()>
    where
        I: IntoIterator<Item = &'a Request>,
    {
        let mut seen = HashSet::new();
        for req in requests {
            self.validate_request(req)?;
            if !seen.insert(req.id) {
                return Err(LiftError::Validation {
                    request: req.id,
                    reason:  "duplicate request id".into(),
                });
            }
        }
        Ok(())
    }

    /// Reject a car resting on a floor this building does not have.
    pub fn validate_elevators(&self, elevators: &[ElevatorState]) -> LiftResult<()> {
        let b = &self.building;
        match elevators.iter().find(|car| !b.contains(car.floor)) {
            Some(car) => Err(config_err(format!(
                "{} rests at floor {} outside 1..={}",
                car.id, car.floor, b.floor_count
            ))),
            None => Ok(()),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config_err(msg: String) -> LiftError {
    LiftError::Config(msg)
}

fn positive(name: &str, v: f64) -> LiftResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(config_err(format!("{name} must be positive, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> LiftResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(config_err(format!("{name} must be finite and ≥ 0, got {v}")))
    }
}
