//! Rolling-horizon assignment.
//!
//! # Algorithm
//!
//! Each car carries a projected `(floor, time)`: where it will be, and when,
//! once it has served everything committed to it so far.  The projection is
//! analytic (the same kinematics, energy and dwell models the simulator
//! uses) and ignores collective-control sharing, so it is an upper bound on
//! the car's real busy time.
//!
//! ```text
//! while unassigned ≠ ∅:
//!   batch  ← unassigned with arrival ≤ t₀ + window, padded by arrival order
//!            to the batch cap (t₀ = earliest unassigned arrival)
//!   price  every (request, car) pair in the batch
//!   choose min cost → min finish → min passenger time → fairness cursor
//!   commit the pair; the car's projection jumps to the finish state
//! ```
//!
//! The fairness cursor only moves when the last step actually had to break a
//! tie between several cars, so unambiguous choices never disturb it.

use log::{debug, warn};

use lift_core::{ElevatorState, Floor, LiftConfig, Request};
use lift_models::{hold_time, standby_energy, TravelSegment};

use crate::policy::{by_arrival, prepare};
use crate::predictor::SECONDS_PER_DAY;
use crate::{AssignmentPolicy, CertainDestination, DayType, DestinationPredictor, PolicyResult};

// ── Projection ────────────────────────────────────────────────────────────────

/// A car's projected position once its committed work is done.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanState {
    pub floor: Floor,
    pub time:  f64,
}

/// Price of appending one request to a car's plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostEstimate {
    /// Weighted scalar, including the finish-time bias.
    pub cost:           f64,
    /// Time the car would drop the request off.
    pub finish_time:    f64,
    /// `finish_time − arrival_time`.
    pub passenger_time: f64,
}

/// Price serving `req` next, with `destination` standing in for its
/// destination, starting from `plan`.
///
/// The car runs empty to the origin, waits for the call if early, dwells for
/// the group to board, then carries it to `destination`.  Energy covers both
/// moves plus standby power during travel and dwell.
pub fn estimate_incremental_cost(
    cfg:         &LiftConfig,
    plan:        PlanState,
    req:         &Request,
    destination: Floor,
) -> CostEstimate {
    let to_origin = TravelSegment::between(cfg, 0.0, plan.floor, req.origin);
    let start = (plan.time + to_origin.duration).max(req.arrival_time);
    let dwell = hold_time(&cfg.dwell, req.load, 0.0);
    let to_dest = TravelSegment::between(cfg, req.load, req.origin, destination);
    let finish_time = start + dwell + to_dest.duration;

    let energy = to_origin.energy() + standby_energy(&cfg.energy, dwell) + to_dest.energy();
    let w = &cfg.weights;
    let cost = w.wait * (start - req.arrival_time)
        + w.ride * (finish_time - start)
        + w.energy * energy
        + cfg.horizon.finish_time_bias * finish_time;

    CostEstimate {
        cost,
        finish_time,
        passenger_time: finish_time - req.arrival_time,
    }
}

// ── RollingHorizon ────────────────────────────────────────────────────────────

/// Batched incremental-cost heuristic ("MPC-lite").
///
/// `P` prices hall calls whose destination the dispatcher would not know;
/// the default [`CertainDestination`] uses the true destination.
#[derive(Clone, Debug, Default)]
pub struct RollingHorizon<P: DestinationPredictor = CertainDestination> {
    predictor: P,
    /// Calendar class handed to the predictor.
    day_type:  DayType,
}

impl RollingHorizon<CertainDestination> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: DestinationPredictor> RollingHorizon<P> {
    pub fn with_predictor(predictor: P) -> Self {
        Self {
            predictor,
            day_type: DayType::default(),
        }
    }

    pub fn day_type(mut self, day_type: DayType) -> Self {
        self.day_type = day_type;
        self
    }

    pub fn set_day_type(&mut self, day_type: DayType) {
        self.day_type = day_type;
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Destinations used to price `req`, with weights summing to one.
    ///
    /// The predictor's `destination_top_k` most likely in-building floors
    /// other than the origin (probability descending, floor ascending on
    /// ties), renormalised.  Falls back to the true destination with
    /// certainty when the predictor has nothing usable.
    pub fn destination_candidates(&self, req: &Request, cfg: &LiftConfig) -> Vec<(Floor, f64)> {
        let time_of_day = req.arrival_time.rem_euclid(SECONDS_PER_DAY);
        let mut ranked: Vec<(Floor, f64)> = self
            .predictor
            .predict_distribution(req.origin, time_of_day, self.day_type)
            .into_iter()
            .filter(|&(floor, p)| {
                p.is_finite() && p > 0.0 && floor != req.origin && cfg.building.contains(floor)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(cfg.horizon.destination_top_k);

        // Scale by the largest mass first so huge raw masses cannot overflow the sum.
        let Some(&(_, peak)) = ranked.first() else {
            return vec![(req.destination, 1.0)];
        };
        let total: f64 = ranked.iter().map(|&(_, p)| p / peak).sum();
        ranked
            .into_iter()
            .map(|(floor, p)| (floor, p / peak / total))
            .collect()
    }

    /// Probability-weighted estimate over [`destination_candidates`][Self::destination_candidates].
    /// `None` if any term is not finite.
    fn expected_cost(&self, cfg: &LiftConfig, plan: PlanState, req: &Request) -> Option<CostEstimate> {
        let mut expected = CostEstimate {
            cost:           0.0,
            finish_time:    0.0,
            passenger_time: 0.0,
        };
        for (destination, p) in self.destination_candidates(req, cfg) {
            let e = estimate_incremental_cost(cfg, plan, req, destination);
            expected.cost += p * e.cost;
            expected.finish_time += p * e.finish_time;
            expected.passenger_time += p * e.passenger_time;
        }
        let finite = expected.cost.is_finite()
            && expected.finish_time.is_finite()
            && expected.passenger_time.is_finite();
        finite.then_some(expected)
    }
}

impl<P: DestinationPredictor> AssignmentPolicy for RollingHorizon<P> {
    fn name(&self) -> &str {
        "rolling-horizon"
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

        let h = &config.horizon;
        let n = elevators.len();
        let batch_cap = h.effective_batch(n);
        let eps = h.tie_epsilon;

        let mut unassigned = by_arrival(requests);
        let mut plans: Vec<PlanState> = elevators
            .iter()
            .map(|car| PlanState { floor: car.floor, time: 0.0 })
            .collect();
        let mut cursor = 0usize;
        let mut stalls = 0usize;

        while !unassigned.is_empty() {
            let batch = select_batch(&unassigned, h.lookahead_window, batch_cap);

            let mut options: Vec<Candidate> = Vec::with_capacity(batch * n);
            for pos in 0..batch {
                for (car, plan) in plans.iter().enumerate() {
                    if let Some(est) = self.expected_cost(config, *plan, &unassigned[pos]) {
                        options.push(Candidate { est, pos, car });
                    }
                }
            }

            let (pos, car, finish) = match pick(&options, eps, cursor, n) {
                Some((c, tied)) => {
                    if tied {
                        cursor = (c.car + 1) % n;
                    }
                    (c.pos, c.car, c.est.finish_time)
                }
                None => {
                    stalls += 1;
                    let (pos, car, next_cursor) = stall_fallback(&plans);
                    let finish = self
                        .expected_cost(config, plans[car], &unassigned[pos])
                        .map_or(plans[car].time, |e| e.finish_time);
                    warn!(
                        "rolling-horizon: no finite estimate for a batch of {batch}; {} falls back to {}",
                        unassigned[pos].id, elevators[car].id
                    );
                    cursor = next_cursor;
                    (pos, car, finish)
                }
            };

            let req = unassigned.remove(pos);
            plans[car] = PlanState {
                floor: req.destination,
                time:  finish,
            };
            elevators[car].queue.push(req);
        }

        debug!(
            "rolling-horizon: {} requests over {} cars (batch cap {batch_cap}, {stalls} stalls), queue lengths {:?}",
            requests.len(),
            n,
            elevators.iter().map(|c| c.queue.len()).collect::<Vec<_>>()
        );
        Ok(())
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
struct Candidate {
    est: CostEstimate,
    /// Index into the arrival-sorted unassigned list.
    pos: usize,
    /// Index into the elevator slice.
    car: usize,
}

/// Batch length over `unassigned` (sorted by arrival): everything within
/// `window` of the head, capped at `cap`; fewer than `cap` are padded with
/// the next arrivals.  Never zero for a non-empty list.
pub(crate) fn select_batch(unassigned: &[Request], window: f64, cap: usize) -> usize {
    let Some(head) = unassigned.first() else {
        return 0;
    };
    let cap = cap.max(1);
    let limit = head.arrival_time + window;
    let in_window = unassigned
        .iter()
        .take_while(|r| r.arrival_time <= limit)
        .count()
        .min(cap);
    in_window.max(cap.min(unassigned.len()))
}

/// Lexicographic choice: cost, finish time, passenger time (each within
/// `eps` of the minimum), then the car nearest the cursor going round.
/// Returns the winner and whether more than one option survived to the
/// cursor step.
fn pick(options: &[Candidate], eps: f64, cursor: usize, n: usize) -> Option<(Candidate, bool)> {
    let min_cost = options.iter().map(|c| c.est.cost).min_by(f64::total_cmp)?;
    let tied: Vec<&Candidate> = options.iter().filter(|c| c.est.cost <= min_cost + eps).collect();

    let min_finish = tied.iter().map(|c| c.est.finish_time).min_by(f64::total_cmp)?;
    let tied: Vec<&Candidate> = tied.into_iter().filter(|c| c.est.finish_time <= min_finish + eps).collect();

    let min_passenger = tied.iter().map(|c| c.est.passenger_time).min_by(f64::total_cmp)?;
    let tied: Vec<&Candidate> = tied
        .into_iter()
        .filter(|c| c.est.passenger_time <= min_passenger + eps)
        .collect();

    let winner = tied
        .iter()
        .min_by_key(|c| ((c.car + n - cursor % n) % n, c.car, c.pos))?;
    Some((**winner, tied.len() > 1))
}

/// Assignment when nothing in the batch could be priced: the earliest
/// request goes to the car with the earliest projected free time (lowest
/// index on ties) and the cursor moves past that car.
///
/// Returns `(pos, car, cursor)`.
pub(crate) fn stall_fallback(plans: &[PlanState]) -> (usize, usize, usize) {
    let car = plans
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.time.total_cmp(&b.1.time))
        .map_or(0, |(i, _)| i);
    (0, car, (car + 1) % plans.len().max(1))
}
