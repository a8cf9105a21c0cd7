//! One car's event loop.

use std::collections::VecDeque;

use log::{trace, warn};

use lift_core::{Direction, ElevatorId, Floor, LiftConfig, Request};
use lift_models::{hold_time, standby_energy, TravelSegment};

use crate::{DispatchObserver, ElevatorRun, SimError, SimResult, StopEvent};

/// Loads at or below this are an empty car.
const EMPTY_LOAD: f64 = 1e-9;

/// Slack when comparing a boarding group against remaining capacity.
const CAPACITY_SLACK: f64 = 1e-9;

// ── Direction helpers ─────────────────────────────────────────────────────────

/// Where the passengers aboard want to go, seen from `floor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnboardHeading {
    /// Every passenger not yet home lies this way.
    Toward(Direction),
    /// Every passenger's destination is `floor` itself.
    Arrived,
    /// Destinations lie both above and below; boarding should prevent this.
    Mixed,
}

pub fn onboard_heading(onboard: &[Request], floor: Floor) -> OnboardHeading {
    let mut up = false;
    let mut down = false;
    for req in onboard {
        match Direction::between(floor, req.destination) {
            Some(Direction::Up)   => up = true,
            Some(Direction::Down) => down = true,
            None                  => {}
        }
    }
    match (up, down) {
        (true, true)   => OnboardHeading::Mixed,
        (true, false)  => OnboardHeading::Toward(Direction::Up),
        (false, true)  => OnboardHeading::Toward(Direction::Down),
        (false, false) => OnboardHeading::Arrived,
    }
}

/// Nearest floor strictly ahead of `floor` that is an onboard destination or
/// the origin of a waiting request travelling the same way.
pub fn next_stop(
    direction: Direction,
    floor:     Floor,
    onboard:   &[Request],
    waiting:   &[Request],
) -> Option<Floor> {
    let destinations = onboard.iter().map(|r| r.destination);
    let origins = waiting
        .iter()
        .filter(|r| r.direction() == Some(direction))
        .map(|r| r.origin);
    let ahead = destinations
        .chain(origins)
        .filter(|&f| direction.is_ahead(floor, f));
    match direction {
        Direction::Up   => ahead.min(),
        Direction::Down => ahead.max(),
    }
}

// ── CarRun ────────────────────────────────────────────────────────────────────

/// Simulation state for a single car.  Built, run to completion, discarded.
pub(crate) struct CarRun<'a, O: DispatchObserver> {
    cfg:      &'a LiftConfig,
    observer: &'a mut O,
    id:       ElevatorId,

    initial_floor: Floor,
    floor:         Floor,
    time:          f64,

    /// Not yet called, ascending arrival time.
    pending: VecDeque<Request>,
    /// Called, standing at their origin.
    waiting: Vec<Request>,
    onboard: Vec<Request>,
    /// Completed, in drop-off order.
    served:  Vec<Request>,

    running_time:     f64,
    energy:           f64,
    emptyload_energy: f64,
}

impl<'a, O: DispatchObserver> CarRun<'a, O> {
    pub(crate) fn new(
        cfg:      &'a LiftConfig,
        observer: &'a mut O,
        id:       ElevatorId,
        floor:    Floor,
        queue:    Vec<Request>,
    ) -> Self {
        let mut pending = queue;
        pending.sort_by(|a, b| a.arrival_time.total_cmp(&b.arrival_time));
        for req in &mut pending {
            req.reset_service();
        }
        Self {
            cfg,
            observer,
            id,
            initial_floor: floor,
            floor,
            time: 0.0,
            pending: pending.into(),
            waiting: Vec::new(),
            onboard: Vec::new(),
            served: Vec::new(),
            running_time: 0.0,
            energy: 0.0,
            emptyload_energy: 0.0,
        }
    }

    /// Serve every queued request.  Returns the car totals and the served
    /// requests in completion order.
    pub(crate) fn run(mut self) -> SimResult<(ElevatorRun, Vec<Request>)> {
        self.observer.on_elevator_start(self.id, self.floor, self.pending.len());

        loop {
            self.pull_ready();

            if self.waiting.is_empty() && self.onboard.is_empty() {
                let Some(next_call) = self.pending.front().map(|r| r.arrival_time) else {
                    break;
                };
                self.idle_until(next_call);
                self.pull_ready();
            }

            let direction = if self.onboard.is_empty() {
                match self.pick_up() {
                    Some(d) => d,
                    None => continue,
                }
            } else {
                match onboard_heading(&self.onboard, self.floor) {
                    OnboardHeading::Toward(d) => d,
                    OnboardHeading::Arrived => {
                        warn!(
                            "{}: {} passengers aboard with no destination ahead of floor {}; releasing",
                            self.id,
                            self.onboard.len(),
                            self.floor
                        );
                        self.process_stop(Vec::new());
                        continue;
                    }
                    OnboardHeading::Mixed => {
                        return Err(SimError::MixedOnboardDirections {
                            elevator: self.id,
                            floor:    self.floor,
                        });
                    }
                }
            };

            self.serve_direction(direction)?;
        }

        self.finish()
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Move every request whose call time has passed into `waiting`.
    fn pull_ready(&mut self) {
        while let Some(front) = self.pending.front() {
            if front.arrival_time > self.time {
                break;
            }
            if let Some(req) = self.pending.pop_front() {
                self.waiting.push(req);
            }
        }
    }

    /// Park until `t`, drawing standby power.
    fn idle_until(&mut self, t: f64) {
        if t > self.time {
            self.energy += standby_energy(&self.cfg.energy, t - self.time);
            self.time = t;
        }
    }

    /// Empty car: drive to the earliest (then nearest) waiting call and board
    /// every compatible group there.  Returns the direction to serve, or
    /// `None` if nobody heading somewhere is aboard afterwards.
    fn pick_up(&mut self) -> Option<Direction> {
        let floor = self.floor;
        let target = self.waiting.iter().min_by(|a, b| {
            a.arrival_time
                .total_cmp(&b.arrival_time)
                .then_with(|| (a.origin - floor).abs().cmp(&(b.origin - floor).abs()))
        })?;
        let (origin, direction) = (target.origin, target.direction());

        self.travel_to(origin);
        let boarders = self.boarders_here(direction);
        self.process_stop(boarders);

        match direction {
            Some(d) if !self.onboard.is_empty() => Some(d),
            _ => None,
        }
    }

    /// Sweep in `direction` until nothing lies ahead.  The first step must
    /// find a stop: a sweep that cannot move with passengers aboard is an
    /// error.
    fn serve_direction(&mut self, direction: Direction) -> SimResult<()> {
        let mut moved = false;
        while !self.onboard.is_empty() {
            self.pull_ready();
            let Some(next) = next_stop(direction, self.floor, &self.onboard, &self.waiting) else {
                if moved {
                    break;
                }
                return Err(SimError::NoProgress {
                    elevator: self.id,
                    floor:    self.floor,
                });
            };
            moved = true;
            self.travel_to(next);
            let boarders = self.boarders_here(Some(direction));
            self.process_stop(boarders);
        }
        Ok(())
    }

    // ── Primitives ────────────────────────────────────────────────────────

    fn load(&self) -> f64 {
        self.onboard.iter().map(|r| r.load).sum()
    }

    /// Indices into `waiting` of groups at this floor that may board a car
    /// heading `direction`: same direction, or a same-floor trip.
    fn boarders_here(&self, direction: Option<Direction>) -> Vec<usize> {
        self.waiting
            .iter()
            .enumerate()
            .filter(|(_, r)| r.origin == self.floor)
            .filter(|(_, r)| r.direction().is_none() || r.direction() == direction)
            .map(|(i, _)| i)
            .collect()
    }

    fn travel_to(&mut self, to: Floor) {
        if to == self.floor {
            return;
        }
        let load = self.load();
        let seg = TravelSegment::between(self.cfg, load, self.floor, to);
        self.observer.on_travel(self.id, self.floor, to, self.time, load, &seg);

        self.time += seg.duration;
        self.running_time += seg.duration;
        self.energy += seg.energy();
        if load <= EMPTY_LOAD {
            self.emptyload_energy += seg.energy();
        }
        self.floor = to;
        self.pull_ready();
    }

    /// Open the doors: alight everyone destined here, then admit `candidates`
    /// (indices into `waiting`) in order while capacity lasts.
    fn process_stop(&mut self, candidates: Vec<usize>) {
        let floor = self.floor;
        let arrived_at = self.time;

        let (leavers, staying): (Vec<Request>, Vec<Request>) = std::mem::take(&mut self.onboard)
            .into_iter()
            .partition(|r| r.destination == floor);
        self.onboard = staying;
        let alighting_weight: f64 = leavers.iter().map(|r| r.load).sum();

        let mut remaining = (self.cfg.building.capacity - self.load()).max(0.0);
        let mut admit = vec![false; self.waiting.len()];
        for i in candidates {
            let load = self.waiting[i].load;
            if load <= remaining + CAPACITY_SLACK {
                admit[i] = true;
                remaining -= load;
            }
        }
        let (boarders, left_behind): (Vec<_>, Vec<_>) = std::mem::take(&mut self.waiting)
            .into_iter()
            .zip(admit)
            .partition(|(_, admitted)| *admitted);
        self.waiting = left_behind.into_iter().map(|(r, _)| r).collect();
        let boarders: Vec<Request> = boarders.into_iter().map(|(r, _)| r).collect();

        if leavers.is_empty() && boarders.is_empty() {
            return;
        }

        let boarding_weight: f64 = boarders.iter().map(|r| r.load).sum();
        let dwell = hold_time(&self.cfg.dwell, boarding_weight, alighting_weight);
        self.time += dwell;
        self.running_time += dwell;
        self.energy += standby_energy(&self.cfg.energy, dwell);

        let (alighted, boarded) = (leavers.len(), boarders.len());
        for mut req in leavers {
            req.destination_arrival_time = Some(arrived_at);
            req.dropoff_time = Some(self.time);
            self.served.push(req);
        }
        for mut req in boarders {
            req.origin_arrival_time = Some(arrived_at);
            req.pickup_time = Some(self.time);
            if req.destination == floor {
                req.destination_arrival_time = Some(arrived_at);
                req.dropoff_time = Some(self.time);
                self.served.push(req);
            } else {
                self.onboard.push(req);
            }
        }

        let stop = StopEvent {
            elevator: self.id,
            floor,
            arrived_at,
            dwell,
            boarded,
            alighted,
            boarding_weight,
            alighting_weight,
            load_after: self.load(),
        };
        trace!(
            "{} floor {} t={:.1}: +{} −{} load {:.0} kg",
            self.id, floor, arrived_at, boarded, alighted, stop.load_after
        );
        self.observer.on_stop(&stop);
        self.pull_ready();
    }

    #[cfg(test)]
    pub(crate) fn with_onboard(mut self, onboard: Vec<Request>) -> Self {
        self.onboard = onboard;
        self
    }

    #[cfg(test)]
    pub(crate) fn sweep(&mut self, direction: Direction) -> SimResult<()> {
        self.serve_direction(direction)
    }

    #[cfg(test)]
    pub(crate) fn floor(&self) -> Floor {
        self.floor
    }

    fn finish(self) -> SimResult<(ElevatorRun, Vec<Request>)> {
        if let Some(req) = self.served.iter().find(|r| !r.is_served()) {
            return Err(SimError::IncompleteTimestamps {
                elevator: self.id,
                request:  req.id,
            });
        }
        let run = ElevatorRun {
            elevator:         self.id,
            initial_floor:    self.initial_floor,
            final_floor:      self.floor,
            served:           self.served.len(),
            running_time:     self.running_time,
            energy:           self.energy,
            emptyload_energy: self.emptyload_energy,
        };
        self.observer.on_elevator_end(&run);
        Ok((run, self.served))
    }
}
