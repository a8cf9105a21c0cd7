//! Tests for the dispatch simulator.

use lift_core::{Direction, ElevatorId, ElevatorState, Floor, LiftConfig, LiftError, Request, RequestId};
use lift_models::{hold_time, standby_energy, TravelSegment};

use crate::*;

const EPS: f64 = 1e-9;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn req(id: u32, origin: Floor, destination: Floor, load: f64, arrival: f64) -> Request {
    Request::new(RequestId(id), origin, destination, load, arrival)
}

fn one_car(floor: Floor, queue: Vec<Request>) -> Vec<ElevatorState> {
    let mut cars = ElevatorState::bank(1, floor);
    cars[0].queue = queue;
    cars
}

fn served_by_id(cars: &[ElevatorState], id: u32) -> Request {
    *served_requests(cars)
        .find(|r| r.id == RequestId(id))
        .unwrap_or_else(|| panic!("req#{id} not served"))
}

#[derive(Default)]
struct Recorder {
    starts:  usize,
    travels: usize,
    stops:   Vec<StopEvent>,
    ends:    Vec<ElevatorRun>,
}

impl DispatchObserver for Recorder {
    fn on_elevator_start(&mut self, _elevator: ElevatorId, _floor: Floor, _queued: usize) {
        self.starts += 1;
    }

    fn on_travel(
        &mut self,
        _elevator: ElevatorId,
        _from:     Floor,
        _to:       Floor,
        _depart:   f64,
        _load:     f64,
        _segment:  &TravelSegment,
    ) {
        self.travels += 1;
    }

    fn on_stop(&mut self, stop: &StopEvent) {
        self.stops.push(*stop);
    }

    fn on_elevator_end(&mut self, run: &ElevatorRun) {
        self.ends.push(run.clone());
    }
}

// ── Direction helpers ─────────────────────────────────────────────────────────

#[cfg(test)]
mod heading_tests {
    use super::*;

    #[test]
    fn all_above_heads_up() {
        let onboard = [req(1, 1, 5, 60.0, 0.0), req(2, 1, 9, 60.0, 0.0)];
        assert_eq!(onboard_heading(&onboard, 3), OnboardHeading::Toward(Direction::Up));
    }

    #[test]
    fn passengers_home_are_ignored() {
        let onboard = [req(1, 9, 3, 60.0, 0.0), req(2, 9, 5, 60.0, 0.0)];
        assert_eq!(onboard_heading(&onboard, 5), OnboardHeading::Toward(Direction::Down));
    }

    #[test]
    fn everyone_home_is_arrived() {
        let onboard = [req(1, 1, 4, 60.0, 0.0)];
        assert_eq!(onboard_heading(&onboard, 4), OnboardHeading::Arrived);
        assert_eq!(onboard_heading(&[], 4), OnboardHeading::Arrived);
    }

    #[test]
    fn both_ways_is_mixed() {
        let onboard = [req(1, 5, 9, 60.0, 0.0), req(2, 5, 2, 60.0, 0.0)];
        assert_eq!(onboard_heading(&onboard, 5), OnboardHeading::Mixed);
    }

    #[test]
    fn next_stop_takes_nearest_ahead() {
        let onboard = [req(1, 1, 9, 60.0, 0.0)];
        let waiting = [
            req(2, 6, 12, 60.0, 0.0), // same direction, ahead
            req(3, 4, 1, 60.0, 0.0),  // opposite direction: skipped
            req(4, 2, 8, 60.0, 0.0),  // behind
        ];
        assert_eq!(next_stop(Direction::Up, 3, &onboard, &waiting), Some(6));
    }

    #[test]
    fn next_stop_going_down_takes_highest_below() {
        let onboard = [req(1, 12, 2, 60.0, 0.0)];
        let waiting = [req(2, 7, 3, 60.0, 0.0), req(3, 9, 4, 60.0, 0.0)];
        assert_eq!(next_stop(Direction::Down, 10, &onboard, &waiting), Some(9));
    }

    #[test]
    fn next_stop_none_when_nothing_ahead() {
        let onboard = [req(1, 1, 3, 60.0, 0.0)];
        assert_eq!(next_stop(Direction::Up, 3, &onboard, &[]), None);
    }
}

// ── Event loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn two_groups_board_together_and_alight_in_order() {
        let cfg = LiftConfig::default();
        let mut cars = one_car(1, vec![req(1, 1, 10, 60.0, 0.0), req(2, 1, 5, 60.0, 0.0)]);
        let outcome = Dispatcher::new(&cfg).unwrap().run_quiet(&mut cars).unwrap();

        let (a, b) = (served_by_id(&cars, 1), served_by_id(&cars, 2));
        let dwell = hold_time(&cfg.dwell, 120.0, 0.0);

        assert_eq!(a.origin_arrival_time, Some(0.0));
        assert_eq!(b.origin_arrival_time, Some(0.0));
        assert!((a.pickup_time.unwrap() - dwell).abs() < EPS);
        assert_eq!(a.pickup_time, b.pickup_time);

        let to_five = TravelSegment::between(&cfg, 120.0, 1, 5).duration;
        assert!((b.destination_arrival_time.unwrap() - (dwell + to_five)).abs() < EPS);
        assert!(b.dropoff_time.unwrap() < a.destination_arrival_time.unwrap());

        // Completion order.
        let order: Vec<_> = cars[0].served_requests.iter().map(|r| r.id.0).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(cars[0].floor, 10);
        assert_eq!(outcome.served_count(), 2);
        assert!(cars[0].queue.is_empty());
    }

    #[test]
    fn picks_up_same_direction_calls_on_the_way() {
        let cfg = LiftConfig::default();
        let mut cars = one_car(10, vec![req(1, 8, 2, 80.0, 0.0), req(2, 6, 3, 80.0, 0.0)]);
        Dispatcher::new(&cfg).unwrap().run_quiet(&mut cars).unwrap();

        let order: Vec<_> = cars[0].served_requests.iter().map(|r| r.id.0).collect();
        assert_eq!(order, vec![2, 1]);
        let (a, b) = (served_by_id(&cars, 1), served_by_id(&cars, 2));
        assert!(a.pickup_time.unwrap() < b.origin_arrival_time.unwrap());
        assert!(b.dropoff_time.unwrap() <= a.destination_arrival_time.unwrap());
    }

    #[test]
    fn idle_gap_costs_standby_but_not_running_time() {
        let cfg = LiftConfig::default();
        let mut cars = one_car(1, vec![req(1, 1, 2, 70.0, 100.0)]);
        let outcome = Dispatcher::new(&cfg).unwrap().run_quiet(&mut cars).unwrap();

        let r = served_by_id(&cars, 1);
        assert_eq!(r.origin_arrival_time, Some(100.0));
        assert_eq!(r.wait_time(), Some(0.0));

        let seg = TravelSegment::between(&cfg, 70.0, 1, 2);
        let dwell = hold_time(&cfg.dwell, 70.0, 0.0) + hold_time(&cfg.dwell, 0.0, 70.0);
        assert!((outcome.total_running_time - (seg.duration + dwell)).abs() < EPS);

        let expected = standby_energy(&cfg.energy, 100.0)
            + seg.energy()
            + standby_energy(&cfg.energy, dwell);
        assert!((outcome.total_energy - expected).abs() < 1e-6);
        assert_eq!(outcome.emptyload_energy, 0.0);
    }

    #[test]
    fn empty_travel_is_tracked_separately() {
        let cfg = LiftConfig::default();
        let mut cars = one_car(1, vec![req(1, 5, 1, 70.0, 0.0)]);
        let outcome = Dispatcher::new(&cfg).unwrap().run_quiet(&mut cars).unwrap();

        let empty = TravelSegment::between(&cfg, 0.0, 1, 5).energy();
        assert!((outcome.emptyload_energy - empty).abs() < 1e-6);
        assert!(outcome.total_energy > outcome.emptyload_energy);
        assert_eq!(cars[0].floor, 1);
    }

    #[test]
    fn same_floor_request_is_served_at_origin() {
        let cfg = LiftConfig::default();
        let mut cars = one_car(1, vec![req(1, 3, 3, 50.0, 0.0)]);
        Dispatcher::new(&cfg).unwrap().run_quiet(&mut cars).unwrap();

        let r = served_by_id(&cars, 1);
        assert!(r.is_served());
        assert_eq!(r.in_cab_time(), Some(0.0));
        assert_eq!(r.pickup_time, r.dropoff_time);
        assert_eq!(cars[0].floor, 3);
    }

    #[test]
    fn group_that_does_not_fit_waits_for_the_next_trip() {
        let cfg = LiftConfig::default();
        let mut cars = one_car(1, vec![req(1, 1, 5, 700.0, 0.0), req(2, 1, 6, 700.0, 0.0)]);
        let mut rec = Recorder::default();
        Dispatcher::new(&cfg).unwrap().run(&mut cars, &mut rec).unwrap();

        let (a, b) = (served_by_id(&cars, 1), served_by_id(&cars, 2));
        assert_eq!(a.origin_arrival_time, Some(0.0));
        assert!(b.origin_arrival_time.unwrap() > a.dropoff_time.unwrap());
        assert!(rec.stops.iter().all(|s| s.load_after <= cfg.building.capacity + EPS));
    }

    #[test]
    fn observer_sees_every_phase() {
        let cfg = LiftConfig::default();
        let mut cars = ElevatorState::bank(2, 1);
        cars[0].queue = vec![req(1, 1, 4, 60.0, 0.0)];
        cars[1].queue = vec![req(2, 3, 1, 60.0, 5.0)];
        let mut rec = Recorder::default();
        let outcome = Dispatcher::new(&cfg).unwrap().run(&mut cars, &mut rec).unwrap();

        assert_eq!(rec.starts, 2);
        assert_eq!(rec.ends, outcome.runs);
        assert_eq!(rec.travels, 3);
        assert_eq!(rec.stops.len(), 4);
    }

    #[test]
    fn empty_queue_is_a_no_op() {
        let cfg = LiftConfig::default();
        let mut cars = ElevatorState::bank(3, 7);
        let outcome = Dispatcher::new(&cfg).unwrap().run_quiet(&mut cars).unwrap();
        assert_eq!(outcome.total_energy, 0.0);
        assert!(cars.iter().all(|c| c.floor == 7 && c.served_requests.is_empty()));
    }

    #[test]
    fn stale_timestamps_are_cleared_before_simulating() {
        let cfg = LiftConfig::default();
        let mut stale = req(1, 2, 6, 60.0, 10.0);
        stale.pickup_time = Some(-5.0);
        let mut cars = one_car(2, vec![stale]);
        Dispatcher::new(&cfg).unwrap().run_quiet(&mut cars).unwrap();
        assert!(served_by_id(&cars, 1).pickup_time.unwrap() >= 10.0);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let cfg = LiftConfig::default();
        let queue: Vec<_> = (0..20)
            .map(|i| req(i, 1 + (i as i32 * 7) % 15, 1 + (i as i32 * 4 + 3) % 15, 75.0, i as f64 * 9.0))
            .collect();

        let mut first = one_car(1, queue.clone());
        let mut second = one_car(1, queue);
        let d = Dispatcher::new(&cfg).unwrap();
        let o1 = d.run_quiet(&mut first).unwrap();
        let o2 = d.run_quiet(&mut second).unwrap();

        assert_eq!(o1, o2);
        assert_eq!(first[0].served_requests, second[0].served_requests);
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn overweight_request_fails_before_any_car_moves() {
        let cfg = LiftConfig::default();
        let mut cars = ElevatorState::bank(2, 1);
        cars[0].queue = vec![req(1, 1, 5, 60.0, 0.0)];
        cars[1].queue = vec![req(2, 1, 5, 1200.0, 0.0)];
        let mut rec = Recorder::default();

        let err = Dispatcher::new(&cfg).unwrap().run(&mut cars, &mut rec).unwrap_err();
        assert!(matches!(
            err,
            SimError::Setup(LiftError::Validation { request: RequestId(2), .. })
        ));
        assert_eq!(rec.starts, 0);
        assert_eq!(cars[0].queue.len(), 1);
        assert!(cars[0].served_requests.is_empty());
    }

    #[test]
    fn duplicate_ids_across_cars_are_rejected() {
        let cfg = LiftConfig::default();
        let mut cars = ElevatorState::bank(2, 1);
        cars[0].queue = vec![req(1, 1, 5, 60.0, 0.0)];
        cars[1].queue = vec![req(1, 2, 5, 60.0, 0.0)];
        assert!(Dispatcher::new(&cfg).unwrap().run_quiet(&mut cars).is_err());
    }

    #[test]
    fn car_parked_off_the_building_is_rejected() {
        let cfg = LiftConfig::default();
        let mut cars = one_car(40, vec![req(1, 1, 5, 60.0, 0.0)]);
        let mut rec = Recorder::default();

        let err = Dispatcher::new(&cfg).unwrap().run(&mut cars, &mut rec).unwrap_err();
        assert!(matches!(err, SimError::Setup(LiftError::Config(_))));
        assert_eq!(rec.starts, 0);
        assert_eq!(cars[0].floor, 40);
        assert_eq!(cars[0].queue.len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = LiftConfig::default();
        cfg.building.capacity = 0.0;
        assert!(matches!(Dispatcher::new(&cfg), Err(SimError::Setup(LiftError::Config(_)))));
    }
}

// ── Loop invariants ───────────────────────────────────────────────────────────

#[cfg(test)]
mod invariant_tests {
    use super::*;
    use crate::car::CarRun;

    /// A passenger already aboard, picked up at `origin` at t = 0.
    fn aboard(id: u32, origin: Floor, destination: Floor) -> Request {
        let mut r = req(id, origin, destination, 70.0, 0.0);
        r.origin_arrival_time = Some(0.0);
        r.pickup_time = Some(0.0);
        r
    }

    #[test]
    fn passengers_already_home_are_released_in_place() {
        let cfg = LiftConfig::default();
        let mut rec = Recorder::default();
        let (run, served) = CarRun::new(&cfg, &mut rec, ElevatorId::from_index(0), 5, Vec::new())
            .with_onboard(vec![aboard(1, 1, 5)])
            .run()
            .unwrap();

        assert_eq!(served.len(), 1);
        assert!(served[0].is_served());
        assert_eq!(served[0].destination_arrival_time, Some(0.0));
        assert_eq!(run.final_floor, 5);
        assert_eq!(run.running_time, hold_time(&cfg.dwell, 0.0, 70.0));
        assert_eq!(rec.travels, 0);
        assert_eq!(rec.stops.len(), 1);
        assert_eq!(rec.stops[0].alighted, 1);
    }

    #[test]
    fn passengers_heading_both_ways_abort_the_run() {
        let cfg = LiftConfig::default();
        let mut rec = Recorder::default();
        let err = CarRun::new(&cfg, &mut rec, ElevatorId::from_index(0), 5, Vec::new())
            .with_onboard(vec![aboard(1, 1, 9), aboard(2, 8, 2)])
            .run()
            .unwrap_err();

        assert!(matches!(
            err,
            SimError::MixedOnboardDirections { floor: 5, .. }
        ));
        assert!(rec.ends.is_empty());
    }

    #[test]
    fn sweep_away_from_every_passenger_is_no_progress() {
        let cfg = LiftConfig::default();
        let mut observer = NoopObserver;
        let mut car = CarRun::new(&cfg, &mut observer, ElevatorId::from_index(0), 5, Vec::new())
            .with_onboard(vec![aboard(1, 1, 9)]);

        assert!(matches!(
            car.sweep(Direction::Down),
            Err(SimError::NoProgress { floor: 5, .. })
        ));
        assert_eq!(car.floor(), 5);

        car.sweep(Direction::Up).unwrap();
        assert_eq!(car.floor(), 9);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_requests() -> impl Strategy<Value = Vec<Request>> {
        prop::collection::vec((1i32..=15, 1i32..=15, 10.0f64..400.0, 0.0f64..900.0), 0..40)
            .prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (o, d, load, t))| req(i as u32, o, d, load, t))
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn every_request_is_served_once_with_ordered_timestamps(
            requests in arb_requests(),
            start in 1i32..=15,
        ) {
            let cfg = LiftConfig::default();
            let mut cars = ElevatorState::bank(3, start);
            for (i, r) in requests.iter().enumerate() {
                cars[i % 3].queue.push(*r);
            }
            let mut rec = Recorder::default();
            let outcome = Dispatcher::new(&cfg).unwrap().run(&mut cars, &mut rec).unwrap();

            prop_assert_eq!(outcome.served_count(), requests.len());
            let mut ids: Vec<_> = served_requests(&cars).map(|r| r.id).collect();
            ids.sort();
            let mut expected: Vec<_> = requests.iter().map(|r| r.id).collect();
            expected.sort();
            prop_assert_eq!(ids, expected);

            for r in served_requests(&cars) {
                let (o, p, d, a) = (
                    r.origin_arrival_time.unwrap(),
                    r.pickup_time.unwrap(),
                    r.dropoff_time.unwrap(),
                    r.destination_arrival_time.unwrap(),
                );
                prop_assert!(r.arrival_time <= o + EPS);
                prop_assert!(o <= p && p <= d && a <= d);
                if r.origin != r.destination {
                    prop_assert!(p <= a);
                }
            }
            for s in &rec.stops {
                prop_assert!(s.load_after <= cfg.building.capacity + EPS);
            }
            prop_assert!(outcome.emptyload_energy <= outcome.total_energy + EPS);
        }
    }
}

// ── Parallel path ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod parallel_tests {
    use super::*;

    #[test]
    fn parallel_matches_sequential() {
        let cfg = LiftConfig::default();
        let mut seq = ElevatorState::bank(4, 1);
        for i in 0..40u32 {
            let origin = 1 + (i as i32 * 3) % 15;
            let destination = 1 + (i as i32 * 11 + 5) % 15;
            seq[(i % 4) as usize].queue.push(req(i, origin, destination, 90.0, f64::from(i) * 7.0));
        }
        let mut par = seq.clone();

        let d = Dispatcher::new(&cfg).unwrap();
        let a = d.run_quiet(&mut seq).unwrap();
        let b = d.run_parallel(&mut par).unwrap();

        assert_eq!(a, b);
        for (x, y) in seq.iter().zip(&par) {
            assert_eq!(x.served_requests, y.served_requests);
            assert_eq!(x.floor, y.floor);
        }
    }
}
