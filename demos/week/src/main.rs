//! week — runs the assignment policies over a synthetic week.
//!
//! Each policy drives its own bank of cars for seven days; a car's final
//! floor on one day is its resting floor the next morning.  The learned
//! rolling-horizon variant prices hall calls with destination frequencies
//! observed on the days before.
//!
//! With a CSV path argument (`id,origin,destination,load,arrival_time`) the
//! file is run as a single weekday instead.
//!
//! Set `RUST_LOG=debug` for per-run summaries, `trace` for every stop.

mod traffic;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::info;

use lift_core::{ElevatorId, ElevatorState, Floor, LiftConfig, Request};
use lift_input::load_requests_csv;
use lift_models::{
    compute_objective, compute_theoretical_limit, summarize_passenger_metrics, wait_times,
    ObjectiveBreakdown,
};
use lift_policy::{AssignmentPolicy, DayType, EmpiricalPredictor, GreedyBaseline, RollingHorizon};
use lift_sim::{served_requests, DispatchObserver, Dispatcher, StopEvent};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:         u64   = 42;
const DAYS:         usize = 7;
/// Multiplier on the built-in demand profile.
const DEMAND_SCALE: f64   = 1.0;
const WEEKDAYS:     [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

// ── Observer ──────────────────────────────────────────────────────────────────

/// Door-cycle statistics for one run.
#[derive(Default)]
struct StopStats {
    stops:      usize,
    dwell:      f64,
    peak_load:  f64,
    full_stops: usize,
    capacity:   f64,
}

impl StopStats {
    fn new(capacity: f64) -> Self {
        Self { capacity, ..Self::default() }
    }
}

impl DispatchObserver for StopStats {
    fn on_stop(&mut self, stop: &StopEvent) {
        self.stops += 1;
        self.dwell += stop.dwell;
        self.peak_load = self.peak_load.max(stop.load_after);
        if stop.load_after >= 0.9 * self.capacity {
            self.full_stops += 1;
        }
    }
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Default)]
struct DayResult {
    served:          usize,
    objective:       ObjectiveBreakdown,
    bound:           f64,
    mean_wait:       f64,
    p95_wait:        f64,
    max_wait:        f64,
    mean_journey:    f64,
    energy_kwh:      f64,
    empty_share:     f64,
}

/// One policy with the bank of cars it drives all week.
struct Strategy {
    name:   &'static str,
    cars:   Vec<ElevatorState>,
    totals: DayResult,
}

impl Strategy {
    fn new(name: &'static str, config: &LiftConfig) -> Self {
        let b = &config.building;
        Self {
            name,
            cars: ElevatorState::bank(b.elevator_count, b.initial_floor),
            totals: DayResult::default(),
        }
    }

    fn resting_floors(&self) -> Vec<(ElevatorId, Floor)> {
        self.cars.iter().map(|c| (c.id, c.floor)).collect()
    }

    fn add(&mut self, day: &DayResult) {
        let t = &mut self.totals;
        t.served += day.served;
        t.objective.total += day.objective.total;
        t.objective.wait_cost += day.objective.wait_cost;
        t.objective.ride_cost += day.objective.ride_cost;
        t.objective.running_energy_cost += day.objective.running_energy_cost;
        t.objective.emptyload_energy_cost += day.objective.emptyload_energy_cost;
        t.bound += day.bound;
        t.energy_kwh += day.energy_kwh;
        t.max_wait = t.max_wait.max(day.max_wait);
    }
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (q * (sorted.len() - 1) as f64).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

// ── One run ───────────────────────────────────────────────────────────────────

fn run_day(
    policy:   &dyn AssignmentPolicy,
    requests: &[Request],
    cars:     &mut [ElevatorState],
    config:   &LiftConfig,
) -> Result<(DayResult, StopStats)> {
    policy.assign(requests, cars, config)?;

    let mut stats = StopStats::new(config.building.capacity);
    let outcome = Dispatcher::new(config)?.run(cars, &mut stats)?;

    let metrics = summarize_passenger_metrics(config, served_requests(cars));
    let objective = compute_objective(
        config,
        metrics.total_wait_time,
        metrics.total_in_cab_time,
        outcome.emptyload_energy,
        outcome.total_energy,
        metrics.wait_penalty_total,
    );
    let bound = compute_theoretical_limit(config, served_requests(cars));

    let mut waits = wait_times(served_requests(cars));
    waits.sort_by(f64::total_cmp);
    let n = metrics.served_count.max(1) as f64;

    let day = DayResult {
        served:       metrics.served_count,
        objective,
        bound:        bound.breakdown.total,
        mean_wait:    metrics.total_wait_time / n,
        p95_wait:     percentile(&waits, 0.95),
        max_wait:     waits.last().copied().unwrap_or(0.0),
        mean_journey: metrics.total_passenger_time / n,
        energy_kwh:   outcome.total_energy / 3.6e6,
        empty_share:  if outcome.total_energy > 0.0 {
            outcome.emptyload_energy / outcome.total_energy
        } else {
            0.0
        },
    };
    Ok((day, stats))
}

fn print_row(label: &str, name: &str, d: &DayResult, stats: &StopStats) {
    println!(
        "  {label:<9} {name:<16} {:>5} {:>11.0} {:>11.0} {:>7.1} {:>7.1} {:>7.1} {:>8.1} {:>7.2} {:>5.0}% {:>6} {:>6.0} {:>5}",
        d.served,
        d.objective.total,
        d.bound,
        d.mean_wait,
        d.p95_wait,
        d.max_wait,
        d.mean_journey,
        d.energy_kwh,
        100.0 * d.empty_share,
        stats.stops,
        stats.peak_load,
        stats.full_stops,
    );
}

fn print_header() {
    println!(
        "  {:<9} {:<16} {:>5} {:>11} {:>11} {:>7} {:>7} {:>7} {:>8} {:>7} {:>6} {:>6} {:>6} {:>5}",
        "day", "policy", "n", "objective", "bound", "wait", "p95", "max", "journey", "kWh", "empty", "stops", "peak", "full"
    );
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LiftConfig::default();
    config.validate()?;
    let b = &config.building;

    println!("=== week — liftsim policy comparison ===");
    println!(
        "Floors: {}  |  Cars: {} × {:.0} kg  |  Window: {:.0} s  |  Batch: {}",
        b.floor_count,
        b.elevator_count,
        b.capacity,
        config.horizon.lookahead_window,
        config.horizon.effective_batch(b.elevator_count),
    );
    println!();

    if let Some(path) = std::env::args().nth(1) {
        return run_file(Path::new(&path), &config);
    }

    let mut strategies = [
        Strategy::new("greedy", &config),
        Strategy::new("rolling-horizon", &config),
        Strategy::new("horizon+learned", &config),
    ];
    let mut history = EmpiricalPredictor::new();
    let mut next_id = 1u32;
    let t0 = Instant::now();

    print_header();
    for day in 0..DAYS {
        let day_type = DayType::from_weekday(day);
        let requests = traffic::generate_day(day_type, b.floor_count, DEMAND_SCALE, SEED + day as u64, next_id)?;
        next_id += requests.len() as u32;
        let label = WEEKDAYS[day % 7];

        let greedy = GreedyBaseline;
        let horizon = RollingHorizon::new().day_type(day_type);
        let learned = RollingHorizon::with_predictor(history.clone()).day_type(day_type);
        let policies: [&dyn AssignmentPolicy; 3] = [&greedy, &horizon, &learned];

        for (strategy, policy) in strategies.iter_mut().zip(policies) {
            let (result, stats) = run_day(policy, &requests, &mut strategy.cars, &config)?;
            print_row(label, strategy.name, &result, &stats);
            strategy.add(&result);
        }

        for req in &requests {
            history.observe(req, day_type);
        }
        info!("day {}: {} requests, predictor has {} trips", day + 1, requests.len(), history.len());
    }

    println!();
    println!("Weekly totals ({:.1} s wall):", t0.elapsed().as_secs_f64());
    for s in &strategies {
        let t = &s.totals;
        let o = &t.objective;
        println!(
            "  {:<16} served {:>5}  objective {:>11.0} (wait {:>9.0}, ride {:>9.0}, energy {:>7.0}, empty {:>7.0})  bound {:>10.0}  {:>6.1} kWh  max wait {:>5.0} s",
            s.name, t.served, o.total, o.wait_cost, o.ride_cost, o.running_energy_cost, o.emptyload_energy_cost, t.bound, t.energy_kwh, t.max_wait,
        );
        println!("  {:<16} resting floors {:?}", "", s.resting_floors());
    }
    Ok(())
}

/// Run a recorded request stream once per policy.
fn run_file(path: &Path, config: &LiftConfig) -> Result<()> {
    let requests = load_requests_csv(path)?;
    println!("Loaded {} requests from {}", requests.len(), path.display());
    println!();

    let greedy = GreedyBaseline;
    let horizon = RollingHorizon::new();
    let policies: [&dyn AssignmentPolicy; 2] = [&greedy, &horizon];

    print_header();
    for policy in policies {
        let mut strategy = Strategy::new("", config);
        let (result, stats) = run_day(policy, &requests, &mut strategy.cars, config)?;
        print_row("file", policy.name(), &result, &stats);
    }
    Ok(())
}
