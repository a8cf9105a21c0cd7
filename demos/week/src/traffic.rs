//! Synthetic office-tower demand.
//!
//! A weekday has a lobby-up morning peak, a mixed midday, a down-to-lobby
//! evening peak and a thin night; a weekend is a flatter, smaller version.
//! Each day is generated from its own seed so days are reproducible on
//! their own.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};

use lift_core::{Floor, Request, RequestId};
use lift_policy::DayType;

const LOBBY: Floor = 1;

/// One demand period of a day.
struct Period {
    start:   f64,
    end:     f64,
    /// Gaussian arrival peak `(mean, sigma)`, or uniform when `None`.
    peak:    Option<(f64, f64)>,
    count:   usize,
    /// Share of trips leaving the lobby.
    up:      f64,
    /// Share of trips heading to the lobby.  The rest are interfloor.
    down:    f64,
    load:    (f64, f64),
}

fn h(hours: f64) -> f64 {
    hours * 3_600.0
}

fn periods(day_type: DayType, scale: f64) -> Vec<Period> {
    let n = |base: f64| (base * scale).round() as usize;
    match day_type {
        DayType::Weekday => vec![
            Period { start: h(7.0),  end: h(10.0), peak: Some((h(8.5), h(0.4))),  count: n(260.0), up: 0.80, down: 0.10, load: (60.0, 150.0) },
            Period { start: h(10.0), end: h(17.0), peak: None,                      count: n(220.0), up: 0.35, down: 0.35, load: (50.0, 110.0) },
            Period { start: h(17.0), end: h(20.0), peak: Some((h(18.0), h(0.4))), count: n(240.0), up: 0.10, down: 0.80, load: (60.0, 150.0) },
            Period { start: h(20.0), end: h(23.5), peak: None,                      count: n(40.0),  up: 0.30, down: 0.50, load: (50.0, 110.0) },
        ],
        DayType::Weekend => vec![
            Period { start: h(9.0),  end: h(18.0), peak: None,                      count: n(160.0), up: 0.40, down: 0.40, load: (50.0, 120.0) },
            Period { start: h(18.0), end: h(23.0), peak: None,                      count: n(60.0),  up: 0.30, down: 0.50, load: (50.0, 110.0) },
        ],
    }
}

/// All requests of one day, sorted by arrival and numbered from `first_id`.
pub fn generate_day(
    day_type:    DayType,
    floor_count: Floor,
    scale:       f64,
    seed:        u64,
    first_id:    u32,
) -> Result<Vec<Request>, NormalError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut trips: Vec<(Floor, Floor, f64, f64)> = Vec::new();

    for p in periods(day_type, scale) {
        let peak = p.peak.map(|(mean, sigma)| Normal::new(mean, sigma)).transpose()?;
        for _ in 0..p.count {
            let (origin, destination) = trip(&mut rng, floor_count, p.up, p.down);
            let load = rng.gen_range(p.load.0..p.load.1);
            let arrival = match &peak {
                Some(normal) => normal.sample(&mut rng).clamp(p.start, p.end),
                None => rng.gen_range(p.start..p.end),
            };
            trips.push((origin, destination, load, arrival));
        }
    }

    trips.sort_by(|a, b| a.3.total_cmp(&b.3));
    Ok(trips
        .into_iter()
        .zip(first_id..)
        .map(|((o, d, load, t), id)| Request::new(RequestId(id), o, d, load, t))
        .collect())
}

fn trip(rng: &mut SmallRng, floor_count: Floor, up: f64, down: f64) -> (Floor, Floor) {
    if floor_count <= LOBBY {
        return (LOBBY, LOBBY);
    }
    let upper = |rng: &mut SmallRng| rng.gen_range(LOBBY + 1..=floor_count);
    let u: f64 = rng.r#gen();
    if floor_count == LOBBY + 1 || u < up {
        (LOBBY, upper(rng))
    } else if u < up + down {
        (upper(rng), LOBBY)
    } else {
        let origin = upper(rng);
        let mut destination = upper(rng);
        while destination == origin {
            destination = upper(rng);
        }
        (origin, destination)
    }
}
