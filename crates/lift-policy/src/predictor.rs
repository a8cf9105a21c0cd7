//! Destination prediction for the rolling-horizon cost estimate.
//!
//! A hall call reveals only the origin floor.  A `DestinationPredictor`
//! turns `(origin, time of day, day type)` into a probability mass over
//! destination floors; [`RollingHorizon`][crate::RollingHorizon] then prices
//! each candidate assignment as an expectation over the most likely floors.

use std::collections::BTreeMap;

use lift_core::{Floor, Request};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Calendar class of a simulated day.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub enum DayType {
    #[default]
    Weekday,
    Weekend,
}

impl DayType {
    /// Day index `0..7` with Monday as 0; Saturday and Sunday are weekend.
    pub fn from_weekday(index: usize) -> DayType {
        if index % 7 >= 5 {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }
}

/// Injectable destination model.
///
/// Return an empty map when there is nothing to say; the caller then prices
/// the request at its true destination.  Probabilities need not sum to one.
pub trait DestinationPredictor: Send + Sync {
    fn predict_distribution(
        &self,
        origin:      Floor,
        time_of_day: f64,
        day_type:    DayType,
    ) -> BTreeMap<Floor, f64>;
}

/// Knows nothing: every request is priced at its true destination.
#[derive(Clone, Copy, Debug, Default)]
pub struct CertainDestination;

impl DestinationPredictor for CertainDestination {
    fn predict_distribution(&self, _origin: Floor, _time_of_day: f64, _day_type: DayType) -> BTreeMap<Floor, f64> {
        BTreeMap::new()
    }
}

// ── EmpiricalPredictor ────────────────────────────────────────────────────────

/// Destination frequencies observed in past requests, bucketed by
/// `(day type, hour of day, origin)`.
///
/// Trips that start and end on the same floor are not counted, so the
/// origin never appears in a prediction.
#[derive(Clone, Debug, Default)]
pub struct EmpiricalPredictor {
    counts: BTreeMap<(DayType, u32, Floor), BTreeMap<Floor, u32>>,
}

impl EmpiricalPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(request, day type)` pairs.
    pub fn from_history<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = (&'a Request, DayType)>,
    {
        let mut p = Self::new();
        for (req, day_type) in history {
            p.observe(req, day_type);
        }
        p
    }

    pub fn observe(&mut self, req: &Request, day_type: DayType) {
        if req.origin == req.destination {
            return;
        }
        let key = (day_type, hour_of_day(req.arrival_time), req.origin);
        *self
            .counts
            .entry(key)
            .or_default()
            .entry(req.destination)
            .or_insert(0) += 1;
    }

    /// Number of trips observed.
    pub fn len(&self) -> usize {
        self.counts.values().flat_map(|m| m.values()).map(|&n| n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl DestinationPredictor for EmpiricalPredictor {
    fn predict_distribution(&self, origin: Floor, time_of_day: f64, day_type: DayType) -> BTreeMap<Floor, f64> {
        let key = (day_type, hour_of_day(time_of_day), origin);
        let Some(bucket) = self.counts.get(&key) else {
            return BTreeMap::new();
        };
        let total: u32 = bucket.values().sum();
        if total == 0 {
            return BTreeMap::new();
        }
        bucket
            .iter()
            .map(|(&floor, &n)| (floor, f64::from(n) / f64::from(total)))
            .collect()
    }
}

/// Hour `0..24` of a time given in seconds since the start of some day.
fn hour_of_day(t: f64) -> u32 {
    ((t.rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u32).min(23)
}
