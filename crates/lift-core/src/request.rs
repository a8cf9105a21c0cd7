//! The passenger-group trip record.
//!
//! # Lifecycle
//!
//! A `Request` is created by the request source with only its trip fields
//! set.  Policies copy it into an elevator queue untouched; the dispatch
//! simulator stamps the four service timestamps as the car serves it.
//!
//! Once served, the timestamps satisfy
//!
//! ```text
//! arrival_time ≤ origin_arrival_time ≤ pickup_time ≤ dropoff_time
//! destination_arrival_time ≤ dropoff_time
//! ```

use crate::{Direction, Floor, RequestId};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub id:           RequestId,
    pub origin:       Floor,
    pub destination:  Floor,
    /// Passenger-group mass, kg.
    pub load:         f64,
    /// Seconds since the start of the run at which the hall call is placed.
    pub arrival_time: f64,

    /// Doors finished closing with the group aboard.
    pub pickup_time:              Option<f64>,
    /// Doors finished closing after the group left.
    pub dropoff_time:             Option<f64>,
    /// Car reached the origin floor (before dwell).
    pub origin_arrival_time:      Option<f64>,
    /// Car reached the destination floor (before dwell).
    pub destination_arrival_time: Option<f64>,
}

impl Request {
    /// A fresh, unserved request.
    pub fn new(
        id:           RequestId,
        origin:       Floor,
        destination:  Floor,
        load:         f64,
        arrival_time: f64,
    ) -> Self {
        Self {
            id,
            origin,
            destination,
            load,
            arrival_time,
            pickup_time:              None,
            dropoff_time:             None,
            origin_arrival_time:      None,
            destination_arrival_time: None,
        }
    }

    /// Trip direction, or `None` for a same-floor request.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        Direction::between(self.origin, self.destination)
    }

    /// Clear all service timestamps (a request may be re-simulated).
    pub fn reset_service(&mut self) {
        self.pickup_time              = None;
        self.dropoff_time             = None;
        self.origin_arrival_time      = None;
        self.destination_arrival_time = None;
    }

    /// `true` once all four service timestamps are set.
    pub fn is_served(&self) -> bool {
        self.pickup_time.is_some()
            && self.dropoff_time.is_some()
            && self.origin_arrival_time.is_some()
            && self.destination_arrival_time.is_some()
    }

    /// Time spent waiting for the car: `origin_arrival − arrival`, clamped at 0.
    pub fn wait_time(&self) -> Option<f64> {
        self.origin_arrival_time
            .map(|t| (t - self.arrival_time).max(0.0))
    }

    /// Time from the car reaching the origin to it reaching the destination.
    pub fn in_cab_time(&self) -> Option<f64> {
        match (self.origin_arrival_time, self.destination_arrival_time) {
            (Some(o), Some(d)) => Some((d - o).max(0.0)),
            _ => None,
        }
    }

    /// Total passenger time: `destination_arrival − arrival`, clamped at 0.
    pub fn passenger_time(&self) -> Option<f64> {
        self.destination_arrival_time
            .map(|t| (t - self.arrival_time).max(0.0))
    }
}
