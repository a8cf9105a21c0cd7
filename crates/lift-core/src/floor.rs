//! Floor numbering and travel direction.

use std::fmt;

/// A floor number.  Floors are numbered `1..=floor_count`; signed so that
/// floor differences need no casts.
pub type Floor = i32;

/// Direction of a car movement or of a passenger trip.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` to `to`, or `None` for a same-floor trip.
    #[inline]
    pub fn between(from: Floor, to: Floor) -> Option<Direction> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less    => Some(Direction::Down),
            std::cmp::Ordering::Equal   => None,
        }
    }

    /// Sign of gravitational work: `+1.0` up, `-1.0` down.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up   => 1.0,
            Direction::Down => -1.0,
        }
    }

    /// `true` if `floor` lies strictly ahead of `from` when moving this way.
    #[inline]
    pub fn is_ahead(self, from: Floor, floor: Floor) -> bool {
        match self {
            Direction::Up   => floor > from,
            Direction::Down => floor < from,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up   => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
