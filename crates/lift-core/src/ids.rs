//! Strongly typed identifier wrappers.
//!
//! Elevator IDs are 1-based (`ElevatorId(1)` is the first car) because the
//! Greedy Baseline breaks ties on the lowest ID and reports refer to cars by
//! their building number.  Request IDs are whatever the request source
//! assigned; they only need to be unique within one run.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Building number of one car, starting at 1.
    pub struct ElevatorId(u32) => "car";
}

typed_id! {
    /// Identifier of one passenger-group trip.
    pub struct RequestId(u32) => "req";
}

impl ElevatorId {
    /// Build the ID for the car at zero-based slot `index` in an elevator slice.
    #[inline]
    pub fn from_index(index: usize) -> ElevatorId {
        ElevatorId(index as u32 + 1)
    }
}
