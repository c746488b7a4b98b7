//! Reachable spacetime events.
//!
//! A [`Moment`] says "you can be at this stop at this time". Every moment
//! except the search seed records the ride that produced it: which stop
//! time was boarded, which was alighted, and the settled moment the rider
//! boarded from. Following `from` pointers walks back to the seed. The
//! pointers are arena indices, so the chain is plain data with no shared
//! ownership.

use std::fmt;

use crate::domain::{ServiceTime, StopIdx, StopTimeIdx};

/// Index of a settled moment in a search's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MomentIdx(pub u32);

impl MomentIdx {
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MomentIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ride that produced a moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ride {
    /// Stop time where the trip was boarded
    pub board: StopTimeIdx,
    /// Stop time where the trip was left
    pub alight: StopTimeIdx,
    /// Settled moment the rider boarded from
    pub from: MomentIdx,
}

/// Arrival at a stop at a time.
///
/// Ordering is by time, then stop, then ride, which gives the search
/// frontier a total, deterministic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Moment {
    /// Arrival time
    pub time: ServiceTime,
    /// Stop (platform) arrived at
    pub stop: StopIdx,
    /// How we got here; `None` for the seed
    pub ride: Option<Ride>,
}

impl Moment {
    /// The starting point of a search.
    pub fn seed(stop: StopIdx, time: ServiceTime) -> Self {
        Self {
            time,
            stop,
            ride: None,
        }
    }

    /// Returns true if this is a search seed.
    pub fn is_seed(&self) -> bool {
        self.ride.is_none()
    }
}
