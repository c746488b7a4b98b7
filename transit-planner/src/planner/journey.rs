//! Reconstructed journeys.
//!
//! A `Journey` is the sequence of trips ridden from the search origin to one
//! settled station, recovered by walking moment back-pointers to the seed.

use crate::domain::{ServiceTime, StopIdx, StopTimeIdx, TripIdx};
use crate::schedule::Schedule;

/// One ride on one trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    /// Trip ridden
    pub trip: TripIdx,
    /// Stop time boarded
    pub board: StopTimeIdx,
    /// Stop time left
    pub alight: StopTimeIdx,
}

impl Leg {
    /// Returns the stop where this leg is boarded.
    pub fn board_stop(&self, schedule: &Schedule) -> StopIdx {
        schedule.stop_time(self.board).stop
    }

    /// Returns the stop where this leg ends.
    pub fn alight_stop(&self, schedule: &Schedule) -> StopIdx {
        schedule.stop_time(self.alight).stop
    }

    pub fn departure(&self, schedule: &Schedule) -> ServiceTime {
        schedule.stop_time(self.board).departure
    }

    pub fn arrival(&self, schedule: &Schedule) -> ServiceTime {
        schedule.stop_time(self.alight).arrival
    }
}

/// The trips ridden from the origin to a destination, in order.
///
/// # Invariants
///
/// - each leg departs no earlier than the previous leg arrives
/// - an empty journey means the destination is the origin station
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    origin: StopIdx,
    destination: StopIdx,
    start: ServiceTime,
    arrival: ServiceTime,
    legs: Vec<Leg>,
}

impl Journey {
    pub(crate) fn new(
        origin: StopIdx,
        destination: StopIdx,
        start: ServiceTime,
        arrival: ServiceTime,
        legs: Vec<Leg>,
    ) -> Self {
        Self {
            origin,
            destination,
            start,
            arrival,
            legs,
        }
    }

    /// Returns the stop the search started from.
    pub fn origin(&self) -> StopIdx {
        self.origin
    }

    /// Returns the stop the journey ends at.
    pub fn destination(&self) -> StopIdx {
        self.destination
    }

    /// Returns the search start time.
    pub fn start(&self) -> ServiceTime {
        self.start
    }

    /// Returns the arrival time at the destination.
    pub fn arrival(&self) -> ServiceTime {
        self.arrival
    }

    /// Returns the time the first leg departs, or the start time if there
    /// are no legs.
    pub fn departure(&self, schedule: &Schedule) -> ServiceTime {
        self.legs
            .first()
            .map_or(self.start, |leg| leg.departure(schedule))
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the number of changes between trips.
    pub fn transfers(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    /// Returns true if no trip is ridden.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Returns the total time from search start to arrival.
    pub fn duration(&self) -> chrono::Duration {
        self.arrival.signed_duration_since(self.start)
    }
}
