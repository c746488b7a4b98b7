//! Trips and their scheduled stop visits.

use std::ops::Range;

use super::{ServiceTime, StopIdx, StopTimeIdx, TripId, TripIdx};

/// One scheduled run of a vehicle along an ordered sequence of stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    /// Feed identifier
    pub id: TripId,
    /// Route this trip runs on
    pub route_id: String,
    /// Direction or terminus shown to passengers
    pub headsign: String,
    /// This trip's run of the stop-time arena, in stop_sequence order.
    pub(crate) stop_times: Range<u32>,
}

impl Trip {
    /// Returns the indices of this trip's stop times, in travel order.
    pub fn stop_time_indices(&self) -> impl Iterator<Item = StopTimeIdx> {
        self.stop_times.clone().map(StopTimeIdx)
    }

    /// Returns the number of stops this trip makes.
    pub fn len(&self) -> usize {
        self.stop_times.len()
    }

    /// Returns true if the trip has no stop times.
    pub fn is_empty(&self) -> bool {
        self.stop_times.is_empty()
    }
}

/// One scheduled visit of a trip to a stop.
///
/// # Invariants
///
/// - `arrival <= departure`
/// - within a trip, `sequence` strictly increases and the departure at one
///   stop is no later than the arrival at the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    /// Trip making this visit
    pub trip: TripIdx,
    /// Stop (platform) visited
    pub stop: StopIdx,
    /// Scheduled arrival
    pub arrival: ServiceTime,
    /// Scheduled departure
    pub departure: ServiceTime,
    /// Feed stop_sequence; may have gaps
    pub sequence: u32,
    /// Zero-based position within the trip
    pub position: u32,
}

impl StopTime {
    /// Returns how long the vehicle dwells at this stop.
    pub fn dwell(&self) -> chrono::Duration {
        self.departure.signed_duration_since(self.arrival)
    }
}
