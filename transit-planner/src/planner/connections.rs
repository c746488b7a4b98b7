//! Onward departures from a station.
//!
//! Given a station and the time a traveller is standing on it, enumerate
//! every departure from any of its platforms within the wait window
//! `(now, now + max_wait]`. Departures strictly after `now` only: a vehicle
//! leaving at the instant of arrival cannot be boarded.

use chrono::Duration;

use crate::domain::{ServiceTime, StopIdx, StopTimeIdx, TripIdx};
use crate::schedule::Schedule;

/// A candidate boarding event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Departure {
    /// When the vehicle leaves
    pub time: ServiceTime,
    /// The trip to board
    pub trip: TripIdx,
    /// The stop time being boarded
    pub stop_time: StopTimeIdx,
}

/// List departures leaving `station` within the wait window after `now`.
///
/// `station` may be any stop; it is resolved to its canonical station and
/// every platform of that station is searched. A trip calling at two
/// platforms of the same station yields two departures.
///
/// Results are ordered by platform (station first), then by departure time.
pub fn leaves_from_station(
    schedule: &Schedule,
    station: StopIdx,
    now: ServiceTime,
    max_wait: Duration,
) -> Vec<Departure> {
    let latest = now.saturating_add(max_wait);
    let mut departures = Vec::new();

    for &platform in schedule.stations().platforms(station) {
        let at_platform = schedule.departures_at(platform);

        // Sorted by departure: skip everything at or before `now`.
        let first = at_platform.partition_point(|idx| schedule.stop_time(*idx).departure <= now);

        for &idx in &at_platform[first..] {
            let stop_time = schedule.stop_time(idx);
            if stop_time.departure > latest {
                break;
            }
            departures.push(Departure {
                time: stop_time.departure,
                trip: stop_time.trip,
                stop_time: idx,
            });
        }
    }

    departures
}
