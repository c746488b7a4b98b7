//! Downstream arrivals on a boarded trip.
//!
//! Boarding a trip makes every later stop of that trip reachable in one
//! step, so the expander yields a moment for each of them rather than just
//! the next stop.

use crate::schedule::Schedule;

use super::connections::Departure;
use super::moment::{Moment, MomentIdx, Ride};

/// List every arrival reachable by staying on the departure's trip.
///
/// Yields a moment for each stop time of the trip whose arrival is strictly
/// after the departure time. Each moment's ride points back at the boarded
/// stop time and at `origin`, the settled moment the rider boarded from.
pub fn arrivals_from_departure(
    schedule: &Schedule,
    departure: &Departure,
    origin: MomentIdx,
) -> Vec<Moment> {
    let board = schedule.stop_time(departure.stop_time);
    let Some(first) = schedule.trip_start(departure.trip) else {
        return Vec::new();
    };

    schedule
        .trip_stop_times(departure.trip)
        .iter()
        .enumerate()
        .skip(board.position as usize + 1)
        .filter(|(_, st)| st.arrival > departure.time)
        .map(|(position, st)| Moment {
            time: st.arrival,
            stop: st.stop,
            ride: Some(Ride {
                board: departure.stop_time,
                alight: first.offset(position as u32),
                from: origin,
            }),
        })
        .collect()
}
