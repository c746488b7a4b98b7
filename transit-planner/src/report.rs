//! Serializable summaries of search results.
//!
//! The planner works in arena indices; these types resolve them to feed ids,
//! display names and "HH:MM:SS" strings for output.

use serde::Serialize;

use crate::domain::StopIdx;
use crate::planner::{Journey, Leg, Settled, Termination};
use crate::schedule::Schedule;

/// Everything a search settled.
#[derive(Debug, Serialize)]
pub struct SettledReport {
    /// Origin stop id
    pub origin: String,

    /// Origin display name
    pub origin_name: String,

    /// Search start time
    pub start: String,

    /// Why the search stopped
    pub termination: &'static str,

    /// Frontier pops performed
    pub rounds: usize,

    /// Earliest arrival at each reached station
    pub arrivals: Vec<ArrivalReport>,
}

/// Earliest arrival at one station.
#[derive(Debug, Serialize)]
pub struct ArrivalReport {
    /// Canonical station id
    pub station: String,

    /// Station display name
    pub name: String,

    /// Arrival time
    pub arrival: String,

    /// Number of changes between trips
    pub transfers: usize,

    /// Trips ridden, in order
    pub legs: Vec<LegReport>,
}

/// One trip ridden.
#[derive(Debug, Serialize)]
pub struct LegReport {
    pub trip: String,
    pub route: String,
    pub headsign: String,
    pub board_stop: String,
    pub board_name: String,
    pub departure: String,
    pub alight_stop: String,
    pub alight_name: String,
    pub arrival: String,
}

// Conversion implementations

impl SettledReport {
    /// Summarize every settled station, in arrival order.
    pub fn from_settled(settled: &Settled<'_>) -> Self {
        let schedule = settled.schedule();
        let origin = schedule.stop(settled.origin());

        let mut reached: Vec<_> = settled
            .iter()
            .map(|(station, moment)| (moment.time, station))
            .collect();
        reached.sort();

        let arrivals = reached
            .into_iter()
            .filter_map(|(_, station)| {
                let id = schedule.stop(station).id.as_str();
                let journey = settled.journey_to(id)?;
                Some(ArrivalReport::from_journey(schedule, station, &journey))
            })
            .collect();

        Self {
            origin: origin.id.to_string(),
            origin_name: origin.name.clone(),
            start: settled.start().to_string(),
            termination: termination_name(settled.termination()),
            rounds: settled.rounds(),
            arrivals,
        }
    }
}

impl ArrivalReport {
    /// Create from a reconstructed journey ending at `station`.
    pub fn from_journey(schedule: &Schedule, station: StopIdx, journey: &Journey) -> Self {
        let station = schedule.stop(schedule.stations().canonical(station));
        Self {
            station: station.id.to_string(),
            name: station.name.clone(),
            arrival: journey.arrival().to_string(),
            transfers: journey.transfers(),
            legs: journey
                .legs()
                .iter()
                .map(|leg| LegReport::from_leg(schedule, leg))
                .collect(),
        }
    }

    /// One-line description: "<station> at <time> from <boarding stop>".
    pub fn summary_line(&self) -> String {
        match self.legs.last() {
            Some(leg) => format!("{} at {} from {}", self.name, self.arrival, leg.board_name),
            None => format!("{} at {} (origin)", self.name, self.arrival),
        }
    }
}

impl LegReport {
    /// Create from a journey leg.
    pub fn from_leg(schedule: &Schedule, leg: &Leg) -> Self {
        let trip = schedule.trip(leg.trip);
        let board = schedule.stop(leg.board_stop(schedule));
        let alight = schedule.stop(leg.alight_stop(schedule));

        Self {
            trip: trip.id.to_string(),
            route: trip.route_id.clone(),
            headsign: trip.headsign.clone(),
            board_stop: board.id.to_string(),
            board_name: board.name.clone(),
            departure: leg.departure(schedule).to_string(),
            alight_stop: alight.id.to_string(),
            alight_name: alight.name.clone(),
            arrival: leg.arrival(schedule).to_string(),
        }
    }
}

fn termination_name(termination: Termination) -> &'static str {
    match termination {
        Termination::Exhausted => "exhausted",
        Termination::TargetReached => "target_reached",
        Termination::RoundLimit => "round_limit",
        Termination::DeadlineExceeded => "deadline_exceeded",
    }
}
