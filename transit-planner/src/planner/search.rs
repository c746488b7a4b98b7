//! Label-setting earliest-arrival search.
//!
//! Grows the set of reachable moments from an origin in arrival-time order.
//! The frontier is a min-heap of pending moments; the first moment popped
//! for a station is its earliest arrival and becomes that station's settled
//! label. Later moments for a settled station are dominated and dropped.
//! From each newly settled station the search boards every departure in
//! the wait window and pushes every downstream arrival of those trips.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use std::time::Instant;

use tracing::{debug, trace};

use crate::domain::{ServiceTime, StopId, StopIdx};
use crate::schedule::Schedule;

use super::config::SearchConfig;
use super::connections::leaves_from_station;
use super::expand::arrivals_from_departure;
use super::journey::{Journey, Leg};
use super::moment::{Moment, MomentIdx};

/// Error from journey search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The request names a stop the schedule does not contain
    #[error("unknown stop: {0}")]
    UnknownStop(String),
}

/// Request for an earliest-arrival search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Stop to start from.
    pub origin: StopId,

    /// Time the traveller is at the origin.
    pub start: ServiceTime,

    /// Stop the search may stop at once its station is settled.
    pub target: Option<StopId>,
}

impl SearchRequest {
    /// Create a request that explores everything reachable.
    pub fn new(origin: impl Into<StopId>, start: ServiceTime) -> Self {
        Self {
            origin: origin.into(),
            start,
            target: None,
        }
    }

    /// Stop as soon as the target's station is settled.
    pub fn with_target(mut self, target: impl Into<StopId>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Resolve the request's stops against a schedule.
    fn resolve(&self, schedule: &Schedule) -> Result<(StopIdx, Option<StopIdx>), SearchError> {
        let lookup = |id: &StopId| {
            schedule
                .stop_index(id.as_str())
                .ok_or_else(|| SearchError::UnknownStop(id.to_string()))
        };
        let origin = lookup(&self.origin)?;
        let target = self.target.as_ref().map(lookup).transpose()?;
        Ok((origin, target))
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Nothing left to explore
    Exhausted,
    /// The target station was settled
    TargetReached,
    /// The configured round limit was hit
    RoundLimit,
    /// The configured deadline passed
    DeadlineExceeded,
}

/// Earliest arrivals found by a search, keyed by canonical station.
#[derive(Debug, Clone)]
pub struct Settled<'s> {
    schedule: &'s Schedule,
    origin: StopIdx,
    start: ServiceTime,
    /// Settled moments in the order they were settled.
    moments: Vec<Moment>,
    by_station: BTreeMap<StopIdx, MomentIdx>,
    rounds: usize,
    pruned: usize,
    termination: Termination,
}

impl<'s> Settled<'s> {
    fn new(schedule: &'s Schedule, origin: StopIdx, start: ServiceTime) -> Self {
        Self {
            schedule,
            origin,
            start,
            moments: Vec::new(),
            by_station: BTreeMap::new(),
            rounds: 0,
            pruned: 0,
            termination: Termination::Exhausted,
        }
    }

    fn best(&self, station: StopIdx) -> Option<&Moment> {
        self.by_station.get(&station).map(|idx| self.moment(*idx))
    }

    fn settle(&mut self, station: StopIdx, moment: Moment) -> MomentIdx {
        let idx = MomentIdx(self.moments.len() as u32);
        self.moments.push(moment);
        self.by_station.insert(station, idx);
        idx
    }

    /// Returns the settled moment for a stop's station, if reached.
    pub fn arrival(&self, stop_id: &str) -> Option<&Moment> {
        let stop = self.schedule.stop_index(stop_id)?;
        self.best(self.schedule.stations().canonical(stop))
    }

    /// Returns the earliest arrival time at a stop's station, if reached.
    pub fn arrival_time(&self, stop_id: &str) -> Option<ServiceTime> {
        self.arrival(stop_id).map(|m| m.time)
    }

    /// Returns true if the stop's station was reached.
    pub fn contains(&self, stop_id: &str) -> bool {
        self.arrival(stop_id).is_some()
    }

    /// Returns the settled moment at an arena index.
    pub fn moment(&self, idx: MomentIdx) -> &Moment {
        &self.moments[idx.get()]
    }

    /// Iterate settled stations and their moments in station order.
    pub fn iter(&self) -> impl Iterator<Item = (StopIdx, &Moment)> + '_ {
        self.by_station
            .iter()
            .map(|(station, idx)| (*station, self.moment(*idx)))
    }

    /// Reconstruct the trips ridden to reach a stop's station.
    ///
    /// Returns `None` if the station was not settled.
    pub fn journey_to(&self, stop_id: &str) -> Option<Journey> {
        let mut moment = self.arrival(stop_id)?;
        let destination = moment.stop;
        let arrival = moment.time;

        let mut legs = Vec::new();
        while let Some(ride) = moment.ride {
            legs.push(Leg {
                trip: self.schedule.stop_time(ride.board).trip,
                board: ride.board,
                alight: ride.alight,
            });
            moment = self.moment(ride.from);
        }
        legs.reverse();

        Some(Journey::new(
            self.origin,
            destination,
            self.start,
            arrival,
            legs,
        ))
    }

    /// Returns the schedule this search ran against.
    pub fn schedule(&self) -> &'s Schedule {
        self.schedule
    }

    /// Returns the stop the search started from.
    pub fn origin(&self) -> StopIdx {
        self.origin
    }

    /// Returns the search start time.
    pub fn start(&self) -> ServiceTime {
        self.start
    }

    /// Returns the number of settled stations.
    pub fn len(&self) -> usize {
        self.by_station.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_station.is_empty()
    }

    /// Returns the number of frontier pops performed.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Returns the number of dominated moments discarded.
    pub fn pruned(&self) -> usize {
        self.pruned
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }
}

/// Earliest-arrival journey planner over an immutable schedule.
///
/// A planner borrows its schedule and keeps no state between searches, so
/// one schedule can serve any number of planners on any number of threads.
pub struct Planner<'a> {
    schedule: &'a Schedule,
    config: SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(schedule: &'a Schedule, config: SearchConfig) -> Self {
        Self { schedule, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find the earliest arrival at every station reachable from the origin.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownStop`] if the origin or target is not in
    /// the schedule. Unreachable stations are not errors: they are simply
    /// absent from the result.
    pub fn search(&self, request: &SearchRequest) -> Result<Settled<'a>, SearchError> {
        let (origin, target) = request.resolve(self.schedule)?;
        let stations = self.schedule.stations();
        let target = target.map(|t| stations.canonical(t));
        let max_wait = self.config.max_wait();
        let deadline = self.config.deadline.map(|d| Instant::now() + d);

        debug!(
            origin = %request.origin,
            start = %request.start,
            target = ?request.target,
            "search started"
        );

        let mut settled = Settled::new(self.schedule, origin, request.start);
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse(Moment::seed(origin, request.start)));

        let termination = loop {
            if frontier.is_empty() {
                break Termination::Exhausted;
            }
            if self
                .config
                .max_rounds
                .is_some_and(|max| settled.rounds >= max)
            {
                break Termination::RoundLimit;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break Termination::DeadlineExceeded;
            }
            let Some(Reverse(moment)) = frontier.pop() else {
                break Termination::Exhausted;
            };
            settled.rounds += 1;

            let station = stations.canonical(moment.stop);
            if settled.best(station).is_some_and(|best| best.time <= moment.time) {
                settled.pruned += 1;
                continue;
            }
            let idx = settled.settle(station, moment);

            trace!(
                station = %self.schedule.stop(station).id,
                time = %moment.time,
                "settled"
            );

            if target == Some(station) {
                break Termination::TargetReached;
            }

            for departure in leaves_from_station(self.schedule, station, moment.time, max_wait) {
                for arrival in arrivals_from_departure(self.schedule, &departure, idx) {
                    // Anything reaching a settled station is already dominated.
                    if settled.by_station.contains_key(&stations.canonical(arrival.stop)) {
                        settled.pruned += 1;
                        continue;
                    }
                    frontier.push(Reverse(arrival));
                }
            }
        };
        settled.termination = termination;

        debug!(
            settled = settled.len(),
            rounds = settled.rounds,
            pruned = settled.pruned,
            termination = ?termination,
            "search finished"
        );

        Ok(settled)
    }
}

/// Run one search with the given wait window.
///
/// Shorthand for building a [`SearchConfig`] and [`Planner`] for a single
/// request.
pub fn search<'s>(
    schedule: &'s Schedule,
    origin: &str,
    start: ServiceTime,
    max_wait_secs: i64,
    target: Option<&str>,
) -> Result<Settled<'s>, SearchError> {
    let mut request = SearchRequest::new(origin, start);
    if let Some(target) = target {
        request = request.with_target(target);
    }
    Planner::new(schedule, SearchConfig::new(max_wait_secs)).search(&request)
}
