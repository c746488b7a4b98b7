//! The schedule store.
//!
//! Built once from the three record streams, then read-only. Construction
//! happens entirely inside [`ScheduleBuilder::build`], which hands back an
//! immutable [`Schedule`]; there is no way to mutate a schedule afterwards,
//! so any number of searches can share one by reference.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::{
    ServiceTime, Stop, StopId, StopIdx, StopTime, StopTimeIdx, Trip, TripId, TripIdx,
};

use super::ScheduleError;
use super::records::{StopRecord, StopTimeRecord, TripRecord};
use super::stations::StationIndex;

/// Normalized in-memory schedule.
#[derive(Debug, Clone)]
pub struct Schedule {
    stops: Vec<Stop>,
    stop_lookup: HashMap<StopId, StopIdx>,
    trips: Vec<Trip>,
    trip_lookup: HashMap<TripId, TripIdx>,
    /// All stop times, grouped by trip and ordered by stop_sequence within
    /// each group.
    stop_times: Vec<StopTime>,
    /// Stop times at each stop, ordered by departure time.
    departures: Vec<Vec<StopTimeIdx>>,
    stations: StationIndex,
}

/// Collects schedule records ahead of a single validating build.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    stops: Vec<StopRecord>,
    trips: Vec<TripRecord>,
    stop_times: Vec<StopTimeRecord>,
}

impl ScheduleBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop record.
    pub fn stop(mut self, record: StopRecord) -> Self {
        self.stops.push(record);
        self
    }

    /// Add a trip record.
    pub fn trip(mut self, record: TripRecord) -> Self {
        self.trips.push(record);
        self
    }

    /// Add a stop-time record.
    pub fn stop_time(mut self, record: StopTimeRecord) -> Self {
        self.stop_times.push(record);
        self
    }

    /// Add many stop records.
    pub fn stops(mut self, records: impl IntoIterator<Item = StopRecord>) -> Self {
        self.stops.extend(records);
        self
    }

    /// Add many trip records.
    pub fn trips(mut self, records: impl IntoIterator<Item = TripRecord>) -> Self {
        self.trips.extend(records);
        self
    }

    /// Add many stop-time records.
    pub fn stop_times(mut self, records: impl IntoIterator<Item = StopTimeRecord>) -> Self {
        self.stop_times.extend(records);
        self
    }

    /// Validate the records and build the schedule.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found: duplicate ids, dangling
    /// references, malformed times or sequences, sequences that repeat,
    /// or times that run backwards along a trip.
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        // Stops and stations
        let mut stops = Vec::with_capacity(self.stops.len());
        let mut stop_lookup = HashMap::with_capacity(self.stops.len());
        for record in self.stops {
            let stop = Stop::new(
                record.stop_id.trim(),
                record.stop_name,
                record.parent_station.as_deref(),
            );
            let idx = StopIdx(stops.len() as u32);
            if stop_lookup.insert(stop.id.clone(), idx).is_some() {
                return Err(ScheduleError::DuplicateStop(stop.id.to_string()));
            }
            stops.push(stop);
        }
        let stations = StationIndex::build(&stops, &stop_lookup)?;

        // Trips
        let mut trips = Vec::with_capacity(self.trips.len());
        let mut trip_lookup = HashMap::with_capacity(self.trips.len());
        for record in self.trips {
            let trip = Trip {
                id: TripId::from(record.trip_id.trim()),
                route_id: record.route_id,
                headsign: record.trip_headsign.unwrap_or_default(),
                stop_times: 0..0,
            };
            let idx = TripIdx(trips.len() as u32);
            if trip_lookup.insert(trip.id.clone(), idx).is_some() {
                return Err(ScheduleError::DuplicateTrip(trip.id.to_string()));
            }
            trips.push(trip);
        }

        // Stop times: parse, then group by trip in sequence order
        let mut stop_times = self
            .stop_times
            .iter()
            .map(|record| parse_stop_time(record, &trip_lookup, &stop_lookup))
            .collect::<Result<Vec<_>, _>>()?;
        stop_times.sort_by_key(|st| (st.trip, st.sequence));

        let mut start = 0;
        while start < stop_times.len() {
            let trip_idx = stop_times[start].trip;
            let end = start
                + stop_times[start..]
                    .iter()
                    .take_while(|st| st.trip == trip_idx)
                    .count();
            let trip = &mut trips[trip_idx.get()];
            validate_trip(&trip.id, &mut stop_times[start..end])?;
            trip.stop_times = start as u32..end as u32;
            start = end;
        }

        // Departure lists per stop, sorted for windowed lookup
        let mut departures = vec![Vec::new(); stops.len()];
        for (idx, st) in stop_times.iter().enumerate() {
            departures[st.stop.get()].push(StopTimeIdx(idx as u32));
        }
        for list in &mut departures {
            list.sort_by_key(|idx| (stop_times[idx.get()].departure, *idx));
        }

        let empty_trips = trips.iter().filter(|t| t.is_empty()).count();
        if empty_trips > 0 {
            debug!(empty_trips, "trips without stop times");
        }
        info!(
            stops = stops.len(),
            stations = stations.station_count(),
            trips = trips.len(),
            stop_times = stop_times.len(),
            "schedule built"
        );

        Ok(Schedule {
            stops,
            stop_lookup,
            trips,
            trip_lookup,
            stop_times,
            departures,
            stations,
        })
    }
}

/// Parse one stop-time record, resolving its trip and stop.
///
/// The returned stop time has `position` 0; positions are assigned once the
/// trip's stop times are grouped.
fn parse_stop_time(
    record: &StopTimeRecord,
    trips: &HashMap<TripId, TripIdx>,
    stops: &HashMap<StopId, StopIdx>,
) -> Result<StopTime, ScheduleError> {
    let trip_id = record.trip_id.trim();
    let stop_id = record.stop_id.trim();

    let trip = *trips
        .get(trip_id)
        .ok_or_else(|| ScheduleError::UnknownTrip {
            trip: trip_id.to_string(),
        })?;
    let stop = *stops
        .get(stop_id)
        .ok_or_else(|| ScheduleError::UnknownStop {
            trip: trip_id.to_string(),
            stop: stop_id.to_string(),
        })?;

    let parse = |field: &'static str, value: &str| {
        ServiceTime::parse(value).map_err(|source| ScheduleError::MalformedTime {
            field,
            trip: trip_id.to_string(),
            stop: stop_id.to_string(),
            source,
        })
    };
    let arrival = parse("arrival_time", &record.arrival_time)?;
    let departure = parse("departure_time", &record.departure_time)?;

    let sequence = record
        .stop_sequence
        .trim()
        .parse::<u32>()
        .map_err(|_| ScheduleError::MalformedSequence {
            trip: trip_id.to_string(),
            value: record.stop_sequence.clone(),
        })?;

    Ok(StopTime {
        trip,
        stop,
        arrival,
        departure,
        sequence,
        position: 0,
    })
}

/// Check one trip's stop times (already sorted by sequence) and number them.
fn validate_trip(trip: &TripId, stop_times: &mut [StopTime]) -> Result<(), ScheduleError> {
    for i in 0..stop_times.len() {
        let current = stop_times[i];
        if current.arrival > current.departure {
            return Err(ScheduleError::TimeTravel {
                trip: trip.to_string(),
                sequence: current.sequence,
            });
        }
        if let Some(prev) = i.checked_sub(1).map(|p| stop_times[p]) {
            if prev.sequence == current.sequence {
                return Err(ScheduleError::DuplicateSequence {
                    trip: trip.to_string(),
                    sequence: current.sequence,
                });
            }
            if prev.departure > current.arrival {
                return Err(ScheduleError::TimeTravel {
                    trip: trip.to_string(),
                    sequence: current.sequence,
                });
            }
        }
        stop_times[i].position = i as u32;
    }
    Ok(())
}

impl Schedule {
    /// Start collecting records for a new schedule.
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::new()
    }

    /// Build a schedule from the three record streams.
    pub fn from_records(
        stops: impl IntoIterator<Item = StopRecord>,
        trips: impl IntoIterator<Item = TripRecord>,
        stop_times: impl IntoIterator<Item = StopTimeRecord>,
    ) -> Result<Self, ScheduleError> {
        ScheduleBuilder::new()
            .stops(stops)
            .trips(trips)
            .stop_times(stop_times)
            .build()
    }

    /// Look up a stop's index by feed id.
    pub fn stop_index(&self, id: &str) -> Option<StopIdx> {
        self.stop_lookup.get(id).copied()
    }

    /// Look up a trip's index by feed id.
    pub fn trip_index(&self, id: &str) -> Option<TripIdx> {
        self.trip_lookup.get(id).copied()
    }

    pub fn stop(&self, idx: StopIdx) -> &Stop {
        &self.stops[idx.get()]
    }

    pub fn trip(&self, idx: TripIdx) -> &Trip {
        &self.trips[idx.get()]
    }

    pub fn stop_time(&self, idx: StopTimeIdx) -> &StopTime {
        &self.stop_times[idx.get()]
    }

    /// Returns a trip's stop times in stop_sequence order.
    pub fn trip_stop_times(&self, trip: TripIdx) -> &[StopTime] {
        let range = &self.trips[trip.get()].stop_times;
        &self.stop_times[range.start as usize..range.end as usize]
    }

    /// Returns the index of a trip's first stop time, or `None` if the trip
    /// has no stop times.
    pub fn trip_start(&self, trip: TripIdx) -> Option<StopTimeIdx> {
        let trip = &self.trips[trip.get()];
        (!trip.is_empty()).then_some(StopTimeIdx(trip.stop_times.start))
    }

    /// Returns the stop times at a single stop, ordered by departure.
    pub fn departures_at(&self, stop: StopIdx) -> &[StopTimeIdx] {
        &self.departures[stop.get()]
    }

    /// Returns the stop times at a single stop, ordered by departure.
    pub fn stop_times_at(&self, stop: StopIdx) -> impl Iterator<Item = &StopTime> + '_ {
        self.departures_at(stop)
            .iter()
            .map(|idx| &self.stop_times[idx.get()])
    }

    /// Returns the station resolver.
    pub fn stations(&self) -> &StationIndex {
        &self.stations
    }

    /// Resolve a stop id to its canonical station id.
    pub fn canonical(&self, id: &str) -> Option<&StopId> {
        let idx = self.stop_index(id)?;
        Some(&self.stop(self.stations.canonical(idx)).id)
    }

    /// Returns the ids of every stop grouped under the same station as `id`.
    pub fn station_platforms(&self, id: &str) -> Option<Vec<&StopId>> {
        let idx = self.stop_index(id)?;
        Some(
            self.stations
                .platforms(idx)
                .iter()
                .map(|p| &self.stop(*p).id)
                .collect(),
        )
    }

    /// Returns all stops in index order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns all trips in index order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn stop_time_count(&self) -> usize {
        self.stop_times.len()
    }
}
