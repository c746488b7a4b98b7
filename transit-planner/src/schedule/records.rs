//! Raw schedule records.
//!
//! One struct per record stream, field-for-field as the feed publishes them.
//! Times and stop sequences stay as strings here: the store validates them
//! and reports failures with the trip and stop they belong to.

use serde::Deserialize;

/// A row of `stops.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopRecord {
    pub stop_id: String,
    #[serde(default)]
    pub stop_name: String,
    #[serde(default)]
    pub parent_station: Option<String>,
}

impl StopRecord {
    pub fn new(stop_id: &str, stop_name: &str, parent_station: Option<&str>) -> Self {
        Self {
            stop_id: stop_id.to_string(),
            stop_name: stop_name.to_string(),
            parent_station: parent_station.map(str::to_string),
        }
    }
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TripRecord {
    pub route_id: String,
    pub trip_id: String,
    #[serde(default)]
    pub trip_headsign: Option<String>,
}

impl TripRecord {
    pub fn new(trip_id: &str, route_id: &str, trip_headsign: &str) -> Self {
        Self {
            route_id: route_id.to_string(),
            trip_id: trip_id.to_string(),
            trip_headsign: Some(trip_headsign.to_string()),
        }
    }
}

/// A row of `stop_times.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: String,
}

impl StopTimeRecord {
    pub fn new(
        trip_id: &str,
        arrival_time: &str,
        departure_time: &str,
        stop_id: &str,
        stop_sequence: &str,
    ) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            arrival_time: arrival_time.to_string(),
            departure_time: departure_time.to_string(),
            stop_id: stop_id.to_string(),
            stop_sequence: stop_sequence.to_string(),
        }
    }
}
