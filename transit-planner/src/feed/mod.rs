//! Schedule feed ingestion.
//!
//! Reads the three record streams of a GTFS-style feed directory
//! (`stops.txt`, `trips.txt`, `stop_times.txt`) into schedule records.
//! Feeds exported from spreadsheet tools often start with a UTF-8 byte-order
//! mark, which would otherwise end up glued to the first header name; it is
//! stripped before the header is read.

mod error;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::schedule::{Schedule, StopRecord, StopTimeRecord, TripRecord};

pub use error::FeedError;

/// File names of the record streams within a feed directory.
pub const STOPS_FILE: &str = "stops.txt";
pub const TRIPS_FILE: &str = "trips.txt";
pub const STOP_TIMES_FILE: &str = "stop_times.txt";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Raw records read from a feed directory.
#[derive(Debug, Clone, Default)]
pub struct FeedRecords {
    pub stops: Vec<StopRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
}

/// Read the three record streams from a feed directory.
pub fn load_feed(dir: &Path) -> Result<FeedRecords, FeedError> {
    let records = FeedRecords {
        stops: read_records(&dir.join(STOPS_FILE))?,
        trips: read_records(&dir.join(TRIPS_FILE))?,
        stop_times: read_records(&dir.join(STOP_TIMES_FILE))?,
    };
    info!(
        dir = %dir.display(),
        stops = records.stops.len(),
        trips = records.trips.len(),
        stop_times = records.stop_times.len(),
        "feed loaded"
    );
    Ok(records)
}

/// Read a feed directory and build the schedule from it.
pub fn load_schedule(dir: &Path) -> Result<Schedule, FeedError> {
    let records = load_feed(dir)?;
    let schedule = Schedule::from_records(records.stops, records.trips, records.stop_times)?;
    Ok(schedule)
}

/// Parse records from CSV text with a header row.
///
/// Fields are trimmed; empty optional fields deserialize to `None`.
pub fn parse_records<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, csv::Error> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
        .deserialize()
        .collect()
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FeedError> {
    debug!(path = %path.display(), "reading feed file");
    let text = fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&text).map_err(|source| FeedError::Csv {
        path: path.to_path_buf(),
        source,
    })
}
