//! Schedule construction errors.
//!
//! Every variant names the record it came from. These are data-validity
//! failures: the store never coerces bad input into something usable.

use crate::domain::TimeError;

/// The schedule records are inconsistent or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// A time field could not be parsed
    #[error("malformed {field} for trip {trip} at stop {stop}: {source}")]
    MalformedTime {
        field: &'static str,
        trip: String,
        stop: String,
        #[source]
        source: TimeError,
    },

    /// A stop_sequence field is not a non-negative integer
    #[error("malformed stop_sequence {value:?} for trip {trip}")]
    MalformedSequence { trip: String, value: String },

    /// Two stop times of one trip share a stop_sequence
    #[error("trip {trip} repeats stop_sequence {sequence}")]
    DuplicateSequence { trip: String, sequence: u32 },

    /// Times go backwards along a trip
    #[error("trip {trip} goes back in time at stop_sequence {sequence}")]
    TimeTravel { trip: String, sequence: u32 },

    /// A stop time references a trip that was not loaded
    #[error("stop time references unknown trip {trip}")]
    UnknownTrip { trip: String },

    /// A stop time references a stop that was not loaded
    #[error("trip {trip} references unknown stop {stop}")]
    UnknownStop { trip: String, stop: String },

    /// A platform's parent station was not loaded
    #[error("stop {stop} has unknown parent station {parent}")]
    UnknownParent { stop: String, parent: String },

    /// A platform's parent is itself a platform
    #[error("stop {stop} has parent {parent}, which is not a top-level station")]
    NestedStation { stop: String, parent: String },

    /// Two stops share an id
    #[error("duplicate stop id {0}")]
    DuplicateStop(String),

    /// Two trips share an id
    #[error("duplicate trip id {0}")]
    DuplicateTrip(String),
}
