//! Normalized, immutable schedule storage.
//!
//! The [`Schedule`] is built once from stop, trip and stop-time records and
//! is read-only afterwards. It owns the arenas every other component indexes
//! into, plus the [`StationIndex`] that groups platforms under stations.

mod error;
pub mod records;
mod stations;
mod store;

pub use error::ScheduleError;
pub use records::{StopRecord, StopTimeRecord, TripRecord};
pub use stations::StationIndex;
pub use store::{Schedule, ScheduleBuilder};
