//! Domain types for the transit journey planner.
//!
//! These are the immutable building blocks of a schedule: identifiers,
//! service-day times, stops and trips. Validation of how they fit together
//! lives in [`crate::schedule`].

mod ids;
mod stop;
mod time;
mod trip;

pub use ids::{StopId, StopIdx, StopTimeIdx, TripId, TripIdx};
pub use stop::Stop;
pub use time::{ServiceTime, TimeError};
pub use trip::{StopTime, Trip};
