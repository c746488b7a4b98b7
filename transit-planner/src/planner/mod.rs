//! Earliest-arrival journey planner.
//!
//! This module implements the journey search that answers:
//! "Starting at this stop at this time, when is the earliest I can reach
//! every other station, and on which trips?"
//!
//! The search is label-setting over spacetime moments. It repeatedly asks
//! the connection finder for departures from the latest settled station and
//! the trip expander for everywhere those departures go.

mod config;
mod connections;
mod expand;
mod journey;
mod moment;
mod search;

pub use config::{DEFAULT_MAX_WAIT_SECS, SearchConfig};
pub use connections::{Departure, leaves_from_station};
pub use expand::arrivals_from_departure;
pub use journey::{Journey, Leg};
pub use moment::{Moment, MomentIdx, Ride};
pub use search::{Planner, SearchError, SearchRequest, Settled, Termination, search};

#[cfg(test)]
mod search_tests;
