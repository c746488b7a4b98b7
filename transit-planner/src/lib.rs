//! Earliest-arrival transit planner.
//!
//! Loads a GTFS-style timetable and answers: "starting at this stop at this
//! time, how early can I reach every other station?"

pub mod domain;
pub mod feed;
pub mod planner;
pub mod report;
pub mod schedule;
