//! Feed loading errors.

use std::path::PathBuf;

use crate::schedule::ScheduleError;

/// Errors that can occur when loading a schedule feed from disk.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A feed file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A feed file is not valid CSV or is missing required columns
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The records were read but do not form a valid schedule
    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}
