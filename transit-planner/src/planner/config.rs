//! Search configuration for the journey planner.

use chrono::Duration;

/// Default maximum wait at a station (seconds).
pub const DEFAULT_MAX_WAIT_SECS: i64 = 20 * 60;

/// Configuration parameters for journey search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// How long after arriving at a station a departure may leave and
    /// still be considered (seconds).
    pub max_wait_secs: i64,

    /// Maximum number of frontier pops before the search gives up.
    /// `None` means no limit.
    pub max_rounds: Option<usize>,

    /// Wall-clock budget for one search. `None` means no limit.
    pub deadline: Option<std::time::Duration>,
}

impl SearchConfig {
    /// Create a new configuration with the given wait window and no limits.
    pub fn new(max_wait_secs: i64) -> Self {
        Self {
            max_wait_secs,
            ..Self::default()
        }
    }

    /// Cap the number of frontier pops.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Cap the wall-clock time of each search.
    pub fn with_deadline(mut self, deadline: std::time::Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the maximum wait as a Duration.
    pub fn max_wait(&self) -> Duration {
        Duration::seconds(self.max_wait_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_wait_secs: DEFAULT_MAX_WAIT_SECS,
            max_rounds: None,
            deadline: None,
        }
    }
}
