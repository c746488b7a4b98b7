//! Stops, platforms and stations.

use super::StopId;

/// A stop as published in the schedule.
///
/// A stop without a parent is a canonical station in its own right. A stop
/// with a parent is a platform of that station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// Feed identifier
    pub id: StopId,
    /// Display name
    pub name: String,
    /// Parent station, if this stop is a platform
    pub parent: Option<StopId>,
}

impl Stop {
    /// Creates a new stop. An empty parent string is treated as no parent.
    pub fn new(id: impl Into<StopId>, name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: parent
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(StopId::from),
        }
    }

    /// Returns true if this stop belongs to a parent station.
    pub fn is_platform(&self) -> bool {
        self.parent.is_some()
    }
}
