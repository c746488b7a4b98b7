//! Canonical station resolution.
//!
//! Transfers happen between stations, not platforms: arriving at platform 2
//! lets you board anything leaving from platform 1 of the same station.
//! A stop with no parent is its own canonical station; a stop with a parent
//! resolves to that parent. Parent chains are exactly one level deep, which
//! is checked once when the index is built.

use std::collections::HashMap;

use crate::domain::{Stop, StopId, StopIdx};

use super::ScheduleError;

/// Immutable stop → station and station → platforms mapping.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    /// Canonical station of each stop, indexed by `StopIdx`.
    canonical: Vec<StopIdx>,
    /// Members of each station, indexed by `StopIdx`. Empty for platforms.
    platforms: Vec<Vec<StopIdx>>,
    station_count: usize,
}

impl StationIndex {
    /// Group stops under their canonical stations.
    ///
    /// Each canonical station's group starts with the station itself,
    /// followed by its platforms in feed order.
    pub(crate) fn build(
        stops: &[Stop],
        lookup: &HashMap<StopId, StopIdx>,
    ) -> Result<Self, ScheduleError> {
        let mut canonical = Vec::with_capacity(stops.len());

        for (idx, stop) in stops.iter().enumerate() {
            let resolved = match &stop.parent {
                None => StopIdx(idx as u32),
                Some(parent) => {
                    let parent_idx =
                        *lookup
                            .get(parent.as_str())
                            .ok_or_else(|| ScheduleError::UnknownParent {
                                stop: stop.id.to_string(),
                                parent: parent.to_string(),
                            })?;
                    if stops[parent_idx.get()].is_platform() {
                        return Err(ScheduleError::NestedStation {
                            stop: stop.id.to_string(),
                            parent: parent.to_string(),
                        });
                    }
                    parent_idx
                }
            };
            canonical.push(resolved);
        }

        let mut platforms = vec![Vec::new(); stops.len()];
        let mut station_count = 0;
        for (idx, station) in canonical.iter().enumerate() {
            if station.get() == idx {
                station_count += 1;
                platforms[idx].insert(0, *station);
            } else {
                platforms[station.get()].push(StopIdx(idx as u32));
            }
        }

        Ok(Self {
            canonical,
            platforms,
            station_count,
        })
    }

    /// Resolve a stop to its canonical station.
    ///
    /// Resolution is idempotent: resolving a canonical station returns it.
    pub fn canonical(&self, stop: StopIdx) -> StopIdx {
        self.canonical[stop.get()]
    }

    /// Returns true if the stop is a canonical station.
    pub fn is_canonical(&self, stop: StopIdx) -> bool {
        self.canonical(stop) == stop
    }

    /// Returns every stop of the station `stop` belongs to, the canonical
    /// stop first.
    pub fn platforms(&self, stop: StopIdx) -> &[StopIdx] {
        &self.platforms[self.canonical(stop).get()]
    }

    /// Returns all canonical stations in index order.
    pub fn stations(&self) -> impl Iterator<Item = StopIdx> + '_ {
        self.canonical
            .iter()
            .enumerate()
            .filter(|(idx, station)| station.get() == *idx)
            .map(|(_, station)| *station)
    }

    /// Returns the number of canonical stations.
    pub fn station_count(&self) -> usize {
        self.station_count
    }
}
