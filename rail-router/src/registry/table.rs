//! In-memory station table.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use crate::domain::{Coordinates, LineId, Station, StationId};

use super::error::{LookupError, RegistryError};

/// One station that carries a given name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: StationId,
    pub line: LineId,
    pub line_name: Option<String>,
}

impl Candidate {
    fn from_station(station: &Station) -> Self {
        Self {
            id: station.id,
            line: station.line,
            line_name: station.line_name.clone(),
        }
    }
}

/// Normalised table of stations keyed by id, with a name index.
///
/// Iteration is always in ascending id order, so everything derived from the
/// registry (edges, graph nodes) is reproducible across runs.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: BTreeMap<StationId, Station>,
    /// Station ids per display name, ascending.
    by_name: BTreeMap<String, Vec<StationId>>,
}

impl StationRegistry {
    /// Build a registry from station records.
    ///
    /// A repeated id means the input is malformed and is rejected outright.
    pub fn from_stations(
        stations: impl IntoIterator<Item = Station>,
    ) -> Result<Self, RegistryError> {
        let mut table = BTreeMap::new();
        for station in stations {
            match table.entry(station.id) {
                Entry::Occupied(_) => return Err(RegistryError::DuplicateStation(station.id)),
                Entry::Vacant(slot) => {
                    slot.insert(station);
                }
            }
        }

        let mut by_name: BTreeMap<String, Vec<StationId>> = BTreeMap::new();
        for station in table.values() {
            by_name
                .entry(station.name.clone())
                .or_default()
                .push(station.id);
        }

        Ok(Self {
            stations: table,
            by_name,
        })
    }

    /// Look up a station by id.
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Returns true if the id is registered.
    pub fn contains(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    /// Coordinates of a station.
    pub fn coordinates_of(&self, id: StationId) -> Result<Coordinates, LookupError> {
        self.stations
            .get(&id)
            .map(|s| s.coordinates)
            .ok_or(LookupError::UnknownStation(id))
    }

    /// Display name of a station.
    pub fn name_of(&self, id: StationId) -> Result<&str, LookupError> {
        self.stations
            .get(&id)
            .map(|s| s.name.as_str())
            .ok_or(LookupError::UnknownStation(id))
    }

    /// All stations carrying `name`, ascending by id.
    ///
    /// Returns an empty vec for a name nobody carries.
    pub fn candidates_by_name(&self, name: &str) -> Vec<Candidate> {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|id| self.stations.get(id))
            .map(Candidate::from_station)
            .collect()
    }

    /// Names shared by two or more stations, with their ids.
    ///
    /// Yields names in lexical order and ids in ascending order.
    pub fn name_groups(&self) -> impl Iterator<Item = (&str, &[StationId])> {
        self.by_name
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    /// All station ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stations.keys().copied()
    }

    /// All stations, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Number of registered stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if no stations are registered.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
