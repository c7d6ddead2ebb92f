//! The accumulated first/last train table.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::domain::{JourneyEntry, Path, StationCode, TrainKind};

/// Everything known about journeys starting at one station.
///
/// Fields are declared in alphabetical order so the serialized keys come
/// out sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRecord<H> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,
    pub first_trains: BTreeMap<StationCode, Path<H>>,
    pub last_trains: BTreeMap<StationCode, Path<H>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening: Option<String>,
}

impl<H> StationRecord<H> {
    /// A record that tracks opening hours, initially empty strings.
    pub fn with_hours() -> Self {
        Self {
            closing: Some(String::new()),
            first_trains: BTreeMap::new(),
            last_trains: BTreeMap::new(),
            opening: Some(String::new()),
        }
    }

    /// A record without opening hours (light rail stops).
    pub fn without_hours() -> Self {
        Self {
            closing: None,
            first_trains: BTreeMap::new(),
            last_trains: BTreeMap::new(),
            opening: None,
        }
    }

    /// Record opening hours unless they were already captured.
    ///
    /// Returns `true` if the values were stored. Later, possibly different,
    /// values from other pairs are ignored.
    pub fn capture_hours(&mut self, opening: &str, closing: &str) -> bool {
        match (&mut self.opening, &mut self.closing) {
            (Some(o), Some(c)) if o.is_empty() && c.is_empty() => {
                *o = opening.to_string();
                *c = closing.to_string();
                true
            }
            _ => false,
        }
    }

    /// Store a path to `destination`. An existing path is never replaced.
    pub fn insert(&mut self, kind: TrainKind, destination: StationCode, path: Path<H>) -> bool {
        if self.get(kind, destination).is_some() {
            return false;
        }
        let paths = match kind {
            TrainKind::First => &mut self.first_trains,
            TrainKind::Last => &mut self.last_trains,
        };
        paths.insert(destination, path);
        true
    }

    /// Store both sides of an entry; absent sides leave nothing behind.
    ///
    /// Returns the number of paths actually stored.
    pub fn store(&mut self, destination: StationCode, mut entry: JourneyEntry<H>) -> usize {
        let mut stored = 0;
        for kind in TrainKind::ALL {
            if let Some(path) = entry.take(kind) {
                if self.insert(kind, destination, path) {
                    stored += 1;
                }
            }
        }
        stored
    }

    pub fn get(&self, kind: TrainKind, destination: StationCode) -> Option<&Path<H>> {
        match kind {
            TrainKind::First => self.first_trains.get(&destination),
            TrainKind::Last => self.last_trains.get(&destination),
        }
    }

    /// Number of stored paths, both directions.
    pub fn path_count(&self) -> usize {
        self.first_trains.len() + self.last_trains.len()
    }
}

/// Station code → record, for every station in the network.
///
/// Records are created up front for every station and only ever grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyTable<H> {
    stations: BTreeMap<StationCode, StationRecord<H>>,
    tracks_hours: bool,
}

impl<H> JourneyTable<H> {
    /// Create empty records for the given stations.
    pub fn new(codes: impl IntoIterator<Item = StationCode>, tracks_hours: bool) -> Self {
        let mut table = Self {
            stations: BTreeMap::new(),
            tracks_hours,
        };
        for code in codes {
            table.record_mut(code);
        }
        table
    }

    /// The record for a station, created empty if missing.
    pub fn record_mut(&mut self, code: StationCode) -> &mut StationRecord<H> {
        let tracks_hours = self.tracks_hours;
        self.stations.entry(code).or_insert_with(|| {
            if tracks_hours {
                StationRecord::with_hours()
            } else {
                StationRecord::without_hours()
            }
        })
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of stored paths across all stations.
    pub fn path_count(&self) -> usize {
        self.stations.values().map(StationRecord::path_count).sum()
    }
}

impl<H: Serialize> Serialize for JourneyTable<H> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.stations.serialize(serializer)
    }
}
