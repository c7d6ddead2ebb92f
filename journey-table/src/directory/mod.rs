//! Station directory: raw numeric id → station code.
//!
//! Built once per run from the network's open-data CSV and read-only
//! afterwards. Every id the journey API mentions on a heavy rail path must
//! resolve here.

mod dataset;
mod error;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{DomainError, RawId, StationCode, StationId};

pub use dataset::{heavy_rail_directory, light_rail_directory};
pub use error::DirectoryError;

/// Mapping from numeric station id to station code.
///
/// The first registration of an id wins, so seed entries inserted before
/// the dataset rows can't be overridden by them.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    codes: BTreeMap<StationId, StationCode>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with fixed entries.
    pub fn with_seed(seed: impl IntoIterator<Item = (StationId, StationCode)>) -> Self {
        let mut directory = Self::new();
        for (id, code) in seed {
            directory.register(id, code);
        }
        directory
    }

    /// Register an id. Returns `false` if the id was already known, in which
    /// case the existing mapping is kept.
    pub fn register(&mut self, id: StationId, code: StationCode) -> bool {
        match self.codes.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(code);
                true
            }
        }
    }

    /// Resolve an id, failing if it was never registered.
    pub fn resolve(&self, id: StationId) -> Result<StationCode, DomainError> {
        self.codes
            .get(&id)
            .copied()
            .ok_or(DomainError::UnknownStation(id))
    }

    /// Lenient lookup: `None` for unknown or unparseable ids.
    pub fn lookup_raw(&self, raw: Option<&RawId>) -> Option<StationCode> {
        let id = raw?.station_id().ok()?;
        self.codes.get(&id).copied()
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if no ids are registered.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (StationId, StationCode)> + '_ {
        self.codes.iter().map(|(id, code)| (*id, *code))
    }

    /// The distinct station codes, sorted.
    pub fn codes(&self) -> BTreeSet<StationCode> {
        self.codes.values().copied().collect()
    }
}
