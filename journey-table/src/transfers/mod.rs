//! Special transfers between stations.
//!
//! A few interchanges are walks that the journey API doesn't model as rail
//! links (e.g., Central ↔ Hong Kong). This module holds the fixed table of
//! those pairs and the kind of walk each one is.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{SpecialTransferKind, StationCode};

/// Errors from building or loading a special-transfer table.
#[derive(Debug, thiserror::Error)]
pub enum TransferTableError {
    /// The table file isn't valid JSON of the expected shape
    #[error("invalid transfer table: {0}")]
    Json(#[from] serde_json::Error),

    /// The table file couldn't be read
    #[error("failed to read transfer table: {0}")]
    Io(#[from] std::io::Error),

    /// A pair joins a station to itself
    #[error("transfer pair joins {0} to itself")]
    SamePair(StationCode),
}

/// An unordered pair of station codes.
///
/// Stored smallest-first, so `{A, B}` and `{B, A}` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferPair(StationCode, StationCode);

impl TransferPair {
    pub fn new(a: StationCode, b: StationCode) -> Self {
        if a <= b {
            TransferPair(a, b)
        } else {
            TransferPair(b, a)
        }
    }

    pub fn stations(&self) -> (StationCode, StationCode) {
        (self.0, self.1)
    }
}

/// The table of special transfers, keyed by unordered station pair.
///
/// Lookups are symmetric: `get(A, B) == get(B, A)` for every pair.
#[derive(Debug, Clone, Default)]
pub struct SpecialTransfers {
    pairs: HashMap<TransferPair, SpecialTransferKind>,
}

impl SpecialTransfers {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a special transfer between two distinct stations.
    pub fn add(
        &mut self,
        a: StationCode,
        b: StationCode,
        kind: SpecialTransferKind,
    ) -> Result<(), TransferTableError> {
        if a == b {
            return Err(TransferTableError::SamePair(a));
        }
        self.pairs.insert(TransferPair::new(a, b), kind);
        Ok(())
    }

    /// Kind of special transfer between two stations, if any.
    pub fn get(&self, a: StationCode, b: StationCode) -> Option<SpecialTransferKind> {
        self.pairs.get(&TransferPair::new(a, b)).copied()
    }

    /// All pairs in the table.
    pub fn iter(&self) -> impl Iterator<Item = (TransferPair, SpecialTransferKind)> + '_ {
        self.pairs.iter().map(|(pair, kind)| (*pair, *kind))
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no special transfers.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parse a table from JSON.
    ///
    /// ```
    /// use journey_table::transfers::SpecialTransfers;
    ///
    /// let table = SpecialTransfers::from_json(
    ///     r#"[{"stations": ["CEN", "HOK"], "kind": "walk_paid"}]"#,
    /// ).unwrap();
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, TransferTableError> {
        let entries: Vec<TransferEntry> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for entry in entries {
            let [a, b] = entry.stations;
            table.add(a, b, entry.kind)?;
        }
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TransferTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// One row of a transfer table file.
#[derive(Debug, Deserialize)]
struct TransferEntry {
    stations: [StationCode; 2],
    kind: SpecialTransferKind,
}

/// Builder for creating special-transfer tables.
///
/// Provides a fluent API for adding pairs. Invalid codes and pairs joining
/// a station to itself are logged at debug and left out.
#[derive(Debug, Default)]
pub struct SpecialTransfersBuilder {
    inner: SpecialTransfers,
}

impl SpecialTransfersBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a special transfer.
    pub fn add(mut self, a: &str, b: &str, kind: SpecialTransferKind) -> Self {
        match (StationCode::parse(a), StationCode::parse(b)) {
            (Ok(code_a), Ok(code_b)) => {
                if let Err(e) = self.inner.add(code_a, code_b, kind) {
                    debug!(a, b, error = %e, "skipping special transfer");
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                debug!(a, b, error = %e, "skipping special transfer");
            }
        }
        self
    }

    /// Build the table.
    pub fn build(self) -> SpecialTransfers {
        self.inner
    }
}

/// The heavy rail special transfers.
pub fn mtr_transfers() -> SpecialTransfers {
    SpecialTransfersBuilder::new()
        // Central ↔ Hong Kong, through the paid-area subway
        .add("CEN", "HOK", SpecialTransferKind::WalkPaid)
        // Tsim Sha Tsui ↔ East Tsim Sha Tsui, out through the gates
        .add("TST", "ETS", SpecialTransferKind::WalkUnpaid)
        .build()
}
