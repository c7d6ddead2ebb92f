//! Loosely-typed identifiers as they arrive from the journey API.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, StationId};

/// An identifier exactly as the upstream API sent it.
///
/// The journey API is inconsistent about whether ids are JSON strings
/// (`"12"`) or numbers (`12`), so both are accepted and preserved.
/// Serializing gives back the original shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

/// Line identifiers arrive in the same loose shape as station ids.
pub type LineId = RawId;

impl RawId {
    /// Interpret this value as a numeric station id.
    ///
    /// Fails with [`DomainError::MalformedRecord`] for negative, oversized or
    /// non-numeric values.
    pub fn station_id(&self) -> Result<StationId, DomainError> {
        let parsed = match self {
            RawId::Number(n) => u32::try_from(*n).ok(),
            RawId::Text(s) => s.trim().parse::<u32>().ok(),
        };

        parsed
            .map(StationId)
            .ok_or_else(|| DomainError::MalformedRecord(format!("station id {self} is not numeric")))
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{n}"),
            RawId::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<StationId> for RawId {
    fn from(id: StationId) -> Self {
        RawId::Number(i64::from(id.0))
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        RawId::Text(s.to_string())
    }
}
