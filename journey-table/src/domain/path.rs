//! Reconstructed journey paths.
//!
//! A `Path` is the ordered list of hops written into the output table for
//! one (origin, destination, first/last train) combination.

use serde::Serialize;

use super::{LineId, SpecialTransferKind, StationCode};

/// How a hop is annotated: a rail line, or a walking transfer.
///
/// Both serialize into the same `line` slot of the output, so the walking
/// kinds appear as plain tags (`walk_paid`) next to line ids (`TWL`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Transfer {
    Line(LineId),
    Special(SpecialTransferKind),
}

/// One hop on a heavy rail path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RailHop {
    #[serde(rename = "id")]
    pub station: StationCode,
    #[serde(rename = "line")]
    pub transfer: Option<Transfer>,
}

impl RailHop {
    pub fn new(station: StationCode, transfer: Option<Transfer>) -> Self {
        Self { station, transfer }
    }
}

/// One hop on a light rail path, passed through from the API.
///
/// Unlike heavy rail, unknown stops are tolerated here and become `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightRailHop {
    pub id: Option<StationCode>,
    pub line: Option<LineId>,
    pub towards: Option<StationCode>,
}

/// An ordered sequence of hops plus the first/last train time.
///
/// Paths produced from walking transfers have an empty `time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path<H> {
    #[serde(rename = "path")]
    pub hops: Vec<H>,
    pub time: String,
}

impl<H> Path<H> {
    pub fn new(hops: Vec<H>, time: impl Into<String>) -> Self {
        Self {
            hops,
            time: time.into(),
        }
    }

    /// Number of hops, endpoints included.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

/// Which end of the service day a path describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainKind {
    First,
    Last,
}

impl TrainKind {
    pub const ALL: [TrainKind; 2] = [TrainKind::First, TrainKind::Last];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrainKind::First => "first",
            TrainKind::Last => "last",
        }
    }
}

/// First and last train paths for one ordered station pair.
///
/// A missing side means there's no service in that direction, neither by
/// rail nor by a special transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyEntry<H> {
    pub first_train: Option<Path<H>>,
    pub last_train: Option<Path<H>>,
}

impl<H> Default for JourneyEntry<H> {
    fn default() -> Self {
        Self {
            first_train: None,
            last_train: None,
        }
    }
}

impl<H> JourneyEntry<H> {
    /// Remove and return one side.
    pub fn take(&mut self, kind: TrainKind) -> Option<Path<H>> {
        match kind {
            TrainKind::First => self.first_train.take(),
            TrainKind::Last => self.last_train.take(),
        }
    }

    pub fn set(&mut self, kind: TrainKind, path: Option<Path<H>>) {
        match kind {
            TrainKind::First => self.first_train = path,
            TrainKind::Last => self.last_train = path,
        }
    }
}
