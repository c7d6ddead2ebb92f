//! Journey API response DTOs.
//!
//! These types map directly to the `HRRoutes` and `LRRoute` JSON responses.
//! Nearly everything is optional because the API sends `null` or omits
//! fields when there is no service.

use serde::Deserialize;

use crate::domain::{LineId, RawId, TrainKind};

/// Response from `HRRoutes` for one origin/destination pair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeavyRailRoute {
    /// Opening hours of the origin station, e.g. `"05:30-01:00"`.
    #[serde(default)]
    pub station_opening_hours: Option<String>,

    #[serde(default)]
    pub first_train: HeavyRailJourney,

    #[serde(default)]
    pub last_train: HeavyRailJourney,
}

impl HeavyRailRoute {
    pub fn journey(&self, kind: TrainKind) -> &HeavyRailJourney {
        match kind {
            TrainKind::First => &self.first_train,
            TrainKind::Last => &self.last_train,
        }
    }

    /// Opening and closing times, when the API string has exactly two parts.
    pub fn opening_hours(&self) -> Option<(&str, &str)> {
        let hours = self.station_opening_hours.as_deref()?;
        let mut parts = hours.split('-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(opening), Some(closing), None) => Some((opening, closing)),
            _ => None,
        }
    }
}

/// First or last train for a heavy rail pair.
///
/// `interchange` lists only the intermediate stations; `links` lists line
/// ids and does not say which legs are walks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeavyRailJourney {
    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub interchange: Option<Vec<Option<RawId>>>,

    #[serde(default)]
    pub links: Option<Vec<Option<LineId>>>,
}

impl HeavyRailJourney {
    pub fn time(&self) -> &str {
        self.time.as_deref().unwrap_or_default()
    }

    pub fn interchanges(&self) -> &[Option<RawId>] {
        self.interchange.as_deref().unwrap_or_default()
    }

    pub fn lines(&self) -> &[Option<LineId>] {
        self.links.as_deref().unwrap_or_default()
    }
}

/// Response from `LRRoute` for one origin/destination pair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightRailRoute {
    #[serde(default)]
    pub first_train: LightRailJourney,

    #[serde(default)]
    pub last_train: LightRailJourney,
}

impl LightRailRoute {
    pub fn journey(&self, kind: TrainKind) -> &LightRailJourney {
        match kind {
            TrainKind::First => &self.first_train,
            TrainKind::Last => &self.last_train,
        }
    }
}

/// First or last train for a light rail pair. The API gives the full path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LightRailJourney {
    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub path: Option<Vec<LightRailStep>>,
}

impl LightRailJourney {
    pub fn time(&self) -> &str {
        self.time.as_deref().unwrap_or_default()
    }

    pub fn steps(&self) -> &[LightRailStep] {
        self.path.as_deref().unwrap_or_default()
    }
}

/// One stop on a light rail path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LightRailStep {
    #[serde(rename = "ID", default)]
    pub id: Option<RawId>,

    #[serde(rename = "lineID", default)]
    pub line_id: Option<LineId>,

    #[serde(default)]
    pub towards: Option<RawId>,
}
