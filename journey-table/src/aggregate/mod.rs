//! Building the full first/last train table.
//!
//! The [`Harvester`] walks every ordered pair of stations, asks a
//! [`JourneySource`] for the pair's record and folds the reconstructed
//! paths into a [`JourneyTable`].

mod harvest;
mod source;
mod table;

pub use harvest::{
    HarvestError, HarvestSummary, Harvester, StationPair, merge_light_rail, station_pairs,
};
pub use source::JourneySource;
pub use table::{JourneyTable, StationRecord};
