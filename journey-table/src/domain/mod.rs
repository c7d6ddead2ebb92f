//! Domain types for the first/last train table.
//!
//! Station codes are validated at construction time; raw API identifiers
//! stay loosely typed until they are resolved through the directory.

mod error;
mod network;
mod path;
mod raw_id;
mod station;
mod transfer;

pub use error::DomainError;
pub use network::Network;
pub use path::{JourneyEntry, LightRailHop, Path, RailHop, TrainKind, Transfer};
pub use raw_id::{LineId, RawId};
pub use station::{InvalidStationCode, StationCode, StationId};
pub use transfer::SpecialTransferKind;
