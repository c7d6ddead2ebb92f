//! MTR journey API client.
//!
//! Key characteristics of the upstream API:
//! - One request per ordered station pair, returning both the first and
//!   the last train of the day
//! - Ids arrive as strings or numbers, and `null`s appear wherever there
//!   is no service
//! - Heavy rail responses list interchanges and lines separately, without
//!   marking walking transfers

mod client;
mod error;
mod types;

pub use client::{FetchConfig, MtrClient};
pub use error::FetchError;
pub use types::{HeavyRailJourney, HeavyRailRoute, LightRailJourney, LightRailRoute, LightRailStep};
