//! MTR first/last train table builder.
//!
//! Queries the MTR journey planner for every ordered pair of stations on a
//! network and writes the first and last train paths into one JSON table:
//! "if I leave station A for station B, which trains and interchanges make
//! up the first and last journeys of the day?"

pub mod aggregate;
pub mod directory;
pub mod domain;
pub mod error;
pub mod mtr;
pub mod output;
pub mod reconstruct;
pub mod run;
pub mod transfers;
