//! Turning raw journey records into hop-by-hop paths.
//!
//! Heavy rail records need realigning against the special-transfer table;
//! light rail records are passed through with lenient stop lookup.

mod engine;
mod light_rail;

pub use engine::{PathBuilder, RailQuery};
pub use light_rail::light_rail_path;
