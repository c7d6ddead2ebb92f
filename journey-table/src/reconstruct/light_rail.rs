//! Light rail paths.
//!
//! The light rail API already returns the full stop-by-stop path, so there
//! is nothing to realign: stop ids are resolved leniently and line ids are
//! passed through.

use crate::directory::Directory;
use crate::domain::{LightRailHop, Path};
use crate::mtr::LightRailJourney;

/// Convert one direction of a light rail response into a path.
///
/// Unknown or missing stop ids become `None` rather than errors.
pub fn light_rail_path(directory: &Directory, journey: &LightRailJourney) -> Path<LightRailHop> {
    let hops = journey
        .steps()
        .iter()
        .map(|step| LightRailHop {
            id: directory.lookup_raw(step.id.as_ref()),
            line: step.line_id.clone(),
            towards: directory.lookup_raw(step.towards.as_ref()),
        })
        .collect();

    Path::new(hops, journey.time())
}
