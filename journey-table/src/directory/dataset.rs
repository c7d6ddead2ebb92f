//! Parsing the open-data station lists into a [`Directory`].

use tracing::debug;

use crate::domain::{StationCode, StationId};

use super::Directory;
use super::error::DirectoryError;

/// Ids the heavy rail station list is known to omit.
///
/// Racecourse only opens on race days and is missing from the published
/// list, but the journey API still routes through it.
const HEAVY_RAIL_SEED: &[(u32, &str)] = &[(70, "RAC")];

/// Column holding the station code in `mtr_lines_and_stations.csv`.
const HEAVY_RAIL_CODE_COLUMN: usize = 2;

/// Column holding the numeric station id in `mtr_lines_and_stations.csv`.
const HEAVY_RAIL_ID_COLUMN: usize = 3;

/// Column holding the origin stop id in `light_rail_fares.csv`.
const LIGHT_RAIL_ID_COLUMN: usize = 0;

/// Build the heavy rail directory from `mtr_lines_and_stations.csv`.
///
/// Stations are listed once per line and direction; repeats collapse into
/// a single entry.
pub fn heavy_rail_directory(text: &str) -> Result<Directory, DirectoryError> {
    let seed = HEAVY_RAIL_SEED.iter().filter_map(|(id, code)| {
        StationCode::parse(code)
            .ok()
            .map(|code| (StationId(*id), code))
    });

    build(text, Directory::with_seed(seed), |row| {
        let id = parse_id(row.get(HEAVY_RAIL_ID_COLUMN)?)?;
        let code = StationCode::parse(row.get(HEAVY_RAIL_CODE_COLUMN)?.trim()).ok()?;
        Some((id, code))
    })
}

/// Build the light rail directory from `light_rail_fares.csv`.
///
/// The fare table has one row per stop pair; the origin column alone covers
/// every stop. Codes are derived from the id (`LR001`).
pub fn light_rail_directory(text: &str) -> Result<Directory, DirectoryError> {
    build(text, Directory::new(), |row| {
        let id = parse_id(row.get(LIGHT_RAIL_ID_COLUMN)?)?;
        let code = StationCode::light_rail_stop(id).ok()?;
        Some((id, code))
    })
}

fn build(
    text: &str,
    mut directory: Directory,
    extract: impl Fn(&csv::StringRecord) -> Option<(StationId, StationCode)>,
) -> Result<Directory, DirectoryError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        match extract(&record) {
            Some((id, code)) => {
                directory.register(id, code);
            }
            None => {
                skipped += 1;
                debug!(row = ?record, "skipping station row");
            }
        }
    }

    if directory.is_empty() {
        return Err(DirectoryError::Empty);
    }

    debug!(stations = directory.len(), skipped, "built station directory");
    Ok(directory)
}

fn parse_id(field: &str) -> Option<StationId> {
    field.trim().parse::<u32>().ok().map(StationId)
}
