//! Sweep every ordered station pair and fold the results into a table.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::directory::Directory;
use crate::domain::{
    DomainError, JourneyEntry, LightRailHop, RailHop, StationCode, StationId, TrainKind,
};
use crate::mtr::{FetchError, HeavyRailRoute, LightRailRoute};
use crate::reconstruct::{PathBuilder, RailQuery, light_rail_path};
use crate::transfers::SpecialTransfers;

use super::source::JourneySource;
use super::table::JourneyTable;

/// Errors that abort a harvest.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("fetching {origin} -> {destination}: {source}")]
    Fetch {
        origin: StationCode,
        destination: StationCode,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// An ordered pair of distinct stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationPair {
    pub origin: StationId,
    pub origin_code: StationCode,
    pub destination: StationId,
    pub destination_code: StationCode,
}

/// Every ordered pair with distinct codes, in ascending id order.
///
/// Two ids sharing a code are the same station, so such pairs are skipped.
pub fn station_pairs(directory: &Directory) -> Vec<StationPair> {
    let mut pairs = Vec::new();
    for (origin, origin_code) in directory.iter() {
        for (destination, destination_code) in directory.iter() {
            if origin_code == destination_code {
                continue;
            }
            pairs.push(StationPair {
                origin,
                origin_code,
                destination,
                destination_code,
            });
        }
    }
    pairs
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Pairs fetched
    pub pairs: usize,
    /// Directions that produced a path
    pub paths: usize,
    /// Directions with no route at all
    pub absent: usize,
    /// Directions dropped as malformed
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Drives a [`JourneySource`] across every station pair.
///
/// Pairs are processed one at a time; the source's own throttling decides
/// the pace.
pub struct Harvester<'a, S> {
    source: &'a S,
    builder: PathBuilder<'a>,
}

impl<'a, S: JourneySource> Harvester<'a, S> {
    pub fn new(source: &'a S, directory: &'a Directory, transfers: &'a SpecialTransfers) -> Self {
        Self {
            source,
            builder: PathBuilder::new(directory, transfers),
        }
    }

    /// Build the heavy rail table.
    ///
    /// A malformed direction is logged and skipped. An unknown station id
    /// or a fetch that exhausted its retries aborts the run.
    pub async fn heavy_rail(
        &self,
    ) -> Result<(JourneyTable<RailHop>, HarvestSummary), HarvestError> {
        let started = Instant::now();
        let directory = self.builder.directory();
        let mut table = JourneyTable::new(directory.codes(), true);
        let mut summary = HarvestSummary::default();

        let pairs = station_pairs(directory);
        let total = pairs.len();
        for (index, pair) in pairs.iter().enumerate() {
            log_progress(pair, index, total);
            let route = self
                .source
                .heavy_rail_route(pair.origin, pair.destination)
                .await
                .map_err(|source| fetch_error(pair, source))?;

            self.merge_heavy_rail(&mut table, pair, &route, &mut summary)?;
            summary.pairs += 1;
        }

        summary.elapsed = started.elapsed();
        log_summary(&summary, &table);
        Ok((table, summary))
    }

    /// Build the light rail table.
    pub async fn light_rail(
        &self,
    ) -> Result<(JourneyTable<LightRailHop>, HarvestSummary), HarvestError> {
        let started = Instant::now();
        let directory = self.builder.directory();
        let mut table = JourneyTable::new(directory.codes(), false);
        let mut summary = HarvestSummary::default();

        let pairs = station_pairs(directory);
        let total = pairs.len();
        for (index, pair) in pairs.iter().enumerate() {
            log_progress(pair, index, total);
            let route = self
                .source
                .light_rail_route(pair.origin, pair.destination)
                .await
                .map_err(|source| fetch_error(pair, source))?;

            merge_light_rail(directory, &mut table, pair, &route, &mut summary);
            summary.pairs += 1;
        }

        summary.elapsed = started.elapsed();
        log_summary(&summary, &table);
        Ok((table, summary))
    }

    /// Fold one heavy rail record into the table.
    pub fn merge_heavy_rail(
        &self,
        table: &mut JourneyTable<RailHop>,
        pair: &StationPair,
        route: &HeavyRailRoute,
        summary: &mut HarvestSummary,
    ) -> Result<(), DomainError> {
        let record = table.record_mut(pair.origin_code);
        if let Some((opening, closing)) = route.opening_hours() {
            record.capture_hours(opening, closing);
        }

        let mut entry = JourneyEntry::default();
        for kind in TrainKind::ALL {
            let journey = route.journey(kind);
            let query = RailQuery {
                origin: pair.origin,
                destination: pair.destination,
                interchanges: journey.interchanges(),
                lines: journey.lines(),
                time: journey.time(),
            };

            match self.builder.rail_path(&query) {
                Ok(path) => {
                    match &path {
                        Some(path) => debug!(
                            origin = %pair.origin_code,
                            destination = %pair.destination_code,
                            train = kind.as_str(),
                            hops = path.len(),
                            "reconstructed path"
                        ),
                        None => summary.absent += 1,
                    }
                    entry.set(kind, path);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(
                        origin = %pair.origin_code,
                        destination = %pair.destination_code,
                        train = kind.as_str(),
                        error = %e,
                        "skipping malformed record"
                    );
                    summary.skipped += 1;
                }
            }
        }

        summary.paths += record.store(pair.destination_code, entry);
        Ok(())
    }
}

/// Fold one light rail record into the table. Never fails: unknown stops
/// become `null`.
pub fn merge_light_rail(
    directory: &Directory,
    table: &mut JourneyTable<LightRailHop>,
    pair: &StationPair,
    route: &LightRailRoute,
    summary: &mut HarvestSummary,
) {
    let mut entry = JourneyEntry::default();
    for kind in TrainKind::ALL {
        let path = light_rail_path(directory, route.journey(kind));
        if path.is_empty() {
            debug!(
                origin = %pair.origin_code,
                destination = %pair.destination_code,
                train = kind.as_str(),
                "light rail journey has no steps"
            );
        }
        entry.set(kind, Some(path));
    }
    summary.paths += table.record_mut(pair.origin_code).store(pair.destination_code, entry);
}

fn fetch_error(pair: &StationPair, source: FetchError) -> HarvestError {
    HarvestError::Fetch {
        origin: pair.origin_code,
        destination: pair.destination_code,
        source,
    }
}

fn log_progress(pair: &StationPair, index: usize, total: usize) {
    info!(
        origin = %pair.origin_code,
        origin_id = %pair.origin,
        destination = %pair.destination_code,
        destination_id = %pair.destination,
        pair = index + 1,
        total,
        "fetching"
    );
}

fn log_summary<H>(summary: &HarvestSummary, table: &JourneyTable<H>) {
    info!(
        stations = table.len(),
        stored = table.path_count(),
        pairs = summary.pairs,
        paths = summary.paths,
        absent = summary.absent,
        skipped = summary.skipped,
        elapsed_secs = summary.elapsed.as_secs(),
        "harvest complete"
    );
}
