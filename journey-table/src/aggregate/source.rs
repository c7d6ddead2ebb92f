//! Where journey records come from.

use std::future::Future;

use crate::domain::StationId;
use crate::mtr::{FetchError, HeavyRailRoute, LightRailRoute, MtrClient};

/// Trait for fetching one pair's journey record.
///
/// Abstracts over the live API so the harvester can be tested with
/// canned responses.
pub trait JourneySource {
    /// Heavy rail first/last train record for an ordered pair.
    fn heavy_rail_route(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> impl Future<Output = Result<HeavyRailRoute, FetchError>> + Send;

    /// Light rail first/last train record for an ordered pair.
    fn light_rail_route(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> impl Future<Output = Result<LightRailRoute, FetchError>> + Send;
}

impl JourneySource for MtrClient {
    fn heavy_rail_route(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> impl Future<Output = Result<HeavyRailRoute, FetchError>> + Send {
        self.fetch_heavy_rail_route(origin, destination)
    }

    fn light_rail_route(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> impl Future<Output = Result<LightRailRoute, FetchError>> + Send {
        self.fetch_light_rail_route(origin, destination)
    }
}
