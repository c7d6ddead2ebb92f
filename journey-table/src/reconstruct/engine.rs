//! Heavy rail path reconstruction.
//!
//! The journey API describes a route as two loosely related lists: the
//! intermediate interchange station ids and the line ids ridden. It never
//! says which legs are walks rather than trains, and either list may be
//! `null` or contain `null`s. This module re-derives a hop-by-hop path from
//! those lists using the special-transfer table to spot the walks.

use crate::directory::Directory;
use crate::domain::{
    DomainError, LineId, Path, RailHop, RawId, SpecialTransferKind, StationId, Transfer,
};
use crate::transfers::SpecialTransfers;

/// Everything the API told us about one direction of one station pair.
#[derive(Debug, Clone, Copy)]
pub struct RailQuery<'a> {
    pub origin: StationId,
    pub destination: StationId,
    /// Intermediate interchanges only; the endpoints are implied.
    pub interchanges: &'a [Option<RawId>],
    pub lines: &'a [Option<LineId>],
    pub time: &'a str,
}

impl<'a> RailQuery<'a> {
    /// True if at least one line id is present, i.e. the API found a rail route.
    pub fn has_rail_route(&self) -> bool {
        self.lines.iter().any(Option::is_some)
    }
}

/// How the traveller leaves one stop on the augmented route.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Leg {
    /// A walk listed in the special-transfer table. Takes no slot in `lines`.
    Walk(SpecialTransferKind),
    /// A train leg, carrying the next unused entry in `lines`.
    Rail(Option<LineId>),
}

/// Builds paths by resolving ids through the directory and checking each
/// consecutive pair against the special-transfer table.
///
/// Holds only shared references, so the same query always yields the same
/// path.
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder<'a> {
    directory: &'a Directory,
    transfers: &'a SpecialTransfers,
}

impl<'a> PathBuilder<'a> {
    pub fn new(directory: &'a Directory, transfers: &'a SpecialTransfers) -> Self {
        Self {
            directory,
            transfers,
        }
    }

    pub fn directory(&self) -> &'a Directory {
        self.directory
    }

    /// Kind of special transfer joining two stations, if any.
    ///
    /// `None` on either side (e.g. looking past the destination) means no
    /// match. Ids on both sides must resolve.
    pub fn match_transfer(
        &self,
        a: Option<StationId>,
        b: Option<StationId>,
    ) -> Result<Option<SpecialTransferKind>, DomainError> {
        let (Some(a), Some(b)) = (a, b) else {
            return Ok(None);
        };
        let a = self.directory.resolve(a)?;
        let b = self.directory.resolve(b)?;
        Ok(self.transfers.get(a, b))
    }

    /// Two-hop path for a pair that is itself a special transfer.
    ///
    /// Walks have no timetable, so `time` is empty.
    pub fn special_path(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> Result<Option<Path<RailHop>>, DomainError> {
        let Some(kind) = self.match_transfer(Some(origin), Some(destination))? else {
            return Ok(None);
        };

        let hops = vec![
            RailHop::new(self.directory.resolve(origin)?, Some(Transfer::Special(kind))),
            RailHop::new(self.directory.resolve(destination)?, None),
        ];
        Ok(Some(Path::new(hops, String::new())))
    }

    /// Reconstruct the path for one direction of a heavy rail pair.
    ///
    /// Returns `Ok(None)` when there is neither a rail route nor a special
    /// transfer. Hop `i` carries the way the traveller leaves stop `i`: the
    /// walk kind when stop `i` and stop `i + 1` form a special transfer,
    /// otherwise the next unused line. Walks don't use up a line. The
    /// destination always carries `None`.
    pub fn rail_path(&self, query: &RailQuery<'_>) -> Result<Option<Path<RailHop>>, DomainError> {
        if !query.has_rail_route() {
            return self.special_path(query.origin, query.destination);
        }

        let stops = augmented_stops(query)?;
        let last = stops.len() - 1;
        let mut hops = Vec::with_capacity(stops.len());
        let mut line_cursor = 0;

        for (i, &stop) in stops.iter().enumerate() {
            let station = self.directory.resolve(stop)?;

            let leg = match self.match_transfer(Some(stop), stops.get(i + 1).copied())? {
                Some(kind) => Leg::Walk(kind),
                None => {
                    let line = query.lines.get(line_cursor).cloned().flatten();
                    line_cursor += 1;
                    Leg::Rail(line)
                }
            };

            let transfer = match leg {
                _ if i == last => None,
                Leg::Walk(kind) => Some(Transfer::Special(kind)),
                Leg::Rail(line) => line.map(Transfer::Line),
            };

            hops.push(RailHop::new(station, transfer));
        }

        Ok(Some(Path::new(hops, query.time)))
    }
}

/// Origin, interchanges, destination, as parsed station ids.
///
/// A `null` or non-numeric interchange makes the record malformed.
fn augmented_stops(query: &RailQuery<'_>) -> Result<Vec<StationId>, DomainError> {
    let mut stops = Vec::with_capacity(query.interchanges.len() + 2);
    stops.push(query.origin);

    for (position, raw) in query.interchanges.iter().enumerate() {
        let raw = raw.as_ref().ok_or_else(|| {
            DomainError::MalformedRecord(format!(
                "null interchange at position {position} ({} -> {})",
                query.origin, query.destination
            ))
        })?;
        stops.push(raw.station_id()?);
    }

    stops.push(query.destination);
    Ok(stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationCode;
    use crate::transfers::{SpecialTransfersBuilder, mtr_transfers};

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn directory(entries: &[(u32, &str)]) -> Directory {
        Directory::with_seed(entries.iter().map(|(id, c)| (StationId(*id), code(c))))
    }

    fn line(s: &str) -> Option<LineId> {
        Some(LineId::from(s))
    }

    fn ic(s: &str) -> Option<RawId> {
        Some(RawId::from(s))
    }

    fn hops(path: &Path<RailHop>) -> Vec<(&str, Option<String>)> {
        path.hops
            .iter()
            .map(|hop| {
                let transfer = hop.transfer.as_ref().map(|t| match t {
                    Transfer::Line(l) => serde_json::to_value(l)
                        .unwrap()
                        .as_str()
                        .unwrap_or_default()
                        .to_string(),
                    Transfer::Special(k) => k.to_string(),
                });
                (hop.station.as_str(), transfer)
            })
            .collect()
    }

    fn query<'a>(
        origin: u32,
        destination: u32,
        interchanges: &'a [Option<RawId>],
        lines: &'a [Option<LineId>],
    ) -> RailQuery<'a> {
        RailQuery {
            origin: StationId(origin),
            destination: StationId(destination),
            interchanges,
            lines,
            time: "06:00",
        }
    }

    #[test]
    fn single_interchange() {
        let dir = directory(&[(1, "AAA"), (2, "BBB"), (12, "CCC")]);
        let transfers = SpecialTransfers::new();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [ic("12")];
        let lines = [line("TML"), line("EAL")];
        let path = builder
            .rail_path(&query(1, 2, &interchanges, &lines))
            .unwrap()
            .unwrap();

        assert_eq!(
            hops(&path),
            vec![
                ("AAA", Some("TML".to_string())),
                ("CCC", Some("EAL".to_string())),
                ("BBB", None)
            ]
        );
        assert_eq!(path.time, "06:00");
    }

    #[test]
    fn missing_second_line_leaves_interchange_bare() {
        let dir = directory(&[(1, "AAA"), (2, "BBB"), (12, "CCC")]);
        let transfers = SpecialTransfers::new();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [ic("12")];
        let lines = [line("TML")];
        let path = builder
            .rail_path(&query(1, 2, &interchanges, &lines))
            .unwrap()
            .unwrap();

        assert_eq!(
            hops(&path),
            vec![
                ("AAA", Some("TML".to_string())),
                ("CCC", None),
                ("BBB", None)
            ]
        );
    }

    #[test]
    fn direct_route_without_interchanges() {
        let dir = directory(&[(1, "AAA"), (2, "BBB")]);
        let transfers = SpecialTransfers::new();
        let builder = PathBuilder::new(&dir, &transfers);

        let lines = [line("EAL")];
        let path = builder.rail_path(&query(1, 2, &[], &lines)).unwrap().unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(
            hops(&path),
            vec![("AAA", Some("EAL".to_string())), ("BBB", None)]
        );
    }

    #[test]
    fn special_pair_with_no_rail_route() {
        let dir = directory(&[(1, "CEN"), (2, "HOK")]);
        let transfers = mtr_transfers();
        let builder = PathBuilder::new(&dir, &transfers);

        let lines = [None::<LineId>];
        let path = builder.rail_path(&query(1, 2, &[], &lines)).unwrap().unwrap();

        assert_eq!(
            hops(&path),
            vec![("CEN", Some("walk_paid".to_string())), ("HOK", None)]
        );
        assert_eq!(path.time, "");
    }

    #[test]
    fn no_rail_route_and_not_special_is_absent() {
        let dir = directory(&[(1, "AAA"), (2, "BBB")]);
        let transfers = mtr_transfers();
        let builder = PathBuilder::new(&dir, &transfers);

        assert_eq!(builder.rail_path(&query(1, 2, &[], &[None, None])).unwrap(), None);
        assert_eq!(builder.rail_path(&query(1, 2, &[], &[])).unwrap(), None);
    }

    #[test]
    fn walk_in_the_middle_takes_no_line_slot() {
        let dir = directory(&[(1, "ADM"), (2, "CEN"), (3, "HOK"), (4, "TSY")]);
        let transfers = mtr_transfers();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [ic("2"), ic("3")];
        let lines = [line("TWL"), line("TCL")];
        let path = builder
            .rail_path(&query(1, 4, &interchanges, &lines))
            .unwrap()
            .unwrap();

        assert_eq!(
            hops(&path),
            vec![
                ("ADM", Some("TWL".to_string())),
                ("CEN", Some("walk_paid".to_string())),
                ("HOK", Some("TCL".to_string())),
                ("TSY", None)
            ]
        );
    }

    #[test]
    fn walk_between_three_rail_legs() {
        let dir = directory(&[(1, "ADM"), (2, "CEN"), (3, "HOK"), (4, "TSY"), (5, "SUN")]);
        let transfers = mtr_transfers();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [ic("2"), ic("3"), ic("4")];
        let lines = [line("TWL"), line("TCL"), line("DRL")];
        let path = builder
            .rail_path(&query(1, 5, &interchanges, &lines))
            .unwrap()
            .unwrap();

        assert_eq!(
            hops(&path),
            vec![
                ("ADM", Some("TWL".to_string())),
                ("CEN", Some("walk_paid".to_string())),
                ("HOK", Some("TCL".to_string())),
                ("TSY", Some("DRL".to_string())),
                ("SUN", None)
            ]
        );
    }

    #[test]
    fn walk_from_origin_overrides_first_hop() {
        let dir = directory(&[(1, "TST"), (2, "ETS"), (3, "HUH")]);
        let transfers = mtr_transfers();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [ic("2")];
        let lines = [line("TML")];
        let path = builder
            .rail_path(&query(1, 3, &interchanges, &lines))
            .unwrap()
            .unwrap();

        assert_eq!(
            hops(&path),
            vec![
                ("TST", Some("walk_unpaid".to_string())),
                ("ETS", Some("TML".to_string())),
                ("HUH", None)
            ]
        );
    }

    #[test]
    fn walk_into_destination_is_cleared() {
        // The last hop always carries nothing, even when the previous stop
        // walks into it.
        let dir = directory(&[(1, "ADM"), (2, "CEN"), (3, "HOK")]);
        let transfers = mtr_transfers();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [ic("2")];
        let lines = [line("TWL")];
        let path = builder
            .rail_path(&query(1, 3, &interchanges, &lines))
            .unwrap()
            .unwrap();

        assert_eq!(
            hops(&path),
            vec![
                ("ADM", Some("TWL".to_string())),
                ("CEN", Some("walk_paid".to_string())),
                ("HOK", None)
            ]
        );
    }

    #[test]
    fn null_line_inside_rail_route_stays_null() {
        let dir = directory(&[(1, "AAA"), (2, "BBB"), (3, "CCC"), (4, "DDD")]);
        let transfers = SpecialTransfers::new();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [ic("2"), ic("3")];
        let lines = [None, line("KTL"), line("EAL")];
        let path = builder
            .rail_path(&query(1, 4, &interchanges, &lines))
            .unwrap()
            .unwrap();

        assert_eq!(
            hops(&path),
            vec![
                ("AAA", None),
                ("BBB", Some("KTL".to_string())),
                ("CCC", Some("EAL".to_string())),
                ("DDD", None)
            ]
        );
    }

    #[test]
    fn more_interchanges_than_lines() {
        let dir = directory(&[(1, "AAA"), (2, "BBB"), (3, "CCC"), (4, "DDD")]);
        let transfers = SpecialTransfers::new();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [ic("2"), ic("3")];
        let lines = [line("KTL")];
        let path = builder
            .rail_path(&query(1, 4, &interchanges, &lines))
            .unwrap()
            .unwrap();

        assert_eq!(path.len(), 4);
        assert_eq!(hops(&path)[0], ("AAA", Some("KTL".to_string())));
        assert_eq!(hops(&path)[1], ("BBB", None));
        assert_eq!(hops(&path)[2], ("CCC", None));
    }

    #[test]
    fn unknown_interchange_is_fatal() {
        let dir = directory(&[(1, "AAA"), (2, "BBB")]);
        let transfers = SpecialTransfers::new();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [ic("99")];
        let lines = [line("TML")];
        let err = builder
            .rail_path(&query(1, 2, &interchanges, &lines))
            .unwrap_err();

        assert_eq!(err, DomainError::UnknownStation(StationId(99)));
        assert!(err.is_fatal());
    }

    #[test]
    fn null_interchange_is_malformed() {
        let dir = directory(&[(1, "AAA"), (2, "BBB")]);
        let transfers = SpecialTransfers::new();
        let builder = PathBuilder::new(&dir, &transfers);

        let interchanges = [None::<RawId>];
        let lines = [line("TML")];
        let err = builder
            .rail_path(&query(1, 2, &interchanges, &lines))
            .unwrap_err();

        assert!(matches!(err, DomainError::MalformedRecord(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn match_transfer_with_missing_side() {
        let dir = directory(&[(1, "CEN"), (2, "HOK")]);
        let transfers = mtr_transfers();
        let builder = PathBuilder::new(&dir, &transfers);

        assert_eq!(builder.match_transfer(Some(StationId(1)), None).unwrap(), None);
        assert_eq!(builder.match_transfer(None, Some(StationId(2))).unwrap(), None);
        assert_eq!(
            builder
                .match_transfer(Some(StationId(2)), Some(StationId(1)))
                .unwrap(),
            Some(SpecialTransferKind::WalkPaid)
        );
    }

    #[test]
    fn match_transfer_requires_known_ids() {
        let dir = directory(&[(1, "CEN")]);
        let transfers = mtr_transfers();
        let builder = PathBuilder::new(&dir, &transfers);

        assert_eq!(
            builder.match_transfer(Some(StationId(1)), Some(StationId(5))),
            Err(DomainError::UnknownStation(StationId(5)))
        );
    }

    #[test]
    fn special_path_only_for_table_pairs() {
        let dir = directory(&[(1, "TST"), (2, "ETS"), (3, "AUS")]);
        let transfers = SpecialTransfersBuilder::new()
            .add("TST", "ETS", SpecialTransferKind::WalkUnpaid)
            .build();
        let builder = PathBuilder::new(&dir, &transfers);

        let path = builder
            .special_path(StationId(2), StationId(1))
            .unwrap()
            .unwrap();
        assert_eq!(
            hops(&path),
            vec![("ETS", Some("walk_unpaid".to_string())), ("TST", None)]
        );

        assert_eq!(builder.special_path(StationId(1), StationId(3)).unwrap(), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::StationCode;
    use crate::transfers::mtr_transfers;
    use proptest::prelude::*;

    /// Ids 1..=6 map to stations including both walking pairs.
    const STATIONS: &[(u32, &str)] = &[
        (1, "CEN"),
        (2, "HOK"),
        (3, "TST"),
        (4, "ETS"),
        (5, "ADM"),
        (6, "KOT"),
    ];

    fn directory() -> Directory {
        Directory::with_seed(
            STATIONS
                .iter()
                .map(|(id, c)| (StationId(*id), StationCode::parse(c).unwrap())),
        )
    }

    fn id() -> impl Strategy<Value = u32> {
        1u32..=6
    }

    fn lines() -> impl Strategy<Value = Vec<Option<LineId>>> {
        prop::collection::vec(
            prop::option::of(prop::sample::select(vec!["TWL", "ISL", "KTL", "EAL"]))
                .prop_map(|l| l.map(LineId::from)),
            0..6,
        )
    }

    proptest! {
        /// A rail route yields one hop per stop, endpoints included
        #[test]
        fn hop_count(origin in id(), destination in id(),
                     interchanges in prop::collection::vec(id(), 0..5),
                     mut lines in lines()) {
            lines.push(Some(LineId::from("TWL")));
            let dir = directory();
            let transfers = mtr_transfers();
            let builder = PathBuilder::new(&dir, &transfers);
            let raw: Vec<Option<RawId>> = interchanges.iter().map(|i| Some(RawId::from(StationId(*i)))).collect();

            let query = RailQuery { origin: StationId(origin), destination: StationId(destination), interchanges: &raw, lines: &lines, time: "06:00" };
            let path = builder.rail_path(&query).unwrap().unwrap();

            prop_assert_eq!(path.len(), interchanges.len() + 2);
        }

        /// The destination never carries a transfer; the origin carries its walk
        /// or else the first line
        #[test]
        fn endpoint_transfers(origin in id(), destination in id(),
                              interchanges in prop::collection::vec(id(), 0..5),
                              lines in lines()) {
            let dir = directory();
            let transfers = mtr_transfers();
            let builder = PathBuilder::new(&dir, &transfers);
            let raw: Vec<Option<RawId>> = interchanges.iter().map(|i| Some(RawId::from(StationId(*i)))).collect();

            let query = RailQuery { origin: StationId(origin), destination: StationId(destination), interchanges: &raw, lines: &lines, time: "06:00" };
            if let Some(path) = builder.rail_path(&query).unwrap() {
                prop_assert!(path.len() >= 2);
                prop_assert_eq!(&path.hops.last().unwrap().transfer, &None);

                let first = path.hops.first().unwrap();
                let second = &path.hops[1];
                let first_line = lines.first().cloned().flatten();
                match &first.transfer {
                    None => prop_assert_eq!(&first_line, &None),
                    Some(Transfer::Special(kind)) => {
                        prop_assert_eq!(transfers.get(first.station, second.station), Some(*kind));
                    }
                    Some(Transfer::Line(l)) => {
                        prop_assert_eq!(first_line.as_ref(), Some(l));
                    }
                }
            } else {
                prop_assert!(!query.has_rail_route());
            }
        }

        /// Rebuilding from the same query gives the same path
        #[test]
        fn idempotent(origin in id(), destination in id(),
                      interchanges in prop::collection::vec(id(), 0..5),
                      lines in lines()) {
            let dir = directory();
            let transfers = mtr_transfers();
            let builder = PathBuilder::new(&dir, &transfers);
            let raw: Vec<Option<RawId>> = interchanges.iter().map(|i| Some(RawId::from(StationId(*i)))).collect();

            let query = RailQuery { origin: StationId(origin), destination: StationId(destination), interchanges: &raw, lines: &lines, time: "06:00" };
            prop_assert_eq!(builder.rail_path(&query).unwrap(), builder.rail_path(&query).unwrap());
        }

        /// Transfer matching doesn't depend on argument order
        #[test]
        fn match_transfer_symmetric(a in id(), b in id()) {
            let dir = directory();
            let transfers = mtr_transfers();
            let builder = PathBuilder::new(&dir, &transfers);

            prop_assert_eq!(
                builder.match_transfer(Some(StationId(a)), Some(StationId(b))).unwrap(),
                builder.match_transfer(Some(StationId(b)), Some(StationId(a))).unwrap()
            );
        }
    }
}
