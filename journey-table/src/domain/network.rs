//! The two MTR networks this tool can tabulate.

use std::fmt;

/// Which network a run processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Network {
    /// Heavy rail: stations keyed by three-letter codes.
    #[value(name = "mtr")]
    HeavyRail,
    /// Light rail: stops keyed by `LRnnn` codes.
    #[value(name = "lrt")]
    LightRail,
}

impl Network {
    /// Short name used on the command line and in the output file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::HeavyRail => "mtr",
            Network::LightRail => "lrt",
        }
    }

    /// Top-level key of the output document.
    pub fn data_key(&self) -> &'static str {
        match self {
            Network::HeavyRail => "mtrData",
            Network::LightRail => "lrtData",
        }
    }

    /// File name the table is written to.
    pub fn output_file(&self) -> String {
        format!("{}_data.json", self.as_str())
    }

    /// Open-data file listing the network's stations or stops.
    pub fn dataset_file(&self) -> &'static str {
        match self {
            Network::HeavyRail => "mtr_lines_and_stations.csv",
            Network::LightRail => "light_rail_fares.csv",
        }
    }

    /// Journey API endpoint for this network.
    pub fn route_endpoint(&self) -> &'static str {
        match self {
            Network::HeavyRail => "HRRoutes",
            Network::LightRail => "LRRoute",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
