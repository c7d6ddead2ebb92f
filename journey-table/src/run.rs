//! One end-to-end run: station list, harvest, write.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::aggregate::{HarvestSummary, Harvester, JourneySource};
use crate::directory::{Directory, DirectoryError, heavy_rail_directory, light_rail_directory};
use crate::domain::Network;
use crate::error::RunError;
use crate::mtr::{FetchConfig, MtrClient};
use crate::output::{render, write_atomically};
use crate::transfers::{SpecialTransfers, TransferTableError, mtr_transfers};

/// Environment variable naming a JSON special-transfer table.
pub const SPECIAL_TRANSFERS_ENV: &str = "SPECIAL_TRANSFERS";

/// What to build and where to put it.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub network: Network,
    pub fetch: FetchConfig,
    /// Replaces the built-in special-transfer table when set
    pub transfers_path: Option<PathBuf>,
    /// Directory the `{network}_data.json` file is written into
    pub output_dir: PathBuf,
}

impl RunConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            fetch: FetchConfig::default(),
            transfers_path: None,
            output_dir: PathBuf::from("."),
        }
    }

    /// Pick up the transfer table override from the environment.
    pub fn from_env(network: Network) -> Self {
        let config = Self::new(network);
        match std::env::var_os(SPECIAL_TRANSFERS_ENV) {
            Some(path) if !path.is_empty() => config.with_transfers_path(path),
            _ => config,
        }
    }

    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn with_transfers_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.transfers_path = Some(path.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Full path of the output file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.network.output_file())
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub path: PathBuf,
    pub bytes: usize,
    pub summary: HarvestSummary,
}

/// Parse a network's station list.
pub fn load_directory(network: Network, text: &str) -> Result<Directory, DirectoryError> {
    match network {
        Network::HeavyRail => heavy_rail_directory(text),
        Network::LightRail => light_rail_directory(text),
    }
}

/// The special-transfer table for a network, or the file override.
pub fn load_transfers(
    network: Network,
    path: Option<&Path>,
) -> Result<SpecialTransfers, TransferTableError> {
    let transfers = match path {
        Some(path) => {
            let transfers = SpecialTransfers::load(path)?;
            info!(path = %path.display(), pairs = transfers.len(), "loaded special transfers");
            transfers
        }
        None => match network {
            Network::HeavyRail => mtr_transfers(),
            Network::LightRail => SpecialTransfers::new(),
        },
    };

    for (pair, kind) in transfers.iter() {
        let (a, b) = pair.stations();
        debug!(%a, %b, %kind, "special transfer");
    }
    Ok(transfers)
}

/// Harvest every pair from `source` and render the output document.
pub async fn build_document<S: JourneySource>(
    source: &S,
    network: Network,
    directory: &Directory,
    transfers: &SpecialTransfers,
) -> Result<(Vec<u8>, HarvestSummary), RunError> {
    let harvester = Harvester::new(source, directory, transfers);
    match network {
        Network::HeavyRail => {
            let (table, summary) = harvester.heavy_rail().await?;
            Ok((render(network, &table)?, summary))
        }
        Network::LightRail => {
            let (table, summary) = harvester.light_rail().await?;
            Ok((render(network, &table)?, summary))
        }
    }
}

/// Fetch, harvest and write one network's table.
///
/// Nothing is written unless the whole harvest succeeds.
pub async fn run(config: RunConfig) -> Result<RunReport, RunError> {
    let network = config.network;
    let transfers = load_transfers(network, config.transfers_path.as_deref())?;
    let client = MtrClient::new(config.fetch.clone())?;

    let url = client.dataset_url(network);
    info!(%network, url, "fetching station list");
    let text = client.fetch_text(&url).await?;
    let directory = load_directory(network, &text)?;
    info!(%network, stations = directory.len(), "loaded station directory");

    let (document, summary) = build_document(&client, network, &directory, &transfers).await?;

    let path = config.output_path();
    write_atomically(&path, &document)?;
    info!(path = %path.display(), bytes = document.len(), "wrote table");

    Ok(RunReport {
        path,
        bytes: document.len(),
        summary,
    })
}
