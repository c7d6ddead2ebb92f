//! Top-level error for a whole run.

use crate::aggregate::HarvestError;
use crate::directory::DirectoryError;
use crate::mtr::FetchError;
use crate::transfers::TransferTableError;

/// Anything that stops a run before the table is written.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("station list: {0}")]
    Directory(#[from] DirectoryError),

    #[error("special transfers: {0}")]
    Transfers(#[from] TransferTableError),

    #[error("harvest aborted: {0}")]
    Harvest(#[from] HarvestError),

    #[error("serializing table: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("writing table: {0}")]
    Io(#[from] std::io::Error),
}
