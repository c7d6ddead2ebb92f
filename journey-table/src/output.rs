//! Writing the finished table to disk.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::aggregate::JourneyTable;
use crate::domain::Network;

/// Render `{"<network>Data": table}` as compact JSON.
///
/// Keys come out sorted and non-ASCII text is left unescaped.
pub fn render<H: Serialize>(
    network: Network,
    table: &JourneyTable<H>,
) -> Result<Vec<u8>, serde_json::Error> {
    let mut document = BTreeMap::new();
    document.insert(network.data_key(), table);
    serde_json::to_vec(&document)
}

/// Replace `path` with `contents` in one step.
///
/// Writes a sibling temp file and renames it over the target, so readers
/// never see a partial table.
pub fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    std::fs::write(tmp, contents)?;
    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(e);
    }
    Ok(())
}
