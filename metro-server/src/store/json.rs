//! Snapshot persistence as a single JSON document.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::FareSchedule;
use crate::network::MetroNetwork;

use super::records::NetworkSnapshot;
use super::StoreError;

/// Serialize the network's snapshot to `path`.
pub fn save(network: &MetroNetwork, path: &Path) -> Result<(), StoreError> {
    let snapshot = NetworkSnapshot::capture(network);
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;

    info!(
        path = %path.display(),
        stations = snapshot.stations.len(),
        tickets = snapshot.tickets.len(),
        "saved network snapshot"
    );
    Ok(())
}

/// Load a network from the snapshot at `path`.
pub fn load(path: &Path, fares: FareSchedule) -> Result<MetroNetwork, StoreError> {
    let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let snapshot: NetworkSnapshot = serde_json::from_str(&json)?;
    snapshot.restore(fares)
}
